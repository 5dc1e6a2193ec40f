//! Escaping utilities for report generation.
//!
//! Batch numbers, fabric names and inspector notes are typed by operators and
//! may contain characters that break Markdown tables or CSV rows. Everything
//! free-text goes through one of these helpers before it is embedded.

/// Escape a string for safe inclusion in Markdown table cells.
///
/// Pipes, backticks and brackets are escaped; newlines collapse to spaces.
///
/// # Examples
///
/// ```
/// use fabric_grading::reports::escape::escape_markdown_table;
///
/// assert_eq!(escape_markdown_table("Denim | stretch"), "Denim \\| stretch");
/// assert_eq!(escape_markdown_table("near\nselvedge"), "near selvedge");
/// assert_eq!(escape_markdown_table("`B-7`"), "\\`B-7\\`");
/// ```
#[must_use]
pub fn escape_markdown_table(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '|' => result.push_str("\\|"),
            '\n' => result.push(' '),
            '\r' => {}
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape a string for safe inclusion in Markdown inline content.
///
/// # Examples
///
/// ```
/// use fabric_grading::reports::escape::escape_markdown_inline;
///
/// assert_eq!(escape_markdown_inline("**rush** order"), "\\*\\*rush\\*\\* order");
/// assert_eq!(escape_markdown_inline("lot_12"), "lot\\_12");
/// ```
#[must_use]
pub fn escape_markdown_inline(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '*' => result.push_str("\\*"),
            '_' => result.push_str("\\_"),
            '`' => result.push_str("\\`"),
            '[' => result.push_str("\\["),
            ']' => result.push_str("\\]"),
            '#' => result.push_str("\\#"),
            '!' => result.push_str("\\!"),
            '~' => result.push_str("\\~"),
            '|' => result.push_str("\\|"),
            '<' => result.push_str("\\<"),
            '>' => result.push_str("\\>"),
            '\n' => result.push(' '),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Quote a CSV field when it contains a delimiter, quote or line break.
///
/// Embedded quotes are doubled and line breaks flattened to spaces.
///
/// # Examples
///
/// ```
/// use fabric_grading::reports::escape::escape_csv;
///
/// assert_eq!(escape_csv("Twill"), "Twill");
/// assert_eq!(escape_csv("Twill, 2/1"), "\"Twill, 2/1\"");
/// assert_eq!(escape_csv("near \"splice\""), "\"near \"\"splice\"\"\"");
/// ```
#[must_use]
pub fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\"").replace(['\n', '\r'], " "))
    } else {
        s.to_string()
    }
}
