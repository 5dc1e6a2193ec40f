//! Shared utilities.

mod hash;
mod numeric;

pub use hash::{content_hash, fingerprint};
pub use numeric::round_to;
