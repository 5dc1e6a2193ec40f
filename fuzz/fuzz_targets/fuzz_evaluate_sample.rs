#![no_main]
use fabric_grading::catalog::StaticCatalog;
use fabric_grading::pipeline::{parse_samples_str, SampleFormat};
use fabric_grading::quality::{evaluate, LengthPolicy, QualityThresholds};
use libfuzzer_sys::fuzz_target;

/// Fuzz sample parsing and grading.
///
/// Feeds arbitrary UTF-8 strings to the JSON and YAML sample parsers and
/// grades whatever parses, under both length policies. Grading must never
/// panic, and every produced report must be internally consistent.
fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let catalog = StaticCatalog::standard();

    for format in [SampleFormat::Json, SampleFormat::Yaml] {
        let Ok(samples) = parse_samples_str(s, format) else {
            continue;
        };
        for policy in [LengthPolicy::Reject, LengthPolicy::LegacyFallback] {
            let thresholds = QualityThresholds::default().with_length_policy(policy);
            for sample in &samples {
                if let Ok(report) = evaluate(sample, &thresholds, &catalog) {
                    assert!(report.total_points >= 0.0);
                    assert_eq!(report.defects.len(), sample.observations.len());
                    assert_eq!(report.fingerprint, report.compute_fingerprint());
                }
            }
        }
    }
});
