//! Content hashing utilities.

use xxhash_rust::xxh3::xxh3_64;

/// Compute a content hash for arbitrary bytes
pub fn content_hash(data: &[u8]) -> u64 {
    xxh3_64(data)
}

/// Render a content hash as a fixed-width lowercase hex string
pub fn fingerprint(data: &[u8]) -> String {
    format!("{:016x}", content_hash(data))
}
