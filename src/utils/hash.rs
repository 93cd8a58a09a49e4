//! Content hashing using FxHash.
//!
//! Uses `rustc_hash::FxHasher` for fast, deterministic hashing. The hash
//! only feeds output fingerprints, never anything security-sensitive.
//!
//! # Usage
//!
//! ```ignore
//! use crate::utils::hash;
//!
//! let fp = hash::fingerprint(b"body{color:red}"); // -> "a1b2c3d4"
//! let name = hash::fingerprinted_name("style", &fp, ".css"); // -> "style.a1b2c3d4.css"
//! ```

use rustc_hash::FxHasher;
use std::hash::Hasher;

/// Compute 64-bit hash from byte data.
#[inline]
pub fn compute<T: AsRef<[u8]> + ?Sized>(data: &T) -> u64 {
    let mut hasher = FxHasher::default();
    hasher.write(data.as_ref());
    hasher.finish()
}

/// Compute hash and return as 8-char hex fingerprint.
#[inline]
pub fn fingerprint<T: AsRef<[u8]> + ?Sized>(value: &T) -> String {
    format!("{:016x}", compute(value))[..8].to_string()
}

/// Output file name with an optional fingerprint before the extension.
///
/// `extension` carries its leading dot.
pub fn fingerprinted_name(stem: &str, fingerprint: &str, extension: &str) -> String {
    if fingerprint.is_empty() {
        format!("{stem}{extension}")
    } else {
        format!("{stem}.{fingerprint}{extension}")
    }
}
