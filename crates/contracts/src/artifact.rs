//! Content addressing for the checked-in token artifact.

use sha2::{Digest, Sha256};

/// The raw artifact the bindings were generated from.
pub const JSON: &str = include_str!("../artifacts/BatchToken.json");

/// SHA-256 of [`JSON`]. Bump this when deliberately swapping in a new
/// build of the contract.
pub const SHA256: &str = "e6d4f56799ab18f16fa8567b43a837cf5fe93a7d383d02afdd6dad10b6825a1b";

#[derive(Debug, thiserror::Error)]
#[error("token artifact hash mismatch: expected {expected}, got {actual}")]
pub struct VerificationError {
    pub expected: &'static str,
    pub actual: String,
}

/// Checks that the embedded artifact is the build this binary was
/// reviewed against.
pub fn verify() -> Result<(), VerificationError> {
    let actual = hex::encode(Sha256::digest(JSON.as_bytes()));
    if actual == SHA256 {
        Ok(())
    } else {
        Err(VerificationError {
            expected: SHA256,
            actual,
        })
    }
}
