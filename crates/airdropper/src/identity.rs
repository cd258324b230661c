use alloy::{primitives::Address, signers::local::PrivateKeySigner};

/// Derives a fresh recipient address from a newly sampled random key. The
/// key is dropped on return, so nobody controls the address and anything
/// sent there is gone for good. Entropy source failure panics, which is
/// the intended fatal behavior.
pub fn generate_identity() -> Address {
    PrivateKeySigner::random().address()
}
