//! Helpers shared by hosts and tests.

use sha2::{Digest, Sha256};

use crate::{Context, Spec};

/// Derives a deterministic address from a human-readable key.
pub fn generate_address<C: Context>(key: &str) -> <C as Spec>::Address {
    let hash: [u8; 32] = Sha256::digest(key.as_bytes()).into();
    C::Address::from(hash)
}
