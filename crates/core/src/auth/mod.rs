//! Authentication primitives.
//!
//! This module provides:
//! - Password hashing with Argon2id
//! - Password verification
//! - Referral code generation

mod password;

pub use password::{PasswordError, hash_password, verify_password};

use rand::Rng;

/// Generates a referral code: 8 lowercase hex characters.
#[must_use]
pub fn generate_referral_code() -> String {
    let bytes: [u8; 4] = rand::thread_rng().gen();
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_referral_code_shape() {
        let code = generate_referral_code();
        assert_eq!(code.len(), 8);
        assert!(code.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_referral_codes_differ() {
        // Collisions in 4 random bytes are possible but vanishingly unlikely
        // across two draws.
        assert_ne!(generate_referral_code(), generate_referral_code());
    }
}
