//! One-time verification codes for email verification.
//!
//! Code generation and the expiry/attempt policy live here; storage and
//! lookup are the database layer's concern.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use thiserror::Error;

/// How long a code stays valid after issuance.
pub const OTP_TTL_MINUTES: i64 = 10;

/// Maximum failed verification attempts before a code is invalidated.
pub const MAX_ATTEMPTS: i32 = 5;

/// Reasons a code fails verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum OtpError {
    /// The code does not match.
    #[error("invalid verification code")]
    Mismatch,
    /// The code expired.
    #[error("verification code has expired")]
    Expired,
    /// Too many failed attempts against this code.
    #[error("too many failed attempts, request a new code")]
    TooManyAttempts,
}

/// Generates a 6-digit numeric code, zero-padded.
#[must_use]
pub fn generate_code() -> String {
    let n: u32 = rand::thread_rng().gen_range(0..1_000_000);
    format!("{n:06}")
}

/// Returns the expiry timestamp for a code issued at `now`.
#[must_use]
pub fn expires_at(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::minutes(OTP_TTL_MINUTES)
}

/// Checks a submitted code against the stored one.
///
/// The expiry and attempt checks come first so an attacker cannot use a
/// stale code to probe whether it would have matched.
///
/// # Errors
///
/// Returns the first violated rule: `Expired`, `TooManyAttempts`, or
/// `Mismatch`.
pub fn verify_code(
    stored: &str,
    submitted: &str,
    expires: DateTime<Utc>,
    attempts: i32,
    now: DateTime<Utc>,
) -> Result<(), OtpError> {
    if now >= expires {
        return Err(OtpError::Expired);
    }
    if attempts >= MAX_ATTEMPTS {
        return Err(OtpError::TooManyAttempts);
    }
    if stored != submitted {
        return Err(OtpError::Mismatch);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_shape() {
        for _ in 0..32 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_expiry_window() {
        let now = Utc::now();
        assert_eq!(expires_at(now) - now, Duration::minutes(10));
    }

    #[test]
    fn test_verify_ok() {
        let now = Utc::now();
        assert!(verify_code("123456", "123456", expires_at(now), 0, now).is_ok());
    }

    #[test]
    fn test_verify_mismatch() {
        let now = Utc::now();
        assert_eq!(
            verify_code("123456", "654321", expires_at(now), 0, now),
            Err(OtpError::Mismatch)
        );
    }

    #[test]
    fn test_verify_expired() {
        let now = Utc::now();
        let expired = now - Duration::minutes(1);
        assert_eq!(
            verify_code("123456", "123456", expired, 0, now),
            Err(OtpError::Expired)
        );
    }

    #[test]
    fn test_verify_attempt_limit() {
        let now = Utc::now();
        assert_eq!(
            verify_code("123456", "123456", expires_at(now), MAX_ATTEMPTS, now),
            Err(OtpError::TooManyAttempts)
        );
    }

    #[test]
    fn test_expired_beats_mismatch() {
        let now = Utc::now();
        let expired = now - Duration::minutes(1);
        assert_eq!(
            verify_code("123456", "000000", expired, 0, now),
            Err(OtpError::Expired)
        );
    }
}
