//! Core business logic for Aurum.
//!
//! This crate contains the pure rules of the platform with zero web or
//! database dependencies:
//! - Password hashing with Argon2id
//! - One-time verification codes (generation and expiry policy)
//! - Ledger rules: signed amounts, funds checks, operation descriptions
//! - Request field validation helpers
//! - User-agent parsing for session bookkeeping

pub mod auth;
pub mod ledger;
pub mod otp;
pub mod useragent;
pub mod validation;
