//! Shared types, errors, and configuration for Aurum.
//!
//! This crate provides common types used across all other crates:
//! - Configuration management
//! - JWT token service and claims
//! - Auth request/response payloads
//! - Transactional email service

pub mod auth;
pub mod config;
pub mod email;
pub mod jwt;

pub use auth::Claims;
pub use config::AppConfig;
pub use email::{EmailError, EmailService};
pub use jwt::{JwtConfig, JwtError, JwtService};
