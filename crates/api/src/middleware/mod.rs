//! Request middleware: bearer-token auth and the admin key check.

pub mod admin;
pub mod auth;
