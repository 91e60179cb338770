//! # TuneVault Shared Library
//!
//! This crate contains the data layer shared by the TuneVault binaries:
//! database access, models, and authentication primitives. The API server
//! crate owns the HTTP surface.
//!
//! ## Module Organization
//!
//! - `db`: connection pool and migration runner
//! - `models`: database models and their CRUD operations
//! - `auth`: password hashing, session tokens, ownership checks

pub mod auth;
pub mod db;
pub mod models;

/// Current version of the TuneVault shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
