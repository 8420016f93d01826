//! # bi-core
//!
//! Core types, errors, and configuration for Explore Controls RS.
//!
//! This crate provides the foundational building blocks used across the other crates:
//! - Common error types and validation errors
//! - Shared identifiers (column ids, metric ids, verbose maps)
//! - The `OneOrMany` form-field normalization
//! - Configuration types

pub mod error;
pub mod types;
pub mod config;

pub use error::*;
pub use types::*;
