//! # svckit-core
//!
//! Core crate for svckit. Contains the unified error system, configuration
//! schemas, the response envelope and its code table, query parameter types,
//! and generic slice helpers.
//!
//! This crate has **no** internal dependencies on other svckit crates.

pub mod config;
pub mod error;
pub mod result;
pub mod slices;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
