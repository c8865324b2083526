//! # tokenward-core
//!
//! Core crate for Tokenward. Contains the unified error system,
//! configuration schemas, the cache provider trait and typed identifiers.
//!
//! This crate has **no** internal dependencies on other Tokenward crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
