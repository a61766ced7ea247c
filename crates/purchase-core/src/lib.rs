//! # purchase-core
//!
//! Core crate for the purchase service. Contains the configuration schema,
//! typed identifiers, the date-range filter, the user-directory capability
//! trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
