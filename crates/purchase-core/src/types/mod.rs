//! Core type definitions used across the workspace.

pub mod id;
pub mod range;

pub use id::*;
pub use range::DateRange;
