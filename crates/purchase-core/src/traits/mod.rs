//! Core traits defined in `purchase-core` and implemented by other crates.

pub mod directory;

pub use directory::UserDirectory;
