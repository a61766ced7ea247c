//! File services.

pub mod service;

pub use service::{FileRequest, FileService};
