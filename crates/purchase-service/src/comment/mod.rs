//! Comment services.

pub mod service;

pub use service::{CommentRequest, CommentService};
