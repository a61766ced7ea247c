//! # purchase-service
//!
//! Business logic for purchases, comments, and files. Purchase and file
//! services pass validated input straight to their repository and add
//! one line of context to failures. The comment service additionally
//! asks the external user directory whether the author exists before it
//! writes or looks up anything keyed by user.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod comment;
pub mod directory;
pub mod file;
pub mod purchase;

pub use comment::{CommentRequest, CommentService};
pub use directory::HttpUserDirectory;
pub use file::{FileRequest, FileService};
pub use purchase::{CreatePurchaseRequest, PurchaseService};
