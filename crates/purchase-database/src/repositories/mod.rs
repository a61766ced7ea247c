//! Repository contracts and their implementations.

pub mod comment;
pub mod file;
pub mod memory;
pub mod purchase;

pub use comment::{CommentRepository, PgCommentRepository};
pub use file::{FileRepository, PgFileRepository};
pub use memory::MemoryStore;
pub use purchase::{PgPurchaseRepository, PurchaseRepository};
