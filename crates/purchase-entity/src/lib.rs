//! # purchase-entity
//!
//! Domain entities of the purchase service and their wire-facing DTOs.
//! Entities carry typed keys; DTOs carry plain strings exactly as they
//! travel over HTTP. Conversion from DTO to entity is where malformed
//! identifiers are rejected with a conversion error.

pub mod comment;
pub mod convert;
pub mod file;
pub mod purchase;

pub use comment::{Comment, CommentDto};
pub use file::{File, FileDto};
pub use purchase::{Purchase, PurchaseDto};
