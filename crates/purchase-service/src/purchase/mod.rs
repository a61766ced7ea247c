//! Purchase services.

pub mod service;

pub use service::{CreatePurchaseRequest, PurchaseService};
