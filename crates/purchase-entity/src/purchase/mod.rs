//! Purchase domain entities.

pub mod model;

pub use model::{Purchase, PurchaseDto};
