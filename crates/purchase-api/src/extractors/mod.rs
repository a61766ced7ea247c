//! Custom Axum extractors.

pub mod validated;

pub use validated::{BindRequest, RequestInput, Validated};
