//! File domain entities.

pub mod model;

pub use model::{File, FileDto};
