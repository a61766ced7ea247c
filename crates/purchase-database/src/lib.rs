//! # purchase-database
//!
//! Repository contracts for purchases, comments, and files, with a
//! PostgreSQL implementation and a process-local implementation.
//! [`Repositories`] picks one of them from configuration.

pub mod connection;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::Repositories;
