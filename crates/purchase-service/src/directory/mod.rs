//! Clients for the external user directory.

pub mod http;

pub use http::HttpUserDirectory;
