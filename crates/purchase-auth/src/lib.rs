//! # purchase-auth
//!
//! HS256 bearer tokens. The API layer only needs "verify token, get
//! subject"; issuance exists for operators and tests.

pub mod jwt;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
