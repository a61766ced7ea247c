//! End-to-end tests driving the full router over the in-memory store.

mod helpers;

mod auth_test;
mod comment_test;
mod file_test;
mod purchase_test;
