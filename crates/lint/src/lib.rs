//! `warden-lint` library crate.
//!
//! Re-exports internal modules for integration testing. The binary
//! entrypoint lives in `main.rs`.

pub mod checker;
pub mod error;
pub mod report;
