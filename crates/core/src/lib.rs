//! Core domain logic for warden: the compact threshold-rule grammar, the
//! editable rule model it maps to, and the form-layer checks that guard
//! what gets saved.
//!
//! Everything in this crate is pure and synchronous; I/O, logging and
//! reporting live in the tools built on top of it.

pub mod codec;
pub mod error;
pub mod profile;
pub mod rule;
pub mod uom;
pub mod validation;
