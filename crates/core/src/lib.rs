//! Shared domain types for the relocale batch pipeline.
//!
//! Pure data and helpers only; this crate has no internal
//! dependencies so every other crate can build on it.

pub mod error;
pub mod naming;
pub mod types;
