//! arithmo-core: data model, adaptive difficulty engine, and session tracking.
//!
//! This crate defines the fundamental types and decision logic that the rest
//! of the arithmo system builds on. It performs no I/O.

pub mod engine;
pub mod error;
pub mod feedback;
pub mod model;
pub mod tracker;
pub mod traits;
