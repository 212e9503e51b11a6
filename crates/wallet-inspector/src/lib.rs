//! Wallet state inspector.
//!
//! Loads a persisted state snapshot through a pluggable source and runs the
//! wallet selectors against it.

pub mod commands;
pub mod error;
pub mod snapshot;

pub use error::InspectorError;
