//! # pulse-core
//! Foundation types and traits for the Pulse auction pricing curve.

pub mod constants;
pub mod error;
pub mod snapshot;
pub mod traits;
pub mod types;
