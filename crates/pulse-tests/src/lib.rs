//! Integration test suite for the Pulse curve engine.
//!
//! Exercises the engine end to end: snapshot files normalized into epochs,
//! curves sampled and queried, and epochs chained across sales.

pub mod helpers;
