//! Domain layer for Line Rules
//!
//! CDD Principle: Domain Model - Pure logic for line classification
//! - Documents are immutable sequences of lines loaded once per run
//! - Classification results are aggregates of per-line match records
//! - Independent of presentation concerns like report formats or terminals

pub mod classification;
pub mod document;

// Re-export main domain types for convenience
pub use classification::*;
pub use document::{Document, Line};
