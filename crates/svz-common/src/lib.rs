//! Common types and utilities for the svz SystemVerilog compiler.
//!
//! This crate provides foundational types used across all svz crates:
//! - Diagnostics (`Diagnostic`, `DiagnosticCategory`, message templates)
//! - Centralized limits and thresholds

pub mod diagnostics;
pub use diagnostics::{Diagnostic, DiagnosticCategory};

// Centralized limits and thresholds
pub mod limits;
