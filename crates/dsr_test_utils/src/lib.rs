//! # Dead Storm Rising Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Layout and game fixtures
//! - Scripted play and replay checks
//! - Property-based testing strategies

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod script;
pub mod strategies;

/// Re-export proptest for convenience.
pub use proptest;
