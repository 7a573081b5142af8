//! Common utilities for the unorm toolkit.
//!
//! This crate provides shared infrastructure used by all unorm components:
//! - **Warning System** - deduplicated, colored stderr diagnostics for
//!   recoverable conditions such as malformed input

pub mod warning;
