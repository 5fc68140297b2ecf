//! Builder utilities for operation handler types
//!
//! Builder methods live in impl blocks on the core types, so nothing is
//! re-exported from here.

pub mod request;
