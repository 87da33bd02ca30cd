//! HTTP client implementations

pub mod blocking;
