//! # HTTP Middleware
//!
//! Tower layers applied to every API route.

pub mod tracing_layer;
