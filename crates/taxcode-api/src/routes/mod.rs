//! # API Route Modules
//!
//! - `taxcode`: encode person data into a tax code and decode a tax code
//!   back into person data.

pub mod taxcode;
