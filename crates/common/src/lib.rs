//! Shared wire types and utilities used on both sides of the HTTP boundary.
//!
//! The `server` crate serializes these types; the `client` crate
//! deserializes them. Keeping them in one place is what makes the wire
//! contract a compile-time fact instead of a convention.

pub mod types;
pub mod utils;
