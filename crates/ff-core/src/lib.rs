//! ff-core: stable foundation for finflow.
//!
//! Contains:
//! - numeric (lenient coercion helpers for untrusted backend payloads)
//! - error (shared error types)

pub mod error;
pub mod numeric;

// Re-exports: nice ergonomics for downstream crates
pub use error::{FfError, FfResult};
pub use numeric::*;
