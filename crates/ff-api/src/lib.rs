//! Authenticated HTTP boundary for the finflow client.
//!
//! Everything the views know about the backend goes through [`ApiClient`]:
//! origin prefixing, bearer injection, JSON decoding, and the `{detail}`
//! error-body convention. The session handle is the only cross-view shared
//! state; views read it, they never mutate it directly.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod session;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult, GENERIC_ERROR};
pub use session::{Session, SessionData};
