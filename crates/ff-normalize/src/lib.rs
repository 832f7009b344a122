//! Response normalization for heterogeneous backend payloads.
//!
//! The backend's response shape varies by endpoint and by call path within one
//! endpoint: structured JSON, database-row arrays, or freeform markdown. Each
//! normalizer here is a total function over an ordered list of shape matchers;
//! the first matching branch wins and a completely unrecognized payload yields
//! an explicit empty result, never an error and never a stale value.

pub mod agent;
pub mod products;
pub mod table;

pub use agent::normalize_agent_report;
pub use products::normalize_products;
pub use table::extract_table_rows;
