//! Shared application service layer for finflow.
//!
//! This crate provides a unified interface for both CLI and GUI frontends:
//! request lifecycle tracking, view gating, fabricated progress timelines,
//! and one service module per backend area. Frontends own the concurrency
//! (threads, runtimes, channels); everything here is runtime-agnostic.

pub mod admin_service;
pub mod agents_service;
pub mod auth_service;
pub mod error;
pub mod gate;
pub mod lifecycle;
pub mod products_service;
pub mod profile_service;
pub mod progress;
pub mod retirement_service;

pub use error::{AppError, AppResult};
pub use gate::GateDecision;
pub use lifecycle::{RequestSlot, RequestState, Ticket};
pub use progress::{ProgressSample, ProgressTimeline, Step};
