//! Wire and view models for the finflow client.
//!
//! Everything here is transient: owned by the view that fetched it and
//! discarded on navigation. Field names mirror the backend contract; optional
//! fields default so a sparse payload still deserializes.

pub mod agent;
pub mod allocation;
pub mod assessment;
pub mod products;
pub mod profile;
pub mod recommendation;
pub mod retirement;

pub use agent::{AgentReport, ReportSection, ReportSource, ScenarioRequest, TimeMachineRequest};
pub use allocation::{AssetAllocation, AssetAllocationSave};
pub use assessment::{DiagnosticDimension, FinancialAssessment};
pub use products::{Performance, ProductCard};
pub use profile::{Profile, ProfileDraft, ProfileUpdate};
pub use recommendation::{RecommendationResponse, UserRecommendation};
pub use retirement::{RetirementHealth, RetirementPlan, SavingsYear, WhatIfRequest, WhatIfResponse};
