//! Retirement planning: current plan, what-if projections, health check, and
//! the advisor round-trip.

use ff_api::{ApiClient, endpoints::AdvisorFeedback};
use ff_model::{RecommendationResponse, RetirementHealth, RetirementPlan, WhatIfRequest, WhatIfResponse};

use crate::error::AppResult;

pub async fn current_plan(client: &ApiClient) -> AppResult<RetirementPlan> {
    Ok(client.current_plan().await?)
}

/// Validate locally first; an out-of-range request never reaches the wire.
pub async fn run_what_if(
    client: &ApiClient,
    request: &WhatIfRequest,
) -> AppResult<WhatIfResponse> {
    request.validate()?;
    Ok(client.what_if(request).await?)
}

pub async fn health(client: &ApiClient) -> AppResult<RetirementHealth> {
    Ok(client.retirement_health().await?)
}

/// The advisor payload shares the recommendation shape; unrecognized fields
/// are dropped rather than failing the call.
pub async fn run_advisor(client: &ApiClient) -> AppResult<RecommendationResponse> {
    let value = client.retirement_advisor().await?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

pub async fn recommendations(
    client: &ApiClient,
    force_new: bool,
) -> AppResult<RecommendationResponse> {
    let value = client.recommendations(force_new).await?;
    Ok(serde_json::from_value(value).unwrap_or_default())
}

pub async fn send_feedback(
    client: &ApiClient,
    recommendation_id: &str,
    feedback: &str,
    comment: Option<String>,
) -> AppResult<()> {
    let body = AdvisorFeedback {
        recommendation_id: recommendation_id.to_string(),
        feedback: feedback.to_string(),
        comment,
    };
    client.advisor_feedback(&body).await?;
    Ok(())
}
