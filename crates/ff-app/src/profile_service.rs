//! Profile fetch and save, plus the profile-derived financial assessment.

use ff_api::ApiClient;
use ff_model::{FinancialAssessment, Profile, ProfileDraft};
use tracing::debug;

use crate::error::AppResult;

pub async fn fetch_profile(client: &ApiClient) -> AppResult<Profile> {
    Ok(client.fetch_profile().await?)
}

/// Coerce the string-typed form draft into a wire update, then persist it.
/// A draft field that cannot be coerced fails before any request is sent.
pub async fn save_profile(client: &ApiClient, draft: &ProfileDraft) -> AppResult<Profile> {
    let update = draft.to_update()?;
    debug!("saving profile update");
    Ok(client.update_profile(&update).await?)
}

/// Cached on the backend; `force_refresh` asks for a fresh diagnostic.
pub async fn financial_assessment(
    client: &ApiClient,
    force_refresh: bool,
) -> AppResult<FinancialAssessment> {
    Ok(client.financial_assessment(force_refresh).await?)
}
