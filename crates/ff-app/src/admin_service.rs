//! Admin-only operations: the privilege probe and fund fact-sheet intake.

use ff_api::ApiClient;
use ff_model::{AssetAllocation, AssetAllocationSave};
use tracing::warn;

use crate::error::AppResult;

/// Privilege probe. Any failure reports non-privileged so the admin gate
/// fails closed; the error is logged, not surfaced.
pub async fn check_admin(client: &ApiClient) -> bool {
    match client.check_admin().await {
        Ok(check) => check.is_admin,
        Err(err) => {
            warn!(error = %err, "admin probe failed; treating as non-privileged");
            false
        }
    }
}

/// Upload a fund fact sheet PDF and get back the extracted allocation
/// percentages for review.
pub async fn extract_allocation(
    client: &ApiClient,
    file_name: &str,
    pdf: Vec<u8>,
) -> AppResult<AssetAllocation> {
    Ok(client.extract_asset_allocation(file_name, pdf).await?)
}

/// Persist a reviewed allocation. Percentages are validated locally before
/// the request is sent.
pub async fn save_allocation(client: &ApiClient, save: &AssetAllocationSave) -> AppResult<()> {
    save.allocations.validate()?;
    client.save_asset_allocation(save).await?;
    Ok(())
}
