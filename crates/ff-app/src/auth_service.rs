//! Login, logout, and the three-step password-reset flow.

use ff_api::{ApiClient, endpoints::LoginResponse};
use tracing::info;

use crate::error::{AppError, AppResult};

/// Authenticate and record the session for subsequent requests and the next
/// app start.
pub async fn login(client: &ApiClient, email: &str, password: &str) -> AppResult<LoginResponse> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required.".to_string(),
        ));
    }
    let response = client.login(email, password).await?;
    client
        .session()
        .sign_in(response.access_token.clone(), response.user.email.clone())?;
    info!(email = %response.user.email, "signed in");
    Ok(response)
}

/// Clear the in-memory session and the cached session file.
pub fn logout(client: &ApiClient) -> AppResult<()> {
    client.session().sign_out()?;
    info!("signed out");
    Ok(())
}

pub async fn request_reset_code(client: &ApiClient, email: &str) -> AppResult<()> {
    client.forgot_password(email.trim()).await?;
    Ok(())
}

pub async fn verify_reset_code(client: &ApiClient, email: &str, code: &str) -> AppResult<()> {
    client.verify_code(email.trim(), code.trim()).await?;
    Ok(())
}

pub async fn reset_password(
    client: &ApiClient,
    email: &str,
    code: &str,
    new_password: &str,
) -> AppResult<()> {
    if new_password.len() < 8 {
        return Err(AppError::Validation(
            "Password must be at least 8 characters.".to_string(),
        ));
    }
    client
        .reset_password(email.trim(), code.trim(), new_password)
        .await?;
    Ok(())
}
