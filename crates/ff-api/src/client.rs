//! Thin wrapper around `reqwest` implementing the client's single network
//! contract: origin prefix, bearer injection, `.ok`-style status branching,
//! and `{detail}` error extraction.

use reqwest::multipart;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

use crate::error::{ApiError, ApiResult, error_body_message};
use crate::session::Session;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Session,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: Session) -> ApiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(ApiError::Network)?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authed(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.authed(self.http.get(self.url(path))).send().await?;
        decode(path, response).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .authed(self.http.post(self.url(path)).json(body))
            .send()
            .await?;
        decode(path, response).await
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .authed(self.http.put(self.url(path)).json(body))
            .send()
            .await?;
        decode(path, response).await
    }

    /// Multipart upload (audio clips, fund fact sheets).
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        field: &str,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<T> {
        let part = multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime)
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let form = multipart::Form::new().part(field.to_string(), part);
        let response = self
            .authed(self.http.post(self.url(path)).multipart(form))
            .send()
            .await?;
        decode(path, response).await
    }

    /// Unauthenticated POST for the password-reset flow, where no session
    /// exists yet.
    pub async fn post_json_public<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self.http.post(self.url(path)).json(body).send().await?;
        decode(path, response).await
    }
}

/// Status branching + body decode. Non-2xx never throws past here: it becomes
/// a `Status` error carrying the best message the body offers.
async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> ApiResult<T> {
    let status = response.status();
    if status == reqwest::StatusCode::UNAUTHORIZED {
        debug!(path, "unauthorized response");
        return Err(ApiError::Unauthorized);
    }
    let body = response.text().await.map_err(ApiError::Network)?;
    if !status.is_success() {
        debug!(path, status = status.as_u16(), "error response");
        return Err(ApiError::Status {
            status: status.as_u16(),
            message: error_body_message(&body),
        });
    }
    serde_json::from_str(&body).map_err(|e| {
        debug!(path, error = %e, "response body did not match expected shape");
        ApiError::Decode(e.to_string())
    })
}
