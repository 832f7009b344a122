//! Typed endpoint wrappers.
//!
//! Stable backend responses get concrete models; the agent-backed endpoints
//! return raw `serde_json::Value` because their shape drifts with the prompt
//! and is handled by the normalizers downstream.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ff_model::{
    AssetAllocation, AssetAllocationSave, FinancialAssessment, Profile, ProfileUpdate,
    RetirementHealth, RetirementPlan, ScenarioRequest, TimeMachineRequest, WhatIfRequest,
    WhatIfResponse,
};

use crate::client::ApiClient;
use crate::error::ApiResult;

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginUser {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub profile: Option<Profile>,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: LoginUser,
}

#[derive(Debug, Deserialize, Default)]
pub struct AdminCheck {
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub message: String,
}

/// The financial-team route binds `query`, unlike the other chat routes.
#[derive(Debug, Serialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AdvisorFeedback {
    pub recommendation_id: String,
    pub feedback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
struct EmailOnly<'a> {
    email: &'a str,
}

#[derive(Debug, Serialize)]
struct VerifyCode<'a> {
    email: &'a str,
    code: &'a str,
}

#[derive(Debug, Serialize)]
struct ResetPassword<'a> {
    email: &'a str,
    code: &'a str,
    new_password: &'a str,
}

impl ApiClient {
    // ---- auth -----------------------------------------------------------

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post_json_public("/api/auth/login", &body).await
    }

    pub async fn forgot_password(&self, email: &str) -> ApiResult<Value> {
        self.post_json_public("/api/forgot-password", &EmailOnly { email })
            .await
    }

    pub async fn verify_code(&self, email: &str, code: &str) -> ApiResult<Value> {
        self.post_json_public("/api/verify-code", &VerifyCode { email, code })
            .await
    }

    pub async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> ApiResult<Value> {
        self.post_json_public(
            "/api/reset-password",
            &ResetPassword {
                email,
                code,
                new_password,
            },
        )
        .await
    }

    // ---- profile + gate -------------------------------------------------

    pub async fn fetch_profile(&self) -> ApiResult<Profile> {
        self.get_json("/api/profile").await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<Profile> {
        self.put_json("/api/profile", update).await
    }

    pub async fn check_admin(&self) -> ApiResult<AdminCheck> {
        self.get_json("/api/admin/check-admin").await
    }

    // ---- dashboard ------------------------------------------------------

    pub async fn financial_assessment(&self, force_refresh: bool) -> ApiResult<FinancialAssessment> {
        let path = if force_refresh {
            "/api/financial-assessment?force_refresh=true"
        } else {
            "/api/financial-assessment"
        };
        self.get_json(path).await
    }

    pub async fn recommendations(&self, force_new: bool) -> ApiResult<Value> {
        let path = if force_new {
            "/api/recommendations?force_new=true"
        } else {
            "/api/recommendations"
        };
        self.get_json(path).await
    }

    // ---- retirement -----------------------------------------------------

    pub async fn current_plan(&self) -> ApiResult<RetirementPlan> {
        self.get_json("/api/retirement/current-plan").await
    }

    pub async fn what_if(&self, request: &WhatIfRequest) -> ApiResult<WhatIfResponse> {
        self.post_json("/api/retirement/what-if", request).await
    }

    pub async fn retirement_health(&self) -> ApiResult<RetirementHealth> {
        self.get_json("/api/retirement/health").await
    }

    pub async fn retirement_advisor(&self) -> ApiResult<Value> {
        self.post_json("/api/retirement/advisor", &Value::Object(Default::default()))
            .await
    }

    pub async fn advisor_feedback(&self, feedback: &AdvisorFeedback) -> ApiResult<Value> {
        self.post_json("/api/retirement/advisor/feedback", feedback)
            .await
    }

    // ---- products -------------------------------------------------------

    pub async fn chat_products(&self, message: &str) -> ApiResult<Value> {
        let body = ChatRequest {
            message: message.to_string(),
        };
        self.post_json("/api/chat/products", &body).await
    }

    // Both voice routes bind the upload as `file`, same as the admin
    // fact-sheet intake.
    pub async fn voice_chat_products(&self, file_name: &str, audio: Vec<u8>) -> ApiResult<Value> {
        self.post_multipart("/api/voice-chat/products", "file", file_name, "audio/wav", audio)
            .await
    }

    pub async fn voice_to_text(&self, file_name: &str, audio: Vec<u8>) -> ApiResult<Value> {
        self.post_multipart("/api/voice-to-text", "file", file_name, "audio/wav", audio)
            .await
    }

    // ---- agents ---------------------------------------------------------

    pub async fn financial_team(&self, query: &str) -> ApiResult<Value> {
        let body = QueryRequest {
            query: query.to_string(),
        };
        self.post_json("/api/financial-team", &body).await
    }

    pub async fn analyst_agent(&self, message: &str) -> ApiResult<Value> {
        let body = ChatRequest {
            message: message.to_string(),
        };
        self.post_json("/api/investments/analyst-agent", &body).await
    }

    pub async fn time_machine(&self, request: &TimeMachineRequest) -> ApiResult<Value> {
        self.post_json("/api/investments/timemachine", request).await
    }

    pub async fn scenario_analysis(&self, request: &ScenarioRequest) -> ApiResult<Value> {
        self.post_json("/api/scenario_analysis", request).await
    }

    // ---- admin ----------------------------------------------------------

    pub async fn extract_asset_allocation(
        &self,
        file_name: &str,
        pdf: Vec<u8>,
    ) -> ApiResult<AssetAllocation> {
        self.post_multipart(
            "/api/admin/extract-asset-allocation",
            "file",
            file_name,
            "application/pdf",
            pdf,
        )
        .await
    }

    pub async fn save_asset_allocation(&self, save: &AssetAllocationSave) -> ApiResult<Value> {
        self.post_json("/api/admin/save-asset-allocation", save).await
    }
}
