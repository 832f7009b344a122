//! Agent-backed analysis endpoints. Every response is normalized into an
//! [`AgentReport`] regardless of which shape the agent chose to answer in.

use ff_api::ApiClient;
use ff_model::{AgentReport, ScenarioRequest, TimeMachineRequest};
use ff_normalize::normalize_agent_report;

use crate::error::AppResult;

pub async fn analyst(client: &ApiClient, message: &str) -> AppResult<AgentReport> {
    let value = client.analyst_agent(message).await?;
    Ok(normalize_agent_report(&value))
}

pub async fn time_machine(
    client: &ApiClient,
    request: &TimeMachineRequest,
) -> AppResult<AgentReport> {
    let value = client.time_machine(request).await?;
    Ok(normalize_agent_report(&value))
}

pub async fn scenario(client: &ApiClient, request: &ScenarioRequest) -> AppResult<AgentReport> {
    let value = client.scenario_analysis(request).await?;
    Ok(normalize_agent_report(&value))
}

pub async fn financial_team(client: &ApiClient, message: &str) -> AppResult<AgentReport> {
    let value = client.financial_team(message).await?;
    Ok(normalize_agent_report(&value))
}
