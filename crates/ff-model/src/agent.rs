//! AI-agent requests and the canonical report view model.

use serde::{Deserialize, Serialize};

/// `POST /api/investments/timemachine` request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeMachineRequest {
    pub decision_description: String,
    pub decision_amount: f64,
    pub timeframe_years: u32,
}

impl Default for TimeMachineRequest {
    fn default() -> Self {
        Self {
            decision_description: String::new(),
            decision_amount: 0.0,
            timeframe_years: 5,
        }
    }
}

/// `POST /api/scenario_analysis` request body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScenarioRequest {
    pub scenario_description: String,
}

/// Which normalizer branch produced the report. Rendering does not depend on
/// this, but views may surface it and tests rely on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportSource {
    Structured,
    FencedJson,
    Headings,
    Prose,
}

/// One titled chunk of an agent report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportSection {
    pub heading: String,
    pub body: String,
}

/// Canonical normalized agent result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentReport {
    pub sections: Vec<ReportSection>,
    /// The untouched text the sections were derived from, for raw display.
    pub raw_text: String,
    pub image_url: Option<String>,
    pub source: ReportSource,
}

impl AgentReport {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.raw_text.trim().is_empty()
    }
}
