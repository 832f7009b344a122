//! Agent-result normalization (investment analyst, time machine, scenario
//! analysis, financial team).
//!
//! Strict priority order, first matching branch wins:
//! 1. object-valued `structured_output` (or `analysis`) → one section per
//!    field;
//! 2. a fenced JSON block embedded in the response text → parsed as (1);
//! 3. markdown-style headings (`## Heading` or `**Heading**`) split the text
//!    into sections;
//! 4. the whole text as opaque prose with no per-section breakdown.

use std::sync::LazyLock;

use ff_model::{AgentReport, ReportSection, ReportSource};
use regex::Regex;
use serde_json::Value;

static FENCED_JSON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("fenced json regex")
});

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:##+\s*(?P<hash>[^\n]+?)\s*$|\*\*(?P<bold>[^*\n]+)\*\*:?\s*$)")
        .expect("heading regex")
});

/// Normalize any agent payload into the canonical report.
pub fn normalize_agent_report(payload: &Value) -> AgentReport {
    let image_url = find_image_url(payload);
    let text = response_text(payload);

    // Branch 1: structured object straight from the payload.
    if let Some(obj) = structured_object(payload) {
        return AgentReport {
            sections: object_sections(obj),
            raw_text: serde_json::to_string_pretty(&Value::Object(obj.clone()))
                .unwrap_or_default(),
            image_url,
            source: ReportSource::Structured,
        };
    }

    // Branch 2: structured object hiding in a fenced code block.
    if let Some(caps) = FENCED_JSON_RE.captures(&text) {
        if let Ok(Value::Object(obj)) = serde_json::from_str::<Value>(&caps[1]) {
            return AgentReport {
                sections: object_sections(&obj),
                raw_text: text.clone(),
                image_url,
                source: ReportSource::FencedJson,
            };
        }
    }

    // Branch 3: heading extraction over the raw text.
    let sections = heading_sections(&text);
    if !sections.is_empty() {
        return AgentReport {
            sections,
            raw_text: text,
            image_url,
            source: ReportSource::Headings,
        };
    }

    // Branch 4: opaque prose.
    AgentReport {
        sections: Vec::new(),
        raw_text: text,
        image_url,
        source: ReportSource::Prose,
    }
}

fn find_image_url(payload: &Value) -> Option<String> {
    for key in ["image_url", "visualization_url"] {
        if let Some(url) = payload.get(key).and_then(Value::as_str) {
            if !url.trim().is_empty() {
                return Some(url.trim().to_string());
            }
        }
    }
    None
}

fn structured_object(payload: &Value) -> Option<&serde_json::Map<String, Value>> {
    payload
        .get("structured_output")
        .and_then(Value::as_object)
        .or_else(|| payload.get("analysis").and_then(Value::as_object))
}

/// First string field carrying the agent's prose, else the payload itself
/// when it is a bare string.
fn response_text(payload: &Value) -> String {
    if let Some(s) = payload.as_str() {
        return s.to_string();
    }
    for key in ["analysis", "response", "explanation", "result"] {
        if let Some(s) = payload.get(key).and_then(Value::as_str) {
            if !s.trim().is_empty() {
                return s.to_string();
            }
        }
    }
    String::new()
}

/// Envelope fields that are not analysis content.
const META_KEYS: [&str; 4] = ["status", "message", "currency", "image_url"];

fn object_sections(obj: &serde_json::Map<String, Value>) -> Vec<ReportSection> {
    obj.iter()
        .filter(|(key, _)| !META_KEYS.contains(&key.as_str()))
        .filter_map(|(key, value)| {
            let body = render_value(value);
            if body.trim().is_empty() {
                return None;
            }
            Some(ReportSection {
                heading: humanize_key(key),
                body,
            })
        })
        .collect()
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| format!("- {}", render_value(item)))
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(_) => serde_json::to_string_pretty(value).unwrap_or_default(),
        Value::Null => String::new(),
    }
}

/// "detailed_analysis" -> "Detailed Analysis".
fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn heading_sections(text: &str) -> Vec<ReportSection> {
    let mut boundaries: Vec<(usize, usize, String)> = HEADING_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let m = caps.get(0)?;
            let heading = caps
                .name("hash")
                .or_else(|| caps.name("bold"))
                .map(|h| h.as_str().trim().to_string())?;
            Some((m.start(), m.end(), heading))
        })
        .collect();

    if boundaries.is_empty() {
        return Vec::new();
    }
    boundaries.sort_by_key(|(start, _, _)| *start);

    let mut sections = Vec::with_capacity(boundaries.len());
    for (i, (_, end, heading)) in boundaries.iter().enumerate() {
        let body_end = boundaries
            .get(i + 1)
            .map(|(next_start, _, _)| *next_start)
            .unwrap_or(text.len());
        let body = text[*end..body_end].trim().to_string();
        sections.push(ReportSection {
            heading: heading.clone(),
            body,
        });
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structured_output_wins() {
        let payload = json!({
            "status": "success",
            "analysis": "See structured_output for detailed analysis",
            "structured_output": {
                "market_summary": "Markets are volatile.",
                "detailed_analysis": "Your portfolio is overweight tech.",
                "recommended_actions": ["Rebalance", "Hold cash"]
            },
            "image_url": "https://example.com/chart.png"
        });
        let report = normalize_agent_report(&payload);
        assert_eq!(report.source, ReportSource::Structured);
        assert_eq!(report.sections.len(), 3);
        let headings: Vec<_> = report.sections.iter().map(|s| s.heading.as_str()).collect();
        assert!(headings.contains(&"Detailed Analysis"));
        assert!(headings.contains(&"Recommended Actions"));
        assert_eq!(report.image_url.as_deref(), Some("https://example.com/chart.png"));
    }

    #[test]
    fn fenced_json_block_is_second_choice() {
        let payload = json!({
            "analysis": "Here is my analysis:\n```json\n{\"risk_assessment\": \"Moderate\", \"impact_analysis\": \"Limited downside\"}\n```\nLet me know."
        });
        let report = normalize_agent_report(&payload);
        assert_eq!(report.source, ReportSource::FencedJson);
        assert_eq!(report.sections.len(), 2);
        assert_eq!(report.sections[0].heading, "Impact Analysis");
    }

    #[test]
    fn markdown_headings_split_into_sections() {
        let payload = json!({
            "analysis": "## Market Summary\nMarkets rallied.\n\n## Risk Assessment\nElevated.\n\n**Next Steps**\nRebalance quarterly."
        });
        let report = normalize_agent_report(&payload);
        assert_eq!(report.source, ReportSource::Headings);
        assert_eq!(report.sections.len(), 3);
        assert_eq!(report.sections[0].heading, "Market Summary");
        assert_eq!(report.sections[0].body, "Markets rallied.");
        assert_eq!(report.sections[2].heading, "Next Steps");
    }

    #[test]
    fn plain_prose_has_no_sections() {
        let payload = json!({"analysis": "Buying the dip is rarely a strategy."});
        let report = normalize_agent_report(&payload);
        assert_eq!(report.source, ReportSource::Prose);
        assert!(report.sections.is_empty());
        assert_eq!(report.raw_text, "Buying the dip is rarely a strategy.");
        assert!(!report.is_empty());
    }

    #[test]
    fn empty_payload_is_empty_report() {
        let report = normalize_agent_report(&json!({}));
        assert!(report.is_empty());
        assert_eq!(report.source, ReportSource::Prose);
    }

    #[test]
    fn bare_string_payload_is_prose() {
        let report = normalize_agent_report(&json!("just some text"));
        assert_eq!(report.source, ReportSource::Prose);
        assert_eq!(report.raw_text, "just some text");
    }

    #[test]
    fn idempotent() {
        let payload = json!({"analysis": "## A\none\n## B\ntwo"});
        assert_eq!(
            normalize_agent_report(&payload),
            normalize_agent_report(&payload)
        );
    }
}
