//! Questionnaire to natural-language brief
//!
//! The section order is fixed: description, quality goals, business
//! drivers, technical rules, additional information. Downstream prompts
//! rely on it, and test fixtures compare the output verbatim.

use super::{AdditionalInfo, BusinessDrivers, QualityGoals, RequirementsInput, TechnicalRules};
use serde::Serialize;
use std::fmt;

pub const NOT_SPECIFIED: &str = "Not specified";
pub const NONE_PROVIDED: &str = "None provided";

/// Deterministic text rendering of a [`RequirementsInput`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FormattedRequirements(String);

impl FormattedRequirements {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for FormattedRequirements {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for FormattedRequirements {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Render the questionnaire as a brief
pub fn format_requirements(input: &RequirementsInput) -> FormattedRequirements {
    let sections = [
        format!(
            "PROJECT DESCRIPTION:\n{}",
            text_or(Some(&input.project_description), NOT_SPECIFIED)
        ),
        section("QUALITY GOALS & PERFORMANCE REQUIREMENTS:", &quality_items(&input.quality_goals)),
        section("BUSINESS DRIVERS & CONSTRAINTS:", &business_items(&input.business_drivers)),
        section("TECHNICAL RULES & CONSTRAINTS:", &technical_items(&input.technical_rules)),
        format!("ADDITIONAL INFORMATION:\n{}", additional(&input.additional_info)),
    ];

    FormattedRequirements(sections.join("\n\n").trim().to_string())
}

fn section(heading: &str, items: &[(&str, String)]) -> String {
    let mut out = String::from(heading);
    for (label, value) in items {
        out.push_str("\n- ");
        out.push_str(label);
        out.push_str(": ");
        out.push_str(value);
    }
    out
}

fn quality_items(q: &QualityGoals) -> Vec<(&'static str, String)> {
    vec![
        ("Response Time", text(&q.response_time)),
        ("Throughput", text(&q.throughput)),
        (
            "Expected Users",
            q.expected_users.map_or_else(|| NOT_SPECIFIED.to_string(), |n| n.to_string()),
        ),
        ("Data Volume", text(&q.data_volume)),
        ("Growth Rate", text(&q.growth_rate)),
        ("Uptime", text(&q.uptime)),
        ("Downtime Tolerance", text(&q.downtime_tolerance)),
        ("Disaster Recovery", text(&q.disaster_recovery)),
        ("Security Needs", list(&q.security_needs)),
        ("Authentication Needs", text(&q.auth_needs)),
        ("Deploy Frequency", text(&q.deploy_frequency)),
        ("Team Structure", text(&q.team_structure)),
        ("Audience", text(&q.audience)),
        ("Accessibility Needs", text(&q.accessibility_needs)),
    ]
}

fn business_items(b: &BusinessDrivers) -> Vec<(&'static str, String)> {
    vec![
        ("Primary Goal", text(&b.primary_goal)),
        ("Development Budget", text(&b.dev_budget)),
        ("Operations Budget", text(&b.ops_budget)),
        ("Launch Date", text(&b.launch_date)),
        ("Geography", text(&b.geography)),
    ]
}

fn technical_items(t: &TechnicalRules) -> Vec<(&'static str, String)> {
    vec![
        ("Mandatory Technologies", list(&t.mandatory_tech)),
        ("Team Skills", text(&t.team_skills)),
        ("Required Integrations", text(&t.integrations)),
        ("Regulations", text(&t.regulations)),
        ("Data Residency", text(&t.data_residency)),
    ]
}

fn additional(info: &AdditionalInfo) -> String {
    text_or(info.additional_requirements.as_ref(), NONE_PROVIDED)
}

fn text(value: &Option<String>) -> String {
    text_or(value.as_ref(), NOT_SPECIFIED)
}

fn text_or(value: Option<&String>, fallback: &str) -> String {
    value
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or(fallback)
        .to_string()
}

fn list(values: &[String]) -> String {
    let items: Vec<&str> = values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()).collect();
    if items.is_empty() { NOT_SPECIFIED.to_string() } else { items.join(", ") }
}
