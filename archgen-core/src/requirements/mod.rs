//! Questionnaire model
//!
//! Mirrors the JSON the questionnaire front end submits (`camelCase`).
//! Every optional field carries its default, applied while deserializing,
//! so the formatter never sees a hole. `null` on a text field means "no
//! answer" and renders as `Not specified`.

pub mod formatter;

pub use formatter::{FormattedRequirements, format_requirements};

use serde::{Deserialize, Deserializer, Serialize};

/// The questionnaire payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementsInput {
    pub project_description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub quality_goals: QualityGoals,
    #[serde(default, deserialize_with = "null_as_default")]
    pub business_drivers: BusinessDrivers,
    #[serde(default, deserialize_with = "null_as_default")]
    pub technical_rules: TechnicalRules,
    #[serde(default, deserialize_with = "null_as_default")]
    pub additional_info: AdditionalInfo,
}

impl RequirementsInput {
    /// Questionnaire with only the description answered
    pub fn new(project_description: impl Into<String>) -> Self {
        Self {
            project_description: project_description.into(),
            quality_goals: QualityGoals::default(),
            business_drivers: BusinessDrivers::default(),
            technical_rules: TechnicalRules::default(),
            additional_info: AdditionalInfo::default(),
        }
    }
}

/// Performance, reliability and operational targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QualityGoals {
    pub response_time: Option<String>,
    pub throughput: Option<String>,
    pub expected_users: Option<u64>,
    pub data_volume: Option<String>,
    pub growth_rate: Option<String>,
    pub uptime: Option<String>,
    pub downtime_tolerance: Option<String>,
    pub disaster_recovery: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub security_needs: Vec<String>,
    pub auth_needs: Option<String>,
    pub deploy_frequency: Option<String>,
    pub team_structure: Option<String>,
    pub audience: Option<String>,
    pub accessibility_needs: Option<String>,
}

impl Default for QualityGoals {
    fn default() -> Self {
        Self {
            response_time: Some(String::new()),
            throughput: Some(String::new()),
            expected_users: Some(1),
            data_volume: Some(String::new()),
            growth_rate: Some(String::new()),
            uptime: Some("standard".to_string()),
            downtime_tolerance: Some(String::new()),
            disaster_recovery: Some(String::new()),
            security_needs: Vec::new(),
            auth_needs: Some(String::new()),
            deploy_frequency: Some("monthly".to_string()),
            team_structure: Some("single".to_string()),
            audience: Some("public".to_string()),
            accessibility_needs: Some(String::new()),
        }
    }
}

/// Budget, schedule and market constraints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessDrivers {
    pub primary_goal: Option<String>,
    pub dev_budget: Option<String>,
    pub ops_budget: Option<String>,
    pub launch_date: Option<String>,
    pub geography: Option<String>,
}

impl Default for BusinessDrivers {
    fn default() -> Self {
        Self {
            primary_goal: None,
            dev_budget: Some(String::new()),
            ops_budget: Some(String::new()),
            launch_date: Some(String::new()),
            geography: Some("single".to_string()),
        }
    }
}

/// Technology and compliance rules the design must respect
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TechnicalRules {
    #[serde(deserialize_with = "null_as_default")]
    pub mandatory_tech: Vec<String>,
    pub team_skills: Option<String>,
    pub integrations: Option<String>,
    pub regulations: Option<String>,
    pub data_residency: Option<String>,
}

impl Default for TechnicalRules {
    fn default() -> Self {
        Self {
            mandatory_tech: Vec::new(),
            team_skills: Some(String::new()),
            integrations: Some(String::new()),
            regulations: Some(String::new()),
            data_residency: Some("none".to_string()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdditionalInfo {
    pub additional_requirements: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
