use crate::{JobId, StaffId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One explanatory factor behind a match score, e.g. `{"key": "skill_match", "value": 92}`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MatchTag {
    pub key: String,
    #[serde(default)]
    pub value: Value,
}

/// Describes whether the AI re-ranking pass ran for a response.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AiMeta {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub applied: bool,
    #[serde(default)]
    pub fallback_reason: Option<String>,
}

/// A job recommended to a staff member.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JobMatch {
    pub job_id: JobId,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub department: String,
    #[serde(rename = "match")]
    pub match_percent: f64,
    #[serde(default)]
    pub hourly_rate: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub tags: Vec<MatchTag>,
    #[serde(default)]
    pub ai_score: Option<f64>,
    #[serde(default)]
    pub ai_reason_short: Option<String>,
    #[serde(default)]
    pub ai_reason_details: Vec<String>,
    #[serde(default)]
    pub ai_confidence: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StaffRecommendationsResponse {
    #[serde(default)]
    pub results: Vec<JobMatch>,
    #[serde(default)]
    pub baseline_results: Option<Vec<JobMatch>>,
    #[serde(default)]
    pub ai_meta: Option<AiMeta>,
    #[serde(default)]
    pub recommendation_engine: Option<String>,
}

/// A staff member recommended for a hospital's open shift.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StaffMatch {
    pub staff_id: StaffId,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub completed_shifts: Option<u32>,
    #[serde(rename = "match")]
    pub match_percent: f64,
    #[serde(default)]
    pub tags: Vec<MatchTag>,
    #[serde(default)]
    pub ai_score: Option<f64>,
    #[serde(default)]
    pub ai_reason_short: Option<String>,
    #[serde(default)]
    pub ai_reason_details: Vec<String>,
    #[serde(default)]
    pub ai_confidence: Option<String>,
}

/// Top staff for the latest open job in one department. `job_id` is null when the
/// department has no open shift.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DepartmentGroup {
    pub department: String,
    #[serde(default)]
    pub job_id: Option<JobId>,
    #[serde(default)]
    pub results: Vec<StaffMatch>,
    #[serde(default)]
    pub ai_meta: Option<AiMeta>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GroupedRecommendationsResponse {
    #[serde(default)]
    pub results: Vec<DepartmentGroup>,
    #[serde(default)]
    pub ai_meta: Option<AiMeta>,
    #[serde(default)]
    pub recommendation_engine: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JobRecommendationsResponse {
    pub job_id: JobId,
    #[serde(default)]
    pub results: Vec<StaffMatch>,
    #[serde(default)]
    pub ai_meta: Option<AiMeta>,
    #[serde(default)]
    pub recommendation_engine: Option<String>,
}
