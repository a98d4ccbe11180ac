//! Text shown on candidate cards and banners.

use crate::session::Role;
use serde_json::Value;
use shiftdesk_protocol::recommend::{AiMeta, MatchTag};
use strum_macros::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum MatchBand {
    High,
    Medium,
    Low,
}

pub fn match_band(match_percent: f64) -> MatchBand {
    if match_percent >= 90.0 {
        MatchBand::High
    } else if match_percent >= 75.0 {
        MatchBand::Medium
    } else {
        MatchBand::Low
    }
}

/// Prints whole numbers without a fraction, like `87` rather than `87.0`.
pub fn number(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{:.0}", n)
    } else {
        n.to_string()
    }
}

/// Match percentages are shown exactly as received, including values over 100.
pub fn match_text(match_percent: f64) -> String {
    format!("{}%", number(match_percent))
}

pub fn ai_score_text(score: f64) -> String {
    format!("AI Score: {}%", number(score))
}

pub fn tag_label(role: Role, key: &str) -> &str {
    let known = match role {
        Role::Staff => match key {
            "profession_fit" => Some("Skill Fit"),
            "availability_fit" => Some("Availability"),
            "hospital_history" => Some("History"),
            "hospital_rating" => Some("Rating"),
            _ => None,
        },
        Role::Hospital => match key {
            "skill_match" => Some("Skill"),
            "availability_fit" => Some("Availability"),
            "past_shift_history" => Some("History"),
            "staff_reliability" => Some("Reliability"),
            _ => None,
        },
    };
    known.unwrap_or(key)
}

pub fn tag_text(role: Role, tag: &MatchTag) -> String {
    let value = match &tag.value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.as_f64().map(number).unwrap_or_else(|| n.to_string()),
        Value::Null => String::new(),
        other => other.to_string(),
    };
    format!("{}: {}", tag_label(role, &tag.key), value)
}

pub fn reason_text(role: Role, reason: Option<&str>) -> String {
    match reason.filter(|r| !r.trim().is_empty()) {
        Some(r) => r.to_string(),
        None => match role {
            Role::Staff => "Based on skill fit, availability, hospital history, and rating.".into(),
            Role::Hospital => "Strong role match, schedule fit, and reliable shift history.".into(),
        },
    }
}

/// `None` when there are no factors to show.
pub fn factors_text(details: &[String]) -> Option<String> {
    if details.is_empty() {
        None
    } else {
        Some(details.join(" | "))
    }
}

pub fn initials(name: &str) -> String {
    let name = if name.is_empty() { "NA" } else { name };
    name.chars().take(2).collect::<String>().to_uppercase()
}

/// Only shown when the AI pass actually re-ranked the list.
pub fn ai_banner(meta: Option<&AiMeta>) -> Option<String> {
    let meta = meta.filter(|m| m.applied)?;
    Some(format!(
        "AI enhanced ranking active ({}).",
        meta.model.as_deref().unwrap_or("unknown model")
    ))
}
