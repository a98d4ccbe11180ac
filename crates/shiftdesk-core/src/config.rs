use crate::error::{DeskError, DeskResult};
use clap::{parser::ValueSource, ArgMatches, Args, ValueEnum};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use strum_macros::Display;

/// What happens to the applied/invited overlay when the department filter changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RefilterPolicy {
    Keep,
    Clear,
}

/// How overlapping list loads resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum StalePolicy {
    /// Whichever response resolves last is shown.
    LastWriteWins,
    /// Responses whose request generation is no longer current are dropped.
    DiscardStale,
}

/// Who may empty the processing slot when an action finishes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Display,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SlotRelease {
    /// Only the key still holding the slot clears it.
    #[default]
    Owner,
    /// Any finishing action clears the slot, even one that was taken over.
    Always,
}

#[derive(Args, Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    #[arg(long, env = "SHIFTDESK_API_BASE_URL", default_value = "http://localhost:8000")]
    pub api_base_url: String,

    #[arg(long, default_value_t = 6)]
    pub recommendation_limit: u32,

    #[arg(long, value_enum, default_value_t = RefilterPolicy::Keep)]
    pub staff_refilter: RefilterPolicy,

    #[arg(long, value_enum, default_value_t = RefilterPolicy::Clear)]
    pub hospital_refilter: RefilterPolicy,

    #[arg(long, value_enum, default_value_t = StalePolicy::LastWriteWins)]
    pub stale_responses: StalePolicy,

    #[arg(long, value_enum, default_value_t = SlotRelease::Owner)]
    pub slot_release: SlotRelease,

    #[arg(long, default_value_t = 250)]
    pub search_debounce_ms: u64,

    #[arg(long, default_value = "shiftdesk-session.json")]
    pub session_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000".to_string(),
            recommendation_limit: 6,
            staff_refilter: RefilterPolicy::Keep,
            hospital_refilter: RefilterPolicy::Clear,
            stale_responses: StalePolicy::LastWriteWins,
            slot_release: SlotRelease::Owner,
            search_debounce_ms: 250,
            session_file: PathBuf::from("shiftdesk-session.json"),
        }
    }
}

impl ClientConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> DeskResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| DeskError::Config(format!("Failed to read {:?}: {}", path, e)))?;
        serde_json::from_str(&content)
            .map_err(|e| DeskError::Config(format!("Failed to parse {:?}: {}", path, e)))
    }

    /// Copies every field the user set explicitly (flag or env) over the file values.
    pub fn merge_from_cli(&mut self, cli: &ClientConfig, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches!(
                    matches.value_source(stringify!($field)),
                    Some(ValueSource::CommandLine) | Some(ValueSource::EnvVariable)
                ) {
                    self.$field = cli.$field.clone();
                }
            };
        }

        update_if_present!(api_base_url);
        update_if_present!(recommendation_limit);
        update_if_present!(staff_refilter);
        update_if_present!(hospital_refilter);
        update_if_present!(stale_responses);
        update_if_present!(slot_release);
        update_if_present!(search_debounce_ms);
        update_if_present!(session_file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, FromArgMatches, Parser};

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        config: ClientConfig,
    }

    #[test]
    fn test_defaults_match_documented_values() {
        let c = ClientConfig::default();
        assert_eq!(c.recommendation_limit, 6);
        assert_eq!(c.staff_refilter, RefilterPolicy::Keep);
        assert_eq!(c.hospital_refilter, RefilterPolicy::Clear);
        assert_eq!(c.stale_responses, StalePolicy::LastWriteWins);
        assert_eq!(c.slot_release, SlotRelease::Owner);
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let c: ClientConfig =
            serde_json::from_str(r#"{"stale_responses": "discard-stale", "slot_release": "always", "recommendation_limit": 10}"#)
                .unwrap();
        assert_eq!(c.stale_responses, StalePolicy::DiscardStale);
        assert_eq!(c.slot_release, SlotRelease::Always);
        assert_eq!(c.recommendation_limit, 10);
        assert_eq!(c.search_debounce_ms, 250);
    }

    #[test]
    fn test_only_explicit_flags_override_file() {
        let matches = Harness::command()
            .try_get_matches_from(["shiftdesk", "--recommendation-limit", "3"])
            .unwrap();
        let cli = Harness::from_arg_matches(&matches).unwrap().config;

        let mut from_file = ClientConfig {
            staff_refilter: RefilterPolicy::Clear,
            recommendation_limit: 12,
            ..Default::default()
        };
        from_file.merge_from_cli(&cli, &matches);

        assert_eq!(from_file.recommendation_limit, 3);
        assert_eq!(from_file.staff_refilter, RefilterPolicy::Clear);
    }
}
