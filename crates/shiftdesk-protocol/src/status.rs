use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// Lifecycle of a job application as reported by the API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Applied,
    Shortlisted,
    Accepted,
    Rejected,
    Withdrawn,
    #[serde(other)]
    Unknown,
}

impl ApplicationStatus {
    /// Applications the staff member still has to act on or wait for.
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Applied | Self::Shortlisted)
    }

    /// A shortlisted application is a hospital invitation the staff member can approve.
    pub fn is_invitation(self) -> bool {
        self == Self::Shortlisted
    }
}

/// The two verdicts a hospital hands down on an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    Accepted,
    Rejected,
}

impl From<Decision> for ApplicationStatus {
    fn from(d: Decision) -> Self {
        match d {
            Decision::Accepted => ApplicationStatus::Accepted,
            Decision::Rejected => ApplicationStatus::Rejected,
        }
    }
}
