use super::ActionKey;
use shiftdesk_protocol::recommend::{AiMeta, DepartmentGroup, JobMatch, MatchTag, StaffMatch};
use shiftdesk_protocol::{JobId, StaffId};

pub const NO_MATCHING_CANDIDATES: &str = "No matching staff found for this department.";
pub const NO_OPEN_SHIFT: &str =
    "No open shift in this department yet. Create one to get top 6 staff.";

/// One ranked candidate as shown on a card. Built fresh from every response.
///
/// On the staff side the subject is the logged-in staff member and the row
/// describes a job. On the hospital side the row describes a staff member.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRow {
    pub job_id: JobId,
    pub subject_id: StaffId,
    pub display_name: String,
    pub role_label: String,
    /// Exactly as the server sent it.
    pub match_percent: f64,
    pub ai_score: Option<f64>,
    pub ai_reason_short: Option<String>,
    pub ai_reason_details: Vec<String>,
    pub ai_confidence: Option<String>,
    pub tags: Vec<MatchTag>,
    pub department: Option<String>,
    pub hourly_rate: Option<String>,
    pub currency: Option<String>,
    pub rating: Option<f64>,
    pub completed_shifts: Option<u32>,
}

impl CandidateRow {
    pub fn from_job_match(row: JobMatch, staff_id: StaffId) -> Self {
        Self {
            job_id: row.job_id,
            subject_id: staff_id,
            display_name: row.name,
            role_label: row.role,
            match_percent: row.match_percent,
            ai_score: row.ai_score,
            ai_reason_short: row.ai_reason_short,
            ai_reason_details: row.ai_reason_details,
            ai_confidence: row.ai_confidence,
            tags: row.tags,
            department: Some(row.department),
            hourly_rate: row.hourly_rate,
            currency: row.currency,
            rating: None,
            completed_shifts: None,
        }
    }

    pub fn from_staff_match(row: StaffMatch, job_id: JobId) -> Self {
        Self {
            job_id,
            subject_id: row.staff_id,
            display_name: row.name,
            role_label: row.role,
            match_percent: row.match_percent,
            ai_score: row.ai_score,
            ai_reason_short: row.ai_reason_short,
            ai_reason_details: row.ai_reason_details,
            ai_confidence: row.ai_confidence,
            tags: row.tags,
            department: None,
            hourly_rate: None,
            currency: None,
            rating: row.rating,
            completed_shifts: row.completed_shifts,
        }
    }

    pub fn key(&self) -> ActionKey {
        ActionKey::new(self.job_id, self.subject_id)
    }
}

/// What a department group is ranked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupAnchor {
    Job(JobId),
    /// The department has no open shift, so nothing can be ranked.
    NoOpenShift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStatus {
    Populated,
    NoMatchingCandidates,
    NoOpenShift,
}

impl GroupStatus {
    pub fn placeholder(self) -> Option<&'static str> {
        match self {
            GroupStatus::Populated => None,
            GroupStatus::NoMatchingCandidates => Some(NO_MATCHING_CANDIDATES),
            GroupStatus::NoOpenShift => Some(NO_OPEN_SHIFT),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CandidateGroup {
    pub department: String,
    pub anchor: GroupAnchor,
    pub rows: Vec<CandidateRow>,
    pub ai_meta: Option<AiMeta>,
}

impl CandidateGroup {
    pub fn from_department(group: DepartmentGroup) -> Self {
        let anchor = match group.job_id {
            Some(id) => GroupAnchor::Job(id),
            None => GroupAnchor::NoOpenShift,
        };
        let rows = match anchor {
            GroupAnchor::Job(job_id) => group
                .results
                .into_iter()
                .map(|r| CandidateRow::from_staff_match(r, job_id))
                .collect(),
            GroupAnchor::NoOpenShift => Vec::new(),
        };
        Self {
            department: group.department,
            anchor,
            rows,
            ai_meta: group.ai_meta,
        }
    }

    /// No open shift wins over an empty candidate list.
    pub fn status(&self) -> GroupStatus {
        match self.anchor {
            GroupAnchor::NoOpenShift => GroupStatus::NoOpenShift,
            GroupAnchor::Job(_) if self.rows.is_empty() => GroupStatus::NoMatchingCandidates,
            GroupAnchor::Job(_) => GroupStatus::Populated,
        }
    }

    pub fn job_id(&self) -> Option<JobId> {
        match self.anchor {
            GroupAnchor::Job(id) => Some(id),
            GroupAnchor::NoOpenShift => None,
        }
    }
}
