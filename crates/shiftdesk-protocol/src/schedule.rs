use crate::status::ApplicationStatus;
use crate::{ApplicationId, JobId, StaffId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Body for staff-side actions: apply, withdraw, approve.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct StaffActionRequest {
    pub staff_id: StaffId,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApplyResponse {
    pub application_id: ApplicationId,
    pub status: ApplicationStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct WithdrawResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub status: ApplicationStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ApproveResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub assignment_id: Option<u64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ConfirmedShift {
    pub assignment_id: u64,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub pay: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PendingApplication {
    pub application_id: ApplicationId,
    pub job_id: JobId,
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub pay: Option<String>,
    pub status: ApplicationStatus,
}

/// A hospital's confirmed shifts and open applications for one staff member.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScheduleGroup {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub last_activity: Option<String>,
    #[serde(default)]
    pub total_active: u32,
    #[serde(default)]
    pub confirmed_shifts: Vec<ConfirmedShift>,
    #[serde(default)]
    pub pending_applications: Vec<PendingApplication>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ScheduleResponse {
    #[serde(default)]
    pub results: Vec<ScheduleGroup>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecentActivity {
    pub application_id: ApplicationId,
    pub title: String,
    #[serde(default)]
    pub hospital: String,
    #[serde(default)]
    pub department: String,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub time: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct StaffDashboardResponse {
    #[serde(default)]
    pub greeting_name: String,
    #[serde(default)]
    pub pending_applications: u32,
    #[serde(default)]
    pub accepted_shifts: u32,
    #[serde(default)]
    pub completed_shifts: u32,
    /// Hours worked per weekday, keyed `Mon`..`Sun`.
    #[serde(default)]
    pub weekly_performance_hours: BTreeMap<String, f64>,
    #[serde(default)]
    pub recent_activity: Vec<RecentActivity>,
}
