use crate::status::{ApplicationStatus, Decision};
use crate::{ApplicationId, HospitalId, JobId, StaffId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NamedRef {
    pub id: u64,
    pub name: String,
}

/// Departments and professions a hospital may post shifts under.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct MetaOptionsResponse {
    #[serde(default)]
    pub hospital: Option<NamedRef>,
    #[serde(default)]
    pub departments: Vec<NamedRef>,
    #[serde(default)]
    pub professions: Vec<NamedRef>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AssignedStaff {
    pub id: StaffId,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub time: String,
}

/// An applicant row. `id` is the staff id; older servers omit it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Applicant {
    #[serde(default)]
    pub id: Option<StaffId>,
    pub application_id: ApplicationId,
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub shifts: u32,
    #[serde(default)]
    pub avatar: Option<String>,
    pub status: ApplicationStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShiftSummary {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub capacity: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub assigned_count: u32,
    #[serde(default)]
    pub applicant_count: u32,
    #[serde(default)]
    pub assigned: Vec<AssignedStaff>,
    #[serde(default)]
    pub applicants: Vec<Applicant>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ShiftSummaryResponse {
    #[serde(default)]
    pub results: Vec<ShiftSummary>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ShiftJob {
    pub id: JobId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub required_staff_count: u32,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub shift_window: String,
    #[serde(default)]
    pub shift_start: Option<String>,
    #[serde(default)]
    pub shift_end: Option<String>,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub profession: Option<String>,
    #[serde(default)]
    pub hourly_rate: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DetailAssignment {
    pub id: u64,
    pub staff_id: StaffId,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub assigned_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DetailApplicant {
    pub application_id: ApplicationId,
    pub staff_id: StaffId,
    pub name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub shifts: u32,
    #[serde(default)]
    pub avatar: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub applied_at: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ShiftDetailResponse {
    pub job: ShiftJob,
    #[serde(default)]
    pub assigned: Vec<DetailAssignment>,
    #[serde(default)]
    pub applicants: Vec<DetailApplicant>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateShiftRequest {
    pub hospital_id: HospitalId,
    pub department_id: u64,
    pub profession_id: u64,
    pub required_staff_count: u32,
    pub shift_start: String,
    pub shift_end: String,
    pub description: String,
    pub hourly_rate: String,
    pub currency: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CreateShiftResponse {
    pub id: JobId,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DecisionRequest {
    pub status: Decision,
    #[serde(default)]
    pub note: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct DecisionResponse {
    #[serde(default)]
    pub message: Option<String>,
    pub status: ApplicationStatus,
}

/// Shared by invite (recommendations page) and accept-then-assign (shift manager).
/// `assigned_by_user_id` names a user account, not a hospital. Null when no account is known.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AssignRequest {
    pub staff_id: StaffId,
    pub assigned_by_user_id: Option<UserId>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AssignResponse {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub application_id: Option<ApplicationId>,
    #[serde(default)]
    pub application_status: Option<ApplicationStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decision_request_wire_shape() {
        let body = DecisionRequest {
            status: Decision::Accepted,
            note: String::new(),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"status": "ACCEPTED", "note": ""})
        );
    }

    #[test]
    fn test_assign_request_sends_null_actor() {
        let body = AssignRequest {
            staff_id: 7,
            assigned_by_user_id: None,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"staff_id": 7, "assigned_by_user_id": null})
        );
    }

    #[test]
    fn test_assign_request_actor_is_a_user_uuid() {
        let body = AssignRequest {
            staff_id: 7,
            assigned_by_user_id: Some("5f0c6a2e-8d1b-4c3e-9a7f-2b4d6e8f0a1c".into()),
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap()["assigned_by_user_id"],
            json!("5f0c6a2e-8d1b-4c3e-9a7f-2b4d6e8f0a1c")
        );
    }

    #[test]
    fn test_applicant_without_staff_id() {
        let row: Applicant = serde_json::from_value(json!({
            "application_id": 5, "name": "Ana", "status": "APPLIED"
        }))
        .unwrap();
        assert_eq!(row.id, None);
        assert!(row.status.is_pending());
    }
}
