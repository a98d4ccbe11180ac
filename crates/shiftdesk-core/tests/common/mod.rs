#![allow(dead_code)]

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use shiftdesk_core::api::ShiftApi;
use shiftdesk_core::config::ClientConfig;
use shiftdesk_core::error::{DeskError, DeskResult};
use shiftdesk_core::notify::RecordingNotifier;
use shiftdesk_core::protocol::auth::*;
use shiftdesk_core::protocol::directory::*;
use shiftdesk_core::protocol::recommend::*;
use shiftdesk_core::protocol::schedule::*;
use shiftdesk_core::protocol::shifts::*;
use shiftdesk_core::session::{MemoryStore, Role, Session};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

/// A scripted reply: a JSON body or an API error.
#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Fail(u16, String),
}

/// One request the mock saw, in arrival order.
#[derive(Debug, Clone)]
pub struct Call {
    pub endpoint: &'static str,
    pub detail: String,
    pub body: Option<Value>,
}

impl Call {
    pub fn label(&self) -> String {
        format!("{} {}", self.endpoint, self.detail)
    }
}

/// In-process `ShiftApi`.
///
/// Replies are queued per `endpoint` or per `endpoint:detail` (the specific
/// key wins). Once a queue runs dry its last reply repeats. A held key
/// blocks its calls; each `release` lets one through.
#[derive(Default)]
pub struct MockApi {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    sticky: Mutex<HashMap<String, Reply>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, key: &str, body: Value) -> &Self {
        self.push(key, Reply::Json(body))
    }

    pub fn fail(&self, key: &str, status: u16, message: &str) -> &Self {
        self.push(key, Reply::Fail(status, message.to_string()))
    }

    fn push(&self, key: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry(key.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn hold(&self, key: &str) {
        self.gates
            .lock()
            .unwrap()
            .insert(key.to_string(), Arc::new(Notify::new()));
    }

    pub fn release(&self, key: &str) {
        if let Some(gate) = self.gates.lock().unwrap().get(key) {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn labels(&self) -> Vec<String> {
        self.calls().iter().map(Call::label).collect()
    }

    pub fn count(&self, endpoint: &str) -> usize {
        self.calls().iter().filter(|c| c.endpoint == endpoint).count()
    }

    /// Polls until a call with this label has arrived.
    pub async fn wait_for(&self, label: &str) {
        for _ in 0..400 {
            if self.labels().iter().any(|l| l == label) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        panic!("call {:?} never arrived; saw {:?}", label, self.labels());
    }

    fn next_reply(&self, endpoint: &str, detail: &str) -> Reply {
        let mut replies = self.replies.lock().unwrap();
        let mut sticky = self.sticky.lock().unwrap();
        let specific = format!("{}:{}", endpoint, detail);
        for key in [specific.as_str(), endpoint] {
            if let Some(reply) = replies.get_mut(key).and_then(VecDeque::pop_front) {
                sticky.insert(key.to_string(), reply.clone());
                return reply;
            }
            if let Some(reply) = sticky.get(key) {
                return reply.clone();
            }
        }
        Reply::Fail(500, format!("no scripted reply for {}", specific))
    }

    async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        detail: String,
        body: Option<Value>,
    ) -> DeskResult<T> {
        self.calls.lock().unwrap().push(Call {
            endpoint,
            detail: detail.clone(),
            body,
        });

        let specific = format!("{}:{}", endpoint, detail);
        let gate = {
            let gates = self.gates.lock().unwrap();
            gates.get(&specific).or_else(|| gates.get(endpoint)).cloned()
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        match self.next_reply(endpoint, &detail) {
            Reply::Json(value) => Ok(serde_json::from_value(value)?),
            Reply::Fail(status, message) => Err(DeskError::Api { status, message }),
        }
    }
}

fn body<T: Serialize>(value: &T) -> Option<Value> {
    serde_json::to_value(value).ok()
}

#[async_trait]
impl ShiftApi for MockApi {
    async fn register_staff(&self, req: &StaffRegisterRequest) -> DeskResult<StaffRegisterResponse> {
        self.call("register_staff", req.email.clone(), body(req)).await
    }

    async fn login_staff(&self, req: &LoginRequest) -> DeskResult<StaffLoginResponse> {
        self.call("login_staff", req.email.clone(), None).await
    }

    async fn staff_recommendations(
        &self,
        staff_id: u64,
        department: &str,
        limit: u32,
    ) -> DeskResult<StaffRecommendationsResponse> {
        let detail = format!("{}/{}/{}", staff_id, department, limit);
        self.call("staff_recommendations", detail, None).await
    }

    async fn staff_dashboard(&self, staff_id: u64) -> DeskResult<StaffDashboardResponse> {
        self.call("staff_dashboard", staff_id.to_string(), None).await
    }

    async fn staff_schedule(&self, staff_id: u64) -> DeskResult<ScheduleResponse> {
        self.call("staff_schedule", staff_id.to_string(), None).await
    }

    async fn apply(&self, job_id: u64, staff_id: u64) -> DeskResult<ApplyResponse> {
        self.call("apply", format!("{}/{}", job_id, staff_id), None)
            .await
    }

    async fn withdraw(&self, application_id: u64, staff_id: u64) -> DeskResult<WithdrawResponse> {
        self.call("withdraw", format!("{}/{}", application_id, staff_id), None)
            .await
    }

    async fn approve(&self, application_id: u64, staff_id: u64) -> DeskResult<ApproveResponse> {
        self.call("approve", format!("{}/{}", application_id, staff_id), None)
            .await
    }

    async fn staff_directory(&self, staff_id: u64, q: &str) -> DeskResult<StaffDirectoryResponse> {
        self.call("staff_directory", format!("{}/{}", staff_id, q), None)
            .await
    }

    async fn register_hospital(
        &self,
        req: &HospitalRegisterRequest,
    ) -> DeskResult<HospitalRegisterResponse> {
        self.call("register_hospital", req.email.clone(), body(req))
            .await
    }

    async fn login_hospital(&self, req: &LoginRequest) -> DeskResult<HospitalLoginResponse> {
        self.call("login_hospital", req.email.clone(), None).await
    }

    async fn meta_options(&self, hospital_id: u64) -> DeskResult<MetaOptionsResponse> {
        self.call("meta_options", hospital_id.to_string(), None).await
    }

    async fn shift_summary(&self, hospital_id: u64) -> DeskResult<ShiftSummaryResponse> {
        self.call("shift_summary", hospital_id.to_string(), None).await
    }

    async fn shift_detail(&self, job_id: u64) -> DeskResult<ShiftDetailResponse> {
        self.call("shift_detail", job_id.to_string(), None).await
    }

    async fn create_shift(&self, req: &CreateShiftRequest) -> DeskResult<CreateShiftResponse> {
        self.call("create_shift", req.hospital_id.to_string(), body(req))
            .await
    }

    async fn decide(&self, application_id: u64, req: &DecisionRequest) -> DeskResult<DecisionResponse> {
        self.call("decide", application_id.to_string(), body(req))
            .await
    }

    async fn assign(&self, job_id: u64, req: &AssignRequest) -> DeskResult<AssignResponse> {
        self.call("assign", format!("{}/{}", job_id, req.staff_id), body(req))
            .await
    }

    async fn department_recommendations(
        &self,
        hospital_id: u64,
        department: &str,
        limit: u32,
    ) -> DeskResult<GroupedRecommendationsResponse> {
        let detail = format!("{}/{}/{}", hospital_id, department, limit);
        self.call("department_recommendations", detail, None).await
    }

    async fn job_recommendations(&self, job_id: u64, limit: u32) -> DeskResult<JobRecommendationsResponse> {
        self.call("job_recommendations", format!("{}/{}", job_id, limit), None)
            .await
    }

    async fn hospital_directory(&self, hospital_id: u64, q: &str) -> DeskResult<HospitalDirectoryResponse> {
        self.call("hospital_directory", format!("{}/{}", hospital_id, q), None)
            .await
    }
}

/// Everything a coordinator needs, wired to a mock API.
pub struct Harness {
    pub api: Arc<MockApi>,
    pub notifier: Arc<RecordingNotifier>,
    pub session: Session,
    pub config: ClientConfig,
}

impl Harness {
    pub fn new(role: Role, id: Option<u64>) -> Self {
        let session = Session::new(Arc::new(MemoryStore::new()), role);
        if let Some(id) = id {
            session.set_id(id).unwrap();
        }
        Self {
            api: MockApi::new(),
            notifier: Arc::new(RecordingNotifier::new()),
            session,
            config: ClientConfig::default(),
        }
    }

    pub fn staff(id: u64) -> Self {
        Self::new(Role::Staff, Some(id))
    }

    pub fn hospital(id: u64) -> Self {
        Self::new(Role::Hospital, Some(id))
    }

    pub fn dyn_api(&self) -> Arc<dyn ShiftApi> {
        self.api.clone()
    }
}

// --- Canned payloads ---

pub fn job_match(job_id: u64, name: &str, pct: f64) -> Value {
    json!({
        "job_id": job_id,
        "name": name,
        "role": "Registered Nurse",
        "department": "ICU",
        "match": pct,
        "hourly_rate": "60.00",
        "currency": "USD",
        "tags": [{"key": "distance", "value": "2 km"}]
    })
}

pub fn staff_match(staff_id: u64, name: &str, pct: f64) -> Value {
    json!({
        "staff_id": staff_id,
        "name": name,
        "role": "Registered Nurse",
        "rating": 4.8,
        "completed_shifts": 12,
        "match": pct
    })
}

pub fn summary_card(job_id: u64, applicants: Value) -> Value {
    let count = applicants.as_array().map(Vec::len).unwrap_or(0);
    json!({
        "id": job_id,
        "title": "ICU Night",
        "time": "20:00 - 08:00",
        "capacity": 2,
        "status": "OPEN",
        "assigned_count": 0,
        "applicant_count": count,
        "assigned": [],
        "applicants": applicants
    })
}

pub fn applicant(staff_id: u64, application_id: u64, status: &str) -> Value {
    json!({
        "id": staff_id,
        "application_id": application_id,
        "name": format!("Staff {}", staff_id),
        "rating": 4.5,
        "shifts": 3,
        "status": status
    })
}

pub fn detail(job_id: u64, assigned: Value, applicants: Value) -> Value {
    json!({
        "job": {"id": job_id, "title": "ICU Night", "status": "OPEN", "required_staff_count": 2},
        "assigned": assigned,
        "applicants": applicants
    })
}

pub fn detail_applicant(staff_id: u64, application_id: u64, status: &str) -> Value {
    json!({
        "application_id": application_id,
        "staff_id": staff_id,
        "name": format!("Staff {}", staff_id),
        "shifts": 3,
        "status": status
    })
}
