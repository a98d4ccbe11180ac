use super::ShiftApi;
use crate::error::{DeskError, DeskResult};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shiftdesk_protocol::auth::{
    HospitalLoginResponse, HospitalRegisterRequest, HospitalRegisterResponse, LoginRequest,
    StaffLoginResponse, StaffRegisterRequest, StaffRegisterResponse,
};
use shiftdesk_protocol::directory::{HospitalDirectoryResponse, StaffDirectoryResponse};
use shiftdesk_protocol::error::ErrorBody;
use shiftdesk_protocol::recommend::{
    GroupedRecommendationsResponse, JobRecommendationsResponse, StaffRecommendationsResponse,
};
use shiftdesk_protocol::schedule::{
    ApplyResponse, ApproveResponse, ScheduleResponse, StaffActionRequest, StaffDashboardResponse,
    WithdrawResponse,
};
use shiftdesk_protocol::shifts::{
    AssignRequest, AssignResponse, CreateShiftRequest, CreateShiftResponse, DecisionRequest,
    DecisionResponse, MetaOptionsResponse, ShiftDetailResponse, ShiftSummaryResponse,
};
use shiftdesk_protocol::{ApplicationId, HospitalId, JobId, StaffId};
use tracing::{debug, warn};

/// Joins `path` onto `base`. Absolute `http(s)://` paths pass through untouched.
pub fn build_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let base = base.strip_suffix('/').unwrap_or(base);
    if path.starts_with('/') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}

/// [`ShiftApi`] over HTTP. No timeouts and no retries.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

type Query<'a> = [(&'a str, String)];

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn request_json<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &Query<'_>,
        body: Option<&B>,
    ) -> DeskResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = build_url(&self.base_url, path);
        debug!("➡️  {} {}", method, url);

        let mut req = self.client.request(method, &url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let resp = req.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|b| b.text().map(str::to_string))
                .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()));
            warn!("⚠️  {} returned {}: {}", url, status, message);
            return Err(DeskError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query<'_>) -> DeskResult<T> {
        self.request_json::<T, ()>(Method::GET, path, query, None)
            .await
    }

    async fn post<T, B>(&self, path: &str, body: &B) -> DeskResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request_json(Method::POST, path, &[], Some(body)).await
    }
}

#[async_trait]
impl ShiftApi for HttpApi {
    async fn register_staff(&self, req: &StaffRegisterRequest) -> DeskResult<StaffRegisterResponse> {
        self.post("/api/staff/auth/register/", req).await
    }

    async fn login_staff(&self, req: &LoginRequest) -> DeskResult<StaffLoginResponse> {
        self.post("/api/staff/auth/login/", req).await
    }

    async fn staff_recommendations(
        &self,
        staff_id: StaffId,
        department: &str,
        limit: u32,
    ) -> DeskResult<StaffRecommendationsResponse> {
        self.get(
            "/api/staff/recommendations/",
            &[
                ("staff_id", staff_id.to_string()),
                ("department", department.to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn staff_dashboard(&self, staff_id: StaffId) -> DeskResult<StaffDashboardResponse> {
        self.get("/api/staff/dashboard/", &[("staff_id", staff_id.to_string())])
            .await
    }

    async fn staff_schedule(&self, staff_id: StaffId) -> DeskResult<ScheduleResponse> {
        self.get("/api/staff/schedule/", &[("staff_id", staff_id.to_string())])
            .await
    }

    async fn apply(&self, job_id: JobId, staff_id: StaffId) -> DeskResult<ApplyResponse> {
        self.post(
            &format!("/api/staff/jobs/{}/apply/", job_id),
            &StaffActionRequest { staff_id },
        )
        .await
    }

    async fn withdraw(
        &self,
        application_id: ApplicationId,
        staff_id: StaffId,
    ) -> DeskResult<WithdrawResponse> {
        self.post(
            &format!("/api/staff/applications/{}/withdraw/", application_id),
            &StaffActionRequest { staff_id },
        )
        .await
    }

    async fn approve(
        &self,
        application_id: ApplicationId,
        staff_id: StaffId,
    ) -> DeskResult<ApproveResponse> {
        self.post(
            &format!("/api/staff/applications/{}/approve/", application_id),
            &StaffActionRequest { staff_id },
        )
        .await
    }

    async fn staff_directory(
        &self,
        staff_id: StaffId,
        q: &str,
    ) -> DeskResult<StaffDirectoryResponse> {
        self.get(
            "/api/staff/search/directory/",
            &[("staff_id", staff_id.to_string()), ("q", q.to_string())],
        )
        .await
    }

    async fn register_hospital(
        &self,
        req: &HospitalRegisterRequest,
    ) -> DeskResult<HospitalRegisterResponse> {
        self.post("/api/hospital/auth/register/", req).await
    }

    async fn login_hospital(&self, req: &LoginRequest) -> DeskResult<HospitalLoginResponse> {
        self.post("/api/hospital/auth/login/", req).await
    }

    async fn meta_options(&self, hospital_id: HospitalId) -> DeskResult<MetaOptionsResponse> {
        self.get(
            "/api/hospital/meta/options/",
            &[("hospital_id", hospital_id.to_string())],
        )
        .await
    }

    async fn shift_summary(&self, hospital_id: HospitalId) -> DeskResult<ShiftSummaryResponse> {
        self.get(
            "/api/hospital/shifts/summary/",
            &[("hospital_id", hospital_id.to_string())],
        )
        .await
    }

    async fn shift_detail(&self, job_id: JobId) -> DeskResult<ShiftDetailResponse> {
        self.get(&format!("/api/hospital/shifts/{}/manage/", job_id), &[])
            .await
    }

    async fn create_shift(&self, req: &CreateShiftRequest) -> DeskResult<CreateShiftResponse> {
        self.post("/api/hospital/shifts/", req).await
    }

    async fn decide(
        &self,
        application_id: ApplicationId,
        req: &DecisionRequest,
    ) -> DeskResult<DecisionResponse> {
        self.post(
            &format!("/api/hospital/applications/{}/decision/", application_id),
            req,
        )
        .await
    }

    async fn assign(&self, job_id: JobId, req: &AssignRequest) -> DeskResult<AssignResponse> {
        self.post(&format!("/api/hospital/shifts/{}/assign/", job_id), req)
            .await
    }

    async fn department_recommendations(
        &self,
        hospital_id: HospitalId,
        department: &str,
        limit: u32,
    ) -> DeskResult<GroupedRecommendationsResponse> {
        let mut query = vec![
            ("limit", limit.to_string()),
            ("hospital_id", hospital_id.to_string()),
        ];
        if !department.is_empty() {
            query.push(("department", department.to_string()));
        }
        self.get("/api/hospital/recommendations/", &query).await
    }

    async fn job_recommendations(
        &self,
        job_id: JobId,
        limit: u32,
    ) -> DeskResult<JobRecommendationsResponse> {
        self.get(
            "/api/hospital/recommendations/",
            &[("limit", limit.to_string()), ("job_id", job_id.to_string())],
        )
        .await
    }

    async fn hospital_directory(
        &self,
        hospital_id: HospitalId,
        q: &str,
    ) -> DeskResult<HospitalDirectoryResponse> {
        self.get(
            "/api/hospital/search/directory/",
            &[("hospital_id", hospital_id.to_string()), ("q", q.to_string())],
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::build_url;

    #[test]
    fn test_build_url_normalizes_slashes() {
        assert_eq!(
            build_url("http://api.local/", "api/staff/schedule/"),
            "http://api.local/api/staff/schedule/"
        );
        assert_eq!(
            build_url("http://api.local", "/api/x/"),
            "http://api.local/api/x/"
        );
    }

    #[test]
    fn test_absolute_path_bypasses_base() {
        assert_eq!(
            build_url("http://api.local", "https://other.host/api/x/"),
            "https://other.host/api/x/"
        );
    }
}
