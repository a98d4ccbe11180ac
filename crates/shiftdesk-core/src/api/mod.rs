//! Typed access to the shift-management REST API.
//!
//! Coordinators only see [`ShiftApi`], so tests can script responses and
//! interleavings without a server.

mod http;

pub use self::http::{build_url, HttpApi};

use crate::error::DeskResult;
use async_trait::async_trait;
use shiftdesk_protocol::auth::{
    HospitalLoginResponse, HospitalRegisterRequest, HospitalRegisterResponse, LoginRequest,
    StaffLoginResponse, StaffRegisterRequest, StaffRegisterResponse,
};
use shiftdesk_protocol::directory::{HospitalDirectoryResponse, StaffDirectoryResponse};
use shiftdesk_protocol::recommend::{
    GroupedRecommendationsResponse, JobRecommendationsResponse, StaffRecommendationsResponse,
};
use shiftdesk_protocol::schedule::{
    ApplyResponse, ApproveResponse, ScheduleResponse, StaffDashboardResponse, WithdrawResponse,
};
use shiftdesk_protocol::shifts::{
    AssignRequest, AssignResponse, CreateShiftRequest, CreateShiftResponse, DecisionRequest,
    DecisionResponse, MetaOptionsResponse, ShiftDetailResponse, ShiftSummaryResponse,
};
use shiftdesk_protocol::{ApplicationId, HospitalId, JobId, StaffId};

/// Department filter value that asks for every department at once.
pub const ALL_DEPARTMENTS: &str = "All";

#[async_trait]
pub trait ShiftApi: Send + Sync {
    // --- Staff ---
    async fn register_staff(&self, req: &StaffRegisterRequest) -> DeskResult<StaffRegisterResponse>;
    async fn login_staff(&self, req: &LoginRequest) -> DeskResult<StaffLoginResponse>;
    async fn staff_recommendations(
        &self,
        staff_id: StaffId,
        department: &str,
        limit: u32,
    ) -> DeskResult<StaffRecommendationsResponse>;
    async fn staff_dashboard(&self, staff_id: StaffId) -> DeskResult<StaffDashboardResponse>;
    async fn staff_schedule(&self, staff_id: StaffId) -> DeskResult<ScheduleResponse>;
    async fn apply(&self, job_id: JobId, staff_id: StaffId) -> DeskResult<ApplyResponse>;
    async fn withdraw(
        &self,
        application_id: ApplicationId,
        staff_id: StaffId,
    ) -> DeskResult<WithdrawResponse>;
    async fn approve(
        &self,
        application_id: ApplicationId,
        staff_id: StaffId,
    ) -> DeskResult<ApproveResponse>;
    async fn staff_directory(&self, staff_id: StaffId, q: &str)
        -> DeskResult<StaffDirectoryResponse>;

    // --- Hospital ---
    async fn register_hospital(
        &self,
        req: &HospitalRegisterRequest,
    ) -> DeskResult<HospitalRegisterResponse>;
    async fn login_hospital(&self, req: &LoginRequest) -> DeskResult<HospitalLoginResponse>;
    async fn meta_options(&self, hospital_id: HospitalId) -> DeskResult<MetaOptionsResponse>;
    async fn shift_summary(&self, hospital_id: HospitalId) -> DeskResult<ShiftSummaryResponse>;
    async fn shift_detail(&self, job_id: JobId) -> DeskResult<ShiftDetailResponse>;
    async fn create_shift(&self, req: &CreateShiftRequest) -> DeskResult<CreateShiftResponse>;
    async fn decide(
        &self,
        application_id: ApplicationId,
        req: &DecisionRequest,
    ) -> DeskResult<DecisionResponse>;
    async fn assign(&self, job_id: JobId, req: &AssignRequest) -> DeskResult<AssignResponse>;
    /// One group per department, each anchored on that department's latest open job.
    async fn department_recommendations(
        &self,
        hospital_id: HospitalId,
        department: &str,
        limit: u32,
    ) -> DeskResult<GroupedRecommendationsResponse>;
    async fn job_recommendations(
        &self,
        job_id: JobId,
        limit: u32,
    ) -> DeskResult<JobRecommendationsResponse>;
    async fn hospital_directory(
        &self,
        hospital_id: HospitalId,
        q: &str,
    ) -> DeskResult<HospitalDirectoryResponse>;
}
