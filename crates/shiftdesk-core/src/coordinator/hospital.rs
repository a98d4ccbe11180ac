use super::board::{CandidateGroup, CandidateRow, GroupAnchor};
use super::saga::{AcceptSaga, SagaStage};
use super::{ActionGuard, ActionKey, ButtonState, LoadGate};
use crate::api::{ShiftApi, ALL_DEPARTMENTS};
use crate::config::{ClientConfig, RefilterPolicy};
use crate::error::DeskResult;
use crate::notify::Notifier;
use crate::session::Session;
use crate::util::lock;
use shiftdesk_protocol::recommend::AiMeta;
use shiftdesk_protocol::shifts::{
    AssignRequest, DecisionRequest, NamedRef, ShiftDetailResponse, ShiftSummary,
};
use shiftdesk_protocol::status::{ApplicationStatus, Decision};
use shiftdesk_protocol::{ApplicationId, HospitalId, JobId, StaffId};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};

const LOGIN_FIRST: &str = "Please login as hospital first.";

#[derive(Debug, Clone)]
pub struct HospitalMatchesView {
    pub department: String,
    pub departments: Vec<NamedRef>,
    pub groups: Vec<CandidateGroup>,
    pub ai_meta: Option<AiMeta>,
    pub loading: bool,
}

impl Default for HospitalMatchesView {
    fn default() -> Self {
        Self {
            department: ALL_DEPARTMENTS.to_string(),
            departments: Vec::new(),
            groups: Vec::new(),
            ai_meta: None,
            loading: false,
        }
    }
}

impl HospitalMatchesView {
    pub fn has_any_results(&self) -> bool {
        self.groups.iter().any(|g| !g.rows.is_empty())
    }
}

/// What a recommendations load asks for.
#[derive(Debug, Clone)]
enum MatchQuery {
    Department(String),
    Job(JobId),
}

/// Department-grouped staff recommendations for the logged-in hospital, with Quick Invite.
pub struct HospitalMatches {
    api: Arc<dyn ShiftApi>,
    session: Session,
    notifier: Arc<dyn Notifier>,
    limit: u32,
    refilter: RefilterPolicy,
    guard: ActionGuard,
    gate: LoadGate,
    view: Mutex<HospitalMatchesView>,
}

impl HospitalMatches {
    pub fn new(
        api: Arc<dyn ShiftApi>,
        session: Session,
        notifier: Arc<dyn Notifier>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            limit: config.recommendation_limit,
            refilter: config.hospital_refilter,
            guard: ActionGuard::with_release(config.slot_release),
            gate: LoadGate::new(config.stale_responses),
            view: Mutex::new(HospitalMatchesView::default()),
        }
    }

    pub fn view(&self) -> HospitalMatchesView {
        lock(&self.view).clone()
    }

    pub fn guard(&self) -> &ActionGuard {
        &self.guard
    }

    fn require_hospital(&self) -> Option<HospitalId> {
        let id = self.session.id();
        if id.is_none() {
            self.notifier.error(LOGIN_FIRST);
            let mut view = lock(&self.view);
            view.groups.clear();
            view.ai_meta = None;
            view.loading = false;
        }
        id
    }

    /// First page load: department options, then every department's top staff.
    pub async fn mount(&self) -> bool {
        let Some(hospital_id) = self.require_hospital() else {
            return false;
        };
        lock(&self.view).department = ALL_DEPARTMENTS.to_string();

        let outcome = async {
            let options = self.api.meta_options(hospital_id).await?;
            lock(&self.view).departments = options.departments;
            self.fetch(hospital_id, MatchQuery::Department(ALL_DEPARTMENTS.into()))
                .await
        }
        .await;
        self.settle(outcome, "Unable to load department recommendations.")
    }

    /// Applies a department filter.
    pub async fn set_department(&self, department: &str) -> bool {
        let Some(hospital_id) = self.require_hospital() else {
            return false;
        };
        lock(&self.view).department = department.to_string();
        if self.refilter == RefilterPolicy::Clear {
            self.guard.clear_applied();
        }
        let outcome = self
            .fetch(hospital_id, MatchQuery::Department(department.to_string()))
            .await;
        self.settle(outcome, "Unable to load recommendations.")
    }

    /// Top staff for one specific open job, shown as a single job-anchored group.
    pub async fn load_for_job(&self, job_id: JobId) -> bool {
        let Some(hospital_id) = self.require_hospital() else {
            return false;
        };
        let outcome = self.fetch(hospital_id, MatchQuery::Job(job_id)).await;
        self.settle(outcome, "Unable to load recommendations.")
    }

    async fn fetch(&self, hospital_id: HospitalId, query: MatchQuery) -> DeskResult<bool> {
        let ticket = self.gate.begin();
        lock(&self.view).loading = true;
        debug!("🔎 Loading staff matches for hospital {} ({:?})", hospital_id, query);

        let (groups, ai_meta) = match query {
            MatchQuery::Department(department) => {
                let resp = self
                    .api
                    .department_recommendations(hospital_id, &department, self.limit)
                    .await;
                if !self.gate.accepts(ticket) {
                    return Ok(false);
                }
                let resp = resp?;
                let groups = resp
                    .results
                    .into_iter()
                    .map(CandidateGroup::from_department)
                    .collect::<Vec<_>>();
                (groups, resp.ai_meta)
            }
            MatchQuery::Job(job_id) => {
                let resp = self.api.job_recommendations(job_id, self.limit).await;
                if !self.gate.accepts(ticket) {
                    return Ok(false);
                }
                let resp = resp?;
                let group = CandidateGroup {
                    department: format!("Job #{}", resp.job_id),
                    anchor: GroupAnchor::Job(resp.job_id),
                    rows: resp
                        .results
                        .into_iter()
                        .map(|r| CandidateRow::from_staff_match(r, resp.job_id))
                        .collect(),
                    ai_meta: resp.ai_meta.clone(),
                };
                (vec![group], resp.ai_meta)
            }
        };

        let mut view = lock(&self.view);
        info!("📋 {} department groups loaded", groups.len());
        view.groups = groups;
        view.ai_meta = ai_meta;
        view.loading = false;
        Ok(true)
    }

    /// A failed load clears the groups and the banner, then notifies once.
    fn settle(&self, outcome: DeskResult<bool>, fallback: &str) -> bool {
        match outcome {
            Ok(applied) => applied,
            Err(e) => {
                {
                    let mut view = lock(&self.view);
                    view.groups.clear();
                    view.ai_meta = None;
                    view.loading = false;
                }
                self.notifier.error(&e.message_or(fallback));
                false
            }
        }
    }

    pub fn button(&self, job_id: JobId, staff_id: StaffId) -> ButtonState {
        self.guard.button_state(&ActionKey::new(job_id, staff_id))
    }

    /// Quick Invite: assigns `staff_id` to `job_id` straight from the recommendations.
    pub async fn invite(&self, job_id: JobId, staff_id: StaffId) -> bool {
        let key = ActionKey::new(job_id, staff_id);
        let Some(_slot) = self.guard.try_begin(key.clone()) else {
            return false;
        };

        // A hospital session has no user account to credit.
        let req = AssignRequest {
            staff_id,
            assigned_by_user_id: None,
        };
        match self.api.assign(job_id, &req).await {
            Ok(_) => {
                self.guard.mark_applied(&key);
                info!("📨 Invited staff {} to job {}", staff_id, job_id);
                self.notifier.success("Staff invited successfully.");
                true
            }
            Err(e) => {
                self.notifier.error(&e.message_or("Could not invite staff."));
                false
            }
        }
    }
}

/// An assigned staff row, from the detail payload when loaded, else from the summary card.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignedRow {
    pub staff_id: Option<StaffId>,
    pub name: String,
    pub role: String,
    pub status: String,
}

/// An applicant row, from the detail payload when loaded, else from the summary card.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicantRow {
    pub application_id: ApplicationId,
    pub staff_id: Option<StaffId>,
    pub name: String,
    pub rating: Option<f64>,
    pub shifts: u32,
    pub status: ApplicationStatus,
}

#[derive(Debug, Clone, Default)]
pub struct ShiftManagerView {
    pub cards: Vec<ShiftSummary>,
    pub selected: Option<JobId>,
    pub detail: Option<ShiftDetailResponse>,
    pub loading: bool,
    /// The most recent accept attempt, kept so a partial failure stays visible.
    pub last_accept: Option<AcceptSaga>,
}

impl ShiftManagerView {
    /// The selected card, or the first one.
    pub fn current(&self) -> Option<&ShiftSummary> {
        self.selected
            .and_then(|id| self.cards.iter().find(|c| c.id == id))
            .or_else(|| self.cards.first())
    }

    fn current_detail(&self) -> Option<&ShiftDetailResponse> {
        let current = self.current()?;
        self.detail.as_ref().filter(|d| d.job.id == current.id)
    }

    pub fn assigned_rows(&self) -> Vec<AssignedRow> {
        if let Some(detail) = self.current_detail() {
            return detail
                .assigned
                .iter()
                .map(|a| AssignedRow {
                    staff_id: Some(a.staff_id),
                    name: a.name.clone(),
                    role: a.role.clone(),
                    status: a.status.clone(),
                })
                .collect();
        }
        self.current()
            .map(|card| {
                card.assigned
                    .iter()
                    .map(|a| AssignedRow {
                        staff_id: Some(a.id),
                        name: a.name.clone(),
                        role: a.role.clone(),
                        status: a.status.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn applicant_rows(&self) -> Vec<ApplicantRow> {
        if let Some(detail) = self.current_detail() {
            return detail
                .applicants
                .iter()
                .map(|a| ApplicantRow {
                    application_id: a.application_id,
                    staff_id: Some(a.staff_id),
                    name: a.name.clone(),
                    rating: a.rating,
                    shifts: a.shifts,
                    status: a.status,
                })
                .collect();
        }
        self.current()
            .map(|card| {
                card.applicants
                    .iter()
                    .map(|a| ApplicantRow {
                        application_id: a.application_id,
                        staff_id: a.id,
                        name: a.name.clone(),
                        rating: a.rating,
                        shifts: a.shifts,
                        status: a.status,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Shift cards for the hospital plus the applicants of the selected shift.
pub struct ShiftManager {
    api: Arc<dyn ShiftApi>,
    session: Session,
    notifier: Arc<dyn Notifier>,
    guard: ActionGuard,
    gate: LoadGate,
    view: Mutex<ShiftManagerView>,
}

impl ShiftManager {
    pub fn new(
        api: Arc<dyn ShiftApi>,
        session: Session,
        notifier: Arc<dyn Notifier>,
        config: &ClientConfig,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            guard: ActionGuard::with_release(config.slot_release),
            gate: LoadGate::new(config.stale_responses),
            view: Mutex::new(ShiftManagerView::default()),
        }
    }

    pub fn view(&self) -> ShiftManagerView {
        lock(&self.view).clone()
    }

    pub fn guard(&self) -> &ActionGuard {
        &self.guard
    }

    async fn refresh_summary(&self, hospital_id: HospitalId) -> DeskResult<()> {
        let ticket = self.gate.begin();
        lock(&self.view).loading = true;
        let result = self.api.shift_summary(hospital_id).await;
        if !self.gate.accepts(ticket) {
            return Ok(());
        }
        let mut view = lock(&self.view);
        view.loading = false;
        let resp = result?;
        if view.selected.is_none() {
            view.selected = resp.results.first().map(|c| c.id);
        }
        view.cards = resp.results;
        Ok(())
    }

    async fn refresh_detail(&self, job_id: JobId) -> DeskResult<()> {
        let detail = self.api.shift_detail(job_id).await?;
        let mut view = lock(&self.view);
        // The user may have moved on to another shift meanwhile.
        if view.current().map(|c| c.id) == Some(job_id) {
            view.detail = Some(detail);
        }
        Ok(())
    }

    fn current_job(&self) -> Option<JobId> {
        lock(&self.view).current().map(|c| c.id)
    }

    /// Loads the summary cards, then the detail of the current card.
    pub async fn load(&self) -> bool {
        let Some(hospital_id) = self.session.id() else {
            self.notifier.error(LOGIN_FIRST);
            return false;
        };
        if let Err(e) = self.refresh_summary(hospital_id).await {
            self.notifier.error(&e.message_or("Unable to load shifts."));
            return false;
        }
        match self.current_job() {
            Some(job_id) => self.load_detail(job_id).await,
            None => true,
        }
    }

    /// Switches to another shift card. Ids not among the loaded cards are refused.
    pub async fn select(&self, job_id: JobId) -> bool {
        {
            let mut view = lock(&self.view);
            if !view.cards.iter().any(|c| c.id == job_id) {
                drop(view);
                self.notifier
                    .error(&format!("Shift {} is not among your shifts.", job_id));
                return false;
            }
            view.selected = Some(job_id);
            view.detail = None;
        }
        self.load_detail(job_id).await
    }

    async fn load_detail(&self, job_id: JobId) -> bool {
        match self.refresh_detail(job_id).await {
            Ok(()) => true,
            Err(e) => {
                self.notifier
                    .error(&e.message_or("Unable to load shift detail."));
                false
            }
        }
    }

    fn find_applicant(&self, application_id: ApplicationId) -> Option<(JobId, ApplicantRow)> {
        let view = lock(&self.view);
        let job_id = view.current()?.id;
        view.applicant_rows()
            .into_iter()
            .find(|a| a.application_id == application_id)
            .map(|row| (job_id, row))
    }

    fn claim(&self, application_id: ApplicationId) -> Option<(JobId, ApplicantRow, ActionKey)> {
        let Some((job_id, row)) = self.find_applicant(application_id) else {
            self.notifier.error(&format!(
                "Application {} is not on the selected shift.",
                application_id
            ));
            return None;
        };
        // Rows from older servers lack a staff id; key those by application.
        let subject = row.staff_id.unwrap_or(row.application_id);
        Some((job_id, row, ActionKey::new(job_id, subject)))
    }

    async fn reload_after_action(&self, job_id: JobId) -> DeskResult<()> {
        let hospital_id = self.session.require_id()?;
        self.refresh_detail(job_id).await?;
        self.refresh_summary(hospital_id).await
    }

    pub async fn decline(&self, application_id: ApplicationId) -> bool {
        let Some((job_id, _, key)) = self.claim(application_id) else {
            return false;
        };
        let Some(_slot) = self.guard.try_begin(key) else {
            return false;
        };

        let outcome = async {
            let req = DecisionRequest {
                status: Decision::Rejected,
                note: String::new(),
            };
            self.api.decide(application_id, &req).await?;
            self.reload_after_action(job_id).await
        }
        .await;

        match outcome {
            Ok(()) => {
                info!("🚫 Application {} declined", application_id);
                self.notifier.success("Application declined.");
                true
            }
            Err(e) => {
                self.notifier
                    .error(&e.message_or("Unable to decline application."));
                false
            }
        }
    }

    /// Accepts the applicant, then assigns them to the shift.
    ///
    /// When the decision lands but the assignment fails the error is reported
    /// and nothing is reloaded; the next load shows the accepted, unassigned state.
    pub async fn accept(&self, application_id: ApplicationId) -> bool {
        let Some((job_id, row, key)) = self.claim(application_id) else {
            return false;
        };
        let Some(_slot) = self.guard.try_begin(key) else {
            return false;
        };

        let mut saga = AcceptSaga::new(job_id, application_id, row.staff_id);
        let outcome = match saga.run(self.api.as_ref(), None).await {
            Ok(()) => self.reload_after_action(job_id).await,
            Err(e) => Err(e),
        };
        let stage = saga.stage();
        lock(&self.view).last_accept = Some(saga);

        match outcome {
            Ok(()) => {
                self.notifier.success("Applicant accepted and assigned.");
                true
            }
            Err(e) => {
                if stage != SagaStage::Pending {
                    warn!("⚠️  Accept stopped at {}", stage);
                }
                self.notifier
                    .error(&e.message_or("Unable to accept and assign applicant."));
                false
            }
        }
    }
}
