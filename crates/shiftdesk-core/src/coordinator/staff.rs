use super::board::CandidateRow;
use super::{ActionGuard, ActionKey, ButtonState, LoadGate};
use crate::api::{ShiftApi, ALL_DEPARTMENTS};
use crate::config::{ClientConfig, RefilterPolicy};
use crate::error::DeskResult;
use crate::notify::Notifier;
use crate::session::Session;
use crate::util::lock;
use shiftdesk_protocol::recommend::AiMeta;
use shiftdesk_protocol::schedule::{PendingApplication, ScheduleGroup};
use shiftdesk_protocol::{ApplicationId, JobId, StaffId};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

/// Department filter choices on the staff recommendations page.
pub const STAFF_DEPARTMENTS: [(&str, &str); 4] = [
    (ALL_DEPARTMENTS, "All Specialties (Best 6)"),
    ("ICU", "Intensive Care Unit (ICU)"),
    ("Emergency", "Emergency Room"),
    ("Radiology", "Radiology"),
];

#[derive(Debug, Clone)]
pub struct StaffMatchesView {
    pub department: String,
    /// Ranked (possibly AI re-ranked) rows.
    pub rows: Vec<CandidateRow>,
    /// Deterministic ranking; equals `rows` when the server sends no baseline.
    pub baseline: Vec<CandidateRow>,
    pub ai_meta: Option<AiMeta>,
    pub engine: Option<String>,
    pub loading: bool,
}

impl Default for StaffMatchesView {
    fn default() -> Self {
        Self {
            department: ALL_DEPARTMENTS.to_string(),
            rows: Vec::new(),
            baseline: Vec::new(),
            ai_meta: None,
            engine: None,
            loading: false,
        }
    }
}

/// Job recommendations for the logged-in staff member, with Quick Apply.
pub struct StaffMatches {
    api: Arc<dyn ShiftApi>,
    session: Session,
    notifier: Arc<dyn Notifier>,
    limit: u32,
    refilter: RefilterPolicy,
    guard: ActionGuard,
    gate: LoadGate,
    view: Mutex<StaffMatchesView>,
}

impl StaffMatches {
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
            refilter: config.staff_refilter,
            guard: ActionGuard::with_release(config.slot_release),
            gate: LoadGate::new(config.stale_responses),
            view: Mutex::new(StaffMatchesView::default()),
        }
    }

    pub fn view(&self) -> StaffMatchesView {
        lock(&self.view).clone()
    }

    pub fn guard(&self) -> &ActionGuard {
        &self.guard
    }

    /// Loads the list for the current department filter.
    pub async fn load(&self) -> bool {
        let Some(staff_id) = self.session.id() else {
            self.notifier
                .error("Please login as staff first to load recommendations.");
            let mut view = lock(&self.view);
            view.rows.clear();
            view.baseline.clear();
            view.loading = false;
            return false;
        };

        let ticket = self.gate.begin();
        let department = {
            let mut view = lock(&self.view);
            view.loading = true;
            view.department.clone()
        };
        debug!("🔎 Loading recommendations for staff {} ({})", staff_id, department);

        let result = self
            .api
            .staff_recommendations(staff_id, &department, self.limit)
            .await;
        if !self.gate.accepts(ticket) {
            return false;
        }

        let mut view = lock(&self.view);
        view.loading = false;
        match result {
            Ok(resp) => {
                let to_rows = |rows: Vec<_>| {
                    rows.into_iter()
                        .map(|r| CandidateRow::from_job_match(r, staff_id))
                        .collect::<Vec<_>>()
                };
                view.baseline = match resp.baseline_results {
                    Some(baseline) => to_rows(baseline),
                    None => to_rows(resp.results.clone()),
                };
                view.rows = to_rows(resp.results);
                view.ai_meta = resp.ai_meta;
                view.engine = resp.recommendation_engine;
                info!("📋 {} recommendations ({})", view.rows.len(), department);
                true
            }
            Err(e) => {
                view.rows.clear();
                view.baseline.clear();
                view.ai_meta = None;
                drop(view);
                self.notifier
                    .error(&e.message_or("Unable to load recommendations right now."));
                false
            }
        }
    }

    /// Switches the department filter and reloads.
    pub async fn set_department(&self, department: &str) -> bool {
        lock(&self.view).department = department.to_string();
        if self.refilter == RefilterPolicy::Clear {
            self.guard.clear_applied();
        }
        self.load().await
    }

    pub fn button(&self, job_id: JobId) -> ButtonState {
        match self.session.id() {
            Some(staff_id) => self.guard.button_state(&ActionKey::new(job_id, staff_id)),
            None => ButtonState::Idle,
        }
    }

    /// Quick Apply. Returns true when the application was submitted.
    pub async fn apply(&self, job_id: JobId) -> bool {
        let Some(staff_id) = self.session.id() else {
            self.notifier.error("Please login as staff first to apply.");
            return false;
        };
        let key = ActionKey::new(job_id, staff_id);
        let Some(_slot) = self.guard.try_begin(key.clone()) else {
            return false;
        };

        match self.api.apply(job_id, staff_id).await {
            Ok(resp) => {
                self.guard.mark_applied(&key);
                info!("📨 Applied to job {} (application {})", job_id, resp.application_id);
                self.notifier.success("Application submitted successfully.");
                true
            }
            Err(e) => {
                self.notifier
                    .error(&e.message_or("Unable to apply for this job."));
                false
            }
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleView {
    pub groups: Vec<ScheduleGroup>,
    pub selected: Option<u64>,
    pub loading: bool,
}

impl ScheduleView {
    /// The selected hospital group, or the first one.
    pub fn current_group(&self) -> Option<&ScheduleGroup> {
        self.selected
            .and_then(|id| self.groups.iter().find(|g| g.id == id))
            .or_else(|| self.groups.first())
    }

    pub fn find_pending(&self, application_id: ApplicationId) -> Option<&PendingApplication> {
        self.groups
            .iter()
            .flat_map(|g| g.pending_applications.iter())
            .find(|p| p.application_id == application_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScheduleAction {
    Withdraw,
    Approve,
}

/// The staff member's schedule grouped by hospital, with withdraw and approve.
pub struct StaffSchedule {
    api: Arc<dyn ShiftApi>,
    session: Session,
    notifier: Arc<dyn Notifier>,
    guard: ActionGuard,
    gate: LoadGate,
    view: Mutex<ScheduleView>,
}

impl StaffSchedule {
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
            view: Mutex::new(ScheduleView::default()),
        }
    }

    pub fn view(&self) -> ScheduleView {
        lock(&self.view).clone()
    }

    pub fn select(&self, group_id: u64) {
        lock(&self.view).selected = Some(group_id);
    }

    pub fn button(&self, job_id: JobId) -> ButtonState {
        match self.session.id() {
            Some(staff_id) => self.guard.button_state(&ActionKey::new(job_id, staff_id)),
            None => ButtonState::Idle,
        }
    }

    async fn refresh(&self, staff_id: StaffId) -> DeskResult<()> {
        let ticket = self.gate.begin();
        lock(&self.view).loading = true;
        let result = self.api.staff_schedule(staff_id).await;
        if !self.gate.accepts(ticket) {
            return Ok(());
        }

        let mut view = lock(&self.view);
        view.loading = false;
        let resp = result?;
        if view.selected.is_none() {
            view.selected = resp.results.first().map(|g| g.id);
        }
        view.groups = resp.results;
        Ok(())
    }

    pub async fn load(&self) -> bool {
        let Some(staff_id) = self.session.id() else {
            self.notifier.error("Please login as staff first.");
            return false;
        };
        match self.refresh(staff_id).await {
            Ok(()) => true,
            Err(e) => {
                self.notifier.error(&e.message_or("Unable to load schedule."));
                false
            }
        }
    }

    pub async fn withdraw(&self, application_id: ApplicationId) -> bool {
        self.dispatch(application_id, ScheduleAction::Withdraw).await
    }

    /// Approves a hospital invitation. Only shortlisted applications qualify.
    pub async fn approve(&self, application_id: ApplicationId) -> bool {
        self.dispatch(application_id, ScheduleAction::Approve).await
    }

    async fn dispatch(&self, application_id: ApplicationId, action: ScheduleAction) -> bool {
        let (success, fallback) = match action {
            ScheduleAction::Withdraw => (
                "Application withdrawn successfully.",
                "Unable to withdraw application.",
            ),
            ScheduleAction::Approve => (
                "Invitation approved. Shift confirmed.",
                "Unable to approve invitation.",
            ),
        };

        let Some(staff_id) = self.session.id() else {
            self.notifier.error("Please login as staff first.");
            return false;
        };
        let pending = lock(&self.view).find_pending(application_id).cloned();
        let Some(pending) = pending else {
            self.notifier.error(&format!(
                "Application {} is not in your schedule.",
                application_id
            ));
            return false;
        };
        if action == ScheduleAction::Approve && !pending.status.is_invitation() {
            self.notifier.error("Only invitations can be approved.");
            return false;
        }

        let key = ActionKey::new(pending.job_id, staff_id);
        let Some(_slot) = self.guard.try_begin(key) else {
            return false;
        };

        let outcome = async {
            match action {
                ScheduleAction::Withdraw => {
                    self.api.withdraw(application_id, staff_id).await?;
                }
                ScheduleAction::Approve => {
                    self.api.approve(application_id, staff_id).await?;
                }
            }
            self.refresh(staff_id).await
        }
        .await;

        match outcome {
            Ok(()) => {
                info!("🗓️  {:?} on application {} done", action, application_id);
                self.notifier.success(success);
                true
            }
            Err(e) => {
                self.notifier.error(&e.message_or(fallback));
                false
            }
        }
    }
}
