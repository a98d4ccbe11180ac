use crate::api::ShiftApi;
use crate::error::{DeskError, DeskResult};
use shiftdesk_protocol::shifts::{AssignRequest, DecisionRequest};
use shiftdesk_protocol::status::Decision;
use shiftdesk_protocol::{ApplicationId, JobId, StaffId, UserId};
use strum_macros::Display;
use tracing::{info, warn};

pub const MISSING_STAFF_ID: &str = "Applicant payload missing staff id.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SagaStage {
    Pending,
    Deciding,
    Decided,
    Assigning,
    Assigned,
    /// The application is accepted on the server but nobody was assigned.
    DecidedUnassigned,
}

impl SagaStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, SagaStage::Assigned | SagaStage::DecidedUnassigned)
    }
}

/// Accept an applicant, then assign them to the shift.
///
/// The assign step only runs after the decision succeeded. A failed assign is
/// reported and left as is: the accepted decision is not rolled back.
#[derive(Debug, Clone)]
pub struct AcceptSaga {
    pub job_id: JobId,
    pub application_id: ApplicationId,
    pub staff_id: Option<StaffId>,
    stage: SagaStage,
    history: Vec<SagaStage>,
    failure: Option<String>,
}

impl AcceptSaga {
    pub fn new(job_id: JobId, application_id: ApplicationId, staff_id: Option<StaffId>) -> Self {
        Self {
            job_id,
            application_id,
            staff_id,
            stage: SagaStage::Pending,
            history: vec![SagaStage::Pending],
            failure: None,
        }
    }

    pub fn stage(&self) -> SagaStage {
        self.stage
    }

    /// Every stage entered so far, starting with `Pending`.
    pub fn history(&self) -> &[SagaStage] {
        &self.history
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    fn enter(&mut self, stage: SagaStage) {
        self.stage = stage;
        self.history.push(stage);
    }

    fn fail(&mut self, stage: SagaStage, err: DeskError) -> DeskError {
        self.failure = Some(err.to_string());
        self.enter(stage);
        err
    }

    pub async fn run(
        &mut self,
        api: &dyn ShiftApi,
        assigned_by: Option<UserId>,
    ) -> DeskResult<()> {
        // 1. Decide
        self.enter(SagaStage::Deciding);
        let decision = DecisionRequest {
            status: Decision::Accepted,
            note: String::new(),
        };
        if let Err(e) = api.decide(self.application_id, &decision).await {
            warn!("❌ Accepting application {} failed: {}", self.application_id, e);
            return Err(self.fail(SagaStage::Pending, e));
        }
        self.enter(SagaStage::Decided);

        // 2. Assign
        let Some(staff_id) = self.staff_id else {
            let err = DeskError::Validation(MISSING_STAFF_ID.into());
            return Err(self.fail(SagaStage::DecidedUnassigned, err));
        };
        self.enter(SagaStage::Assigning);
        let req = AssignRequest {
            staff_id,
            assigned_by_user_id: assigned_by,
        };
        if let Err(e) = api.assign(self.job_id, &req).await {
            warn!(
                "⚠️  Application {} accepted but assigning staff {} to job {} failed: {}",
                self.application_id, staff_id, self.job_id, e
            );
            return Err(self.fail(SagaStage::DecidedUnassigned, e));
        }
        self.enter(SagaStage::Assigned);
        info!(
            "👥 Staff {} accepted and assigned to job {}",
            staff_id, self.job_id
        );
        Ok(())
    }
}
