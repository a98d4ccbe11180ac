use crate::api::ShiftApi;
use crate::error::{DeskError, DeskResult};
use crate::notify::Notifier;
use crate::session::Session;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone, Utc};
use shiftdesk_protocol::shifts::{CreateShiftRequest, MetaOptionsResponse};
use shiftdesk_protocol::{HospitalId, JobId};
use std::sync::Arc;
use tracing::info;
use typed_builder::TypedBuilder;

pub const DEFAULT_HOURLY_RATE: &str = "60.00";
pub const DEFAULT_CURRENCY: &str = "USD";
const INVALID_TIMES: &str = "Please provide valid date and shift times.";

/// The "post a new shift" form. Date is `YYYY-MM-DD`, times are local `HH:MM`.
#[derive(TypedBuilder, Debug, Clone, PartialEq)]
pub struct ShiftPosting {
    #[builder(default, setter(strip_option))]
    pub department_id: Option<u64>,
    #[builder(default, setter(strip_option))]
    pub profession_id: Option<u64>,
    #[builder(default = 2)]
    pub required_staff_count: u32,
    #[builder(default, setter(into))]
    pub date: String,
    #[builder(default = "08:00".to_string(), setter(into))]
    pub start_time: String,
    #[builder(default = "16:00".to_string(), setter(into))]
    pub end_time: String,
    #[builder(default, setter(into))]
    pub description: String,
}

impl Default for ShiftPosting {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ShiftPosting {
    pub fn can_submit(&self) -> bool {
        self.department_id.is_some()
            && self.profession_id.is_some()
            && !self.date.trim().is_empty()
            && !self.start_time.trim().is_empty()
            && !self.end_time.trim().is_empty()
            && self.required_staff_count > 0
    }

    /// The count stepper. Never drops below one.
    pub fn step_count(&mut self, delta: i32) {
        let next = i64::from(self.required_staff_count) + i64::from(delta);
        self.required_staff_count = next.clamp(1, i64::from(u32::MAX)) as u32;
    }

    /// Picks the first department and profession when none is chosen yet.
    pub fn apply_defaults(&mut self, options: &MetaOptionsResponse) {
        if self.department_id.is_none() {
            self.department_id = options.departments.first().map(|d| d.id);
        }
        if self.profession_id.is_none() {
            self.profession_id = options.professions.first().map(|p| p.id);
        }
    }

    pub fn to_request(&self, hospital_id: HospitalId) -> DeskResult<CreateShiftRequest> {
        let (Some(department_id), Some(profession_id)) = (self.department_id, self.profession_id)
        else {
            return Err(DeskError::Validation(
                "Please choose a department and a profession.".into(),
            ));
        };
        if self.required_staff_count == 0 {
            return Err(DeskError::Validation(
                "At least one staff member is required.".into(),
            ));
        }
        Ok(CreateShiftRequest {
            hospital_id,
            department_id,
            profession_id,
            required_staff_count: self.required_staff_count,
            shift_start: to_iso_datetime(&self.date, &self.start_time)?,
            shift_end: to_iso_datetime(&self.date, &self.end_time)?,
            description: self.description.clone(),
            hourly_rate: DEFAULT_HOURLY_RATE.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        })
    }
}

/// Local `date` + `time` as a UTC ISO-8601 timestamp with milliseconds.
pub fn to_iso_datetime(date: &str, time: &str) -> DeskResult<String> {
    let invalid = || DeskError::Validation(INVALID_TIMES.into());
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| invalid())?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M").map_err(|_| invalid())?;
    let local = Local
        .from_local_datetime(&NaiveDateTime::new(date, time))
        .earliest()
        .ok_or_else(invalid)?;
    Ok(local
        .with_timezone(&Utc)
        .to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// Loads posting options and submits the form for the logged-in hospital.
pub struct ShiftPoster {
    api: Arc<dyn ShiftApi>,
    session: Session,
    notifier: Arc<dyn Notifier>,
}

impl ShiftPoster {
    pub fn new(api: Arc<dyn ShiftApi>, session: Session, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            api,
            session,
            notifier,
        }
    }

    pub async fn load_options(&self, form: &mut ShiftPosting) -> Option<MetaOptionsResponse> {
        let Some(hospital_id) = self.session.id() else {
            self.notifier.error("Please login as hospital first.");
            return None;
        };
        match self.api.meta_options(hospital_id).await {
            Ok(options) => {
                form.apply_defaults(&options);
                Some(options)
            }
            Err(e) => {
                self.notifier
                    .error(&e.message_or("Unable to load posting options."));
                None
            }
        }
    }

    /// Posts the shift. On success the description is cleared for the next posting.
    pub async fn submit(&self, form: &mut ShiftPosting) -> Option<JobId> {
        let Some(hospital_id) = self.session.id() else {
            self.notifier.error("Please login as hospital first.");
            return None;
        };
        let req = match form.to_request(hospital_id) {
            Ok(req) => req,
            Err(e) => {
                self.notifier.error(&e.to_string());
                return None;
            }
        };
        match self.api.create_shift(&req).await {
            Ok(resp) => {
                info!("🆕 Shift {} posted", resp.id);
                self.notifier.success("Shift posted successfully.");
                form.description.clear();
                Some(resp.id)
            }
            Err(e) => {
                self.notifier.error(&e.message_or("Could not post shift."));
                None
            }
        }
    }
}
