use crate::api::ShiftApi;
use crate::error::DeskError;
use crate::notify::Notifier;
use crate::session::{Session, StoredProfile};
use shiftdesk_protocol::auth::{HospitalRegisterRequest, LoginRequest, StaffRegisterRequest};
use shiftdesk_protocol::{HospitalId, StaffId};
use std::sync::Arc;
use tracing::info;

const STAFF_FALLBACK_PROFESSION: &str = "Staff";
const HOSPITAL_FALLBACK_NAME: &str = "Hospital Admin";

/// Staff sign-up form as entered.
#[derive(Debug, Clone, Default)]
pub struct StaffSignup {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub profession: String,
    /// Zero-based weekday indexes, Monday first.
    pub availability_days: Vec<u8>,
}

impl StaffSignup {
    pub fn validate(&self) -> Result<(), DeskError> {
        if self.profession.trim().is_empty() {
            return Err(DeskError::Validation("Please select a profession.".into()));
        }
        Ok(())
    }

    /// Toggles one weekday in the availability picker.
    pub fn toggle_day(&mut self, day: u8) {
        if let Some(pos) = self.availability_days.iter().position(|&d| d == day) {
            self.availability_days.remove(pos);
        } else {
            self.availability_days.push(day);
        }
    }
}

/// Hospital registration form as entered. `confirm_password` goes to the server unchecked.
#[derive(Debug, Clone, Default)]
pub struct HospitalSignup {
    pub hospital_name: String,
    pub registration_number: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login and registration for both roles. Each call notifies exactly once.
pub struct AuthFlow {
    api: Arc<dyn ShiftApi>,
    notifier: Arc<dyn Notifier>,
}

impl AuthFlow {
    pub fn new(api: Arc<dyn ShiftApi>, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, notifier }
    }

    pub async fn staff_login(&self, session: &Session, email: &str, password: &str) -> Option<StaffId> {
        let email = email.trim();
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let outcome = async {
            let resp = self.api.login_staff(&req).await?;
            session.set_id(resp.staff_id)?;
            session.set_tokens(resp.access_token.as_deref(), resp.refresh_token.as_deref())?;
            session.set_profile(&StoredProfile {
                full_name: non_empty(resp.full_name).unwrap_or_else(|| email.to_string()),
                profession: Some(
                    non_empty(resp.profession).unwrap_or_else(|| STAFF_FALLBACK_PROFESSION.into()),
                ),
            })?;
            Ok::<_, DeskError>(resp.staff_id)
        }
        .await;

        match outcome {
            Ok(id) => {
                info!("🔑 Staff {} logged in", id);
                self.notifier.success("Staff login successful.");
                Some(id)
            }
            Err(e) => {
                self.notifier.error(&e.message_or("Unable to login right now."));
                None
            }
        }
    }

    pub async fn staff_register(&self, session: &Session, form: &StaffSignup) -> Option<StaffId> {
        if let Err(e) = form.validate() {
            self.notifier.error(&e.to_string());
            return None;
        }

        let full_name = form.full_name.trim().to_string();
        let req = StaffRegisterRequest {
            full_name: full_name.clone(),
            email: form.email.trim().to_string(),
            password: form.password.clone(),
            profession: form.profession.clone(),
            availability_days: form.availability_days.clone(),
        };
        let outcome = async {
            let resp = self.api.register_staff(&req).await?;
            session.set_id(resp.staff_id)?;
            session.set_profile(&StoredProfile {
                full_name,
                profession: Some(non_empty(resp.profession).unwrap_or_else(|| form.profession.clone())),
            })?;
            Ok::<_, DeskError>(resp.staff_id)
        }
        .await;

        match outcome {
            Ok(id) => {
                info!("🆕 Staff account {} created", id);
                self.notifier.success("Account created successfully.");
                Some(id)
            }
            Err(e) => {
                self.notifier
                    .error(&e.message_or("Unable to create account right now."));
                None
            }
        }
    }

    pub async fn hospital_login(
        &self,
        session: &Session,
        email: &str,
        password: &str,
    ) -> Option<HospitalId> {
        let req = LoginRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
        };
        let outcome = async {
            let resp = self.api.login_hospital(&req).await?;
            session.set_id(resp.hospital_id)?;
            session.set_tokens(resp.access_token.as_deref(), resp.refresh_token.as_deref())?;
            session.set_profile(&StoredProfile {
                full_name: non_empty(resp.hospital_name)
                    .unwrap_or_else(|| HOSPITAL_FALLBACK_NAME.into()),
                profession: Some(HOSPITAL_FALLBACK_NAME.into()),
            })?;
            Ok::<_, DeskError>(resp.hospital_id)
        }
        .await;

        match outcome {
            Ok(id) => {
                info!("🔑 Hospital {} logged in", id);
                self.notifier.success("Logged in successfully.");
                Some(id)
            }
            Err(e) => {
                self.notifier.error(&e.message_or("Invalid email or password."));
                None
            }
        }
    }

    /// Registers a hospital. Nothing is stored; the user logs in afterwards.
    pub async fn hospital_register(&self, form: &HospitalSignup) -> Option<HospitalId> {
        let req = HospitalRegisterRequest {
            hospital_name: form.hospital_name.trim().to_string(),
            registration_number: form.registration_number.trim().to_string(),
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            location: form.location.trim().to_string(),
            password: form.password.clone(),
            confirm_password: form.confirm_password.clone(),
        };
        match self.api.register_hospital(&req).await {
            Ok(resp) => {
                info!("🏥 Hospital {} registered", resp.hospital_id);
                self.notifier.success("Hospital registered successfully.");
                Some(resp.hospital_id)
            }
            Err(e) => {
                self.notifier
                    .error(&e.message_or("Registration failed. Please try again."));
                None
            }
        }
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|v| !v.trim().is_empty())
}
