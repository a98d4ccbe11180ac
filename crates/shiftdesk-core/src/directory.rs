use crate::api::ShiftApi;
use crate::error::DeskResult;
use crate::notify::Notifier;
use crate::session::{Role, Session};
use crate::util::lock;
use shiftdesk_protocol::directory::{HospitalDirectoryResponse, StaffDirectoryResponse};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone)]
pub enum DirectoryResults {
    /// Departments and staff profiles, as seen by a hospital.
    Hospital(HospitalDirectoryResponse),
    /// Departments and hospitals, as seen by a staff member.
    Staff(StaffDirectoryResponse),
}

impl DirectoryResults {
    pub fn is_empty(&self) -> bool {
        match self {
            DirectoryResults::Hospital(r) => r.departments.is_empty() && r.staff_profiles.is_empty(),
            DirectoryResults::Staff(r) => r.departments.is_empty() && r.hospitals.is_empty(),
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            DirectoryResults::Hospital(_) => "No matching departments or staff profiles found.",
            DirectoryResults::Staff(_) => "No matching departments or hospitals found.",
        }
    }
}

/// Search-as-you-type over the directory for whichever role the session holds.
///
/// Each keystroke restarts the debounce window; only a query that survives it
/// reaches the API.
pub struct DirectorySearch {
    api: Arc<dyn ShiftApi>,
    session: Session,
    notifier: Arc<dyn Notifier>,
    debounce: Duration,
    generation: AtomicU64,
    results: Mutex<Option<DirectoryResults>>,
}

impl DirectorySearch {
    pub fn new(
        api: Arc<dyn ShiftApi>,
        session: Session,
        notifier: Arc<dyn Notifier>,
        debounce: Duration,
    ) -> Self {
        Self {
            api,
            session,
            notifier,
            debounce,
            generation: AtomicU64::new(0),
            results: Mutex::new(None),
        }
    }

    pub fn results(&self) -> Option<DirectoryResults> {
        lock(&self.results).clone()
    }

    /// Returns true when this query's results were stored.
    pub async fn search(&self, query: &str) -> bool {
        let role = self.session.role();
        let Some(subject_id) = self.session.id() else {
            let message = match role {
                Role::Staff => "Please login as staff first.",
                Role::Hospital => "Please login as hospital first.",
            };
            self.notifier.error(message);
            return false;
        };

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.debounce).await;
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("⌨️  Query {:?} superseded before sending", query);
            return false;
        }

        let q = query.trim();
        let outcome: DeskResult<DirectoryResults> = match role {
            Role::Hospital => self
                .api
                .hospital_directory(subject_id, q)
                .await
                .map(DirectoryResults::Hospital),
            Role::Staff => self
                .api
                .staff_directory(subject_id, q)
                .await
                .map(DirectoryResults::Staff),
        };

        match outcome {
            Ok(results) => {
                *lock(&self.results) = Some(results);
                true
            }
            Err(e) => {
                *lock(&self.results) = None;
                let fallback = match role {
                    Role::Hospital => "Unable to search hospital directory.",
                    Role::Staff => "Unable to search staff directory.",
                };
                self.notifier.error(&e.message_or(fallback));
                false
            }
        }
    }
}
