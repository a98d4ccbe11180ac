//! View-state coordinators for the application/invitation lifecycle.
//!
//! A coordinator owns one page's worth of state: the list it loaded, the
//! single "processing" slot and the set of keys already acted on. State sits
//! behind a `std::sync::Mutex` that is never held across an API call, so the
//! only suspension points are the requests themselves.

pub mod board;
pub mod hospital;
pub mod saga;
pub mod staff;

pub use self::board::{CandidateGroup, CandidateRow, GroupAnchor, GroupStatus};
pub use self::hospital::{HospitalMatches, ShiftManager};
pub use self::saga::{AcceptSaga, SagaStage};
pub use self::staff::{StaffMatches, StaffSchedule};

use crate::config::{SlotRelease, StalePolicy};
use crate::util::lock;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

/// Identifies one (job, candidate) pair: `"{job_id}-{subject_id}"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActionKey(String);

impl ActionKey {
    pub fn new(job_id: u64, subject_id: u64) -> Self {
        Self(format!("{}-{}", job_id, subject_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Idle,
    InFlight,
    Done,
}

impl ButtonState {
    pub fn disabled(self) -> bool {
        self != ButtonState::Idle
    }

    pub fn label(self, labels: &ButtonLabels) -> &'static str {
        match self {
            ButtonState::Idle => labels.idle,
            ButtonState::InFlight => labels.busy,
            ButtonState::Done => labels.done,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonLabels {
    pub idle: &'static str,
    pub busy: &'static str,
    pub done: &'static str,
}

pub const APPLY_LABELS: ButtonLabels = ButtonLabels {
    idle: "Quick Apply",
    busy: "Applying...",
    done: "Applied",
};

pub const INVITE_LABELS: ButtonLabels = ButtonLabels {
    idle: "Quick Invite",
    busy: "Inviting...",
    done: "Invited",
};

#[derive(Debug, Default)]
struct GuardState {
    processing: Option<ActionKey>,
    applied: HashSet<ActionKey>,
}

/// The processing slot plus the set of keys completed during this page lifetime.
///
/// The slot is advisory. A different key may start while another is in flight,
/// and it takes the slot over.
#[derive(Debug, Default)]
pub struct ActionGuard {
    state: Mutex<GuardState>,
    release: SlotRelease,
}

impl ActionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_release(release: SlotRelease) -> Self {
        Self {
            state: Mutex::default(),
            release,
        }
    }

    /// Claims the slot for `key`. Returns `None` when the key's button is disabled.
    pub fn try_begin(&self, key: ActionKey) -> Option<InFlight<'_>> {
        let mut state = lock(&self.state);
        if state.processing.as_ref() == Some(&key) || state.applied.contains(&key) {
            debug!("⏸️  {} is busy or done, ignoring", key);
            return None;
        }
        debug!("⏳ {} in flight", key);
        state.processing = Some(key.clone());
        Some(InFlight { guard: self, key })
    }

    pub fn mark_applied(&self, key: &ActionKey) {
        lock(&self.state).applied.insert(key.clone());
    }

    pub fn clear_applied(&self) {
        lock(&self.state).applied.clear();
    }

    pub fn processing(&self) -> Option<ActionKey> {
        lock(&self.state).processing.clone()
    }

    pub fn is_applied(&self, key: &ActionKey) -> bool {
        lock(&self.state).applied.contains(key)
    }

    pub fn applied_count(&self) -> usize {
        lock(&self.state).applied.len()
    }

    /// In-flight wins over done.
    pub fn button_state(&self, key: &ActionKey) -> ButtonState {
        let state = lock(&self.state);
        if state.processing.as_ref() == Some(key) {
            ButtonState::InFlight
        } else if state.applied.contains(key) {
            ButtonState::Done
        } else {
            ButtonState::Idle
        }
    }
}

/// Holds the processing slot until dropped. Dropping releases the slot whether
/// the request finished, failed, panicked or was cancelled. Under
/// `SlotRelease::Owner` a slot already taken over by another key is left alone.
#[must_use = "the slot is released as soon as this is dropped"]
pub struct InFlight<'a> {
    guard: &'a ActionGuard,
    key: ActionKey,
}

impl InFlight<'_> {
    pub fn key(&self) -> &ActionKey {
        &self.key
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut state = lock(&self.guard.state);
        let owns = state.processing.as_ref() == Some(&self.key);
        if owns || self.guard.release == SlotRelease::Always {
            debug!("🔓 {} released", self.key);
            state.processing = None;
        } else {
            debug!("🔓 {} finished; slot stays with the newer action", self.key);
        }
    }
}

/// Ticket handed out when a list load starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// Decides whether a finished load may still write to the view.
#[derive(Debug)]
pub struct LoadGate {
    policy: StalePolicy,
    generation: AtomicU64,
}

impl LoadGate {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            policy,
            generation: AtomicU64::new(0),
        }
    }

    pub fn policy(&self) -> StalePolicy {
        self.policy
    }

    pub fn begin(&self) -> LoadTicket {
        LoadTicket(self.generation.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn accepts(&self, ticket: LoadTicket) -> bool {
        match self.policy {
            StalePolicy::LastWriteWins => true,
            StalePolicy::DiscardStale => {
                let current = self.generation.load(Ordering::SeqCst);
                if ticket.0 != current {
                    debug!("🗑️  Dropping stale load #{} (current #{})", ticket.0, current);
                    return false;
                }
                true
            }
        }
    }
}
