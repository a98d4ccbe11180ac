pub mod hospital;
pub mod password;
pub mod session;
pub mod staff;

use crate::console::ConsoleNotifier;
use shiftdesk_core::api::{HttpApi, ShiftApi};
use shiftdesk_core::config::ClientConfig;
use shiftdesk_core::notify::Notifier;
use shiftdesk_core::session::{FileStore, KeyValueStore, Role, Session};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// What every subcommand gets: the API client, the session file and the console.
pub struct Context {
    pub config: ClientConfig,
    pub api: Arc<dyn ShiftApi>,
    pub store: Arc<dyn KeyValueStore>,
    pub notifier: Arc<dyn Notifier>,
}

impl Context {
    pub fn new(config: ClientConfig) -> Self {
        debug!("🌐 API base: {}", config.api_base_url);
        let api = Arc::new(HttpApi::new(config.api_base_url.clone()));
        let store = Arc::new(FileStore::open(&config.session_file));
        Self {
            config,
            api,
            store,
            notifier: Arc::new(ConsoleNotifier),
        }
    }

    pub fn session(&self, role: Role) -> Session {
        Session::new(self.store.clone(), role)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.config.search_debounce_ms)
    }
}

/// Parses a weekday name or a zero-based index (Monday first).
pub fn parse_weekday(raw: &str) -> Result<u8, String> {
    if let Ok(n) = raw.parse::<u8>() {
        return if n < 7 {
            Ok(n)
        } else {
            Err(format!("weekday index {} is out of range 0..=6", n))
        };
    }
    let prefix: String = raw.chars().take(3).collect::<String>().to_lowercase();
    shiftdesk_core::dashboard::WEEKDAYS
        .iter()
        .position(|d| d.to_lowercase() == prefix)
        .map(|i| i as u8)
        .ok_or_else(|| format!("unknown weekday '{}'", raw))
}
