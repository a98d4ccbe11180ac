use crate::error::{DeskError, DeskResult};
use crate::util::lock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use strum_macros::{Display, EnumString};
use tracing::{debug, warn};

/// Which side of the product a session belongs to. Doubles as the storage key prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Staff,
    Hospital,
}

/// String key-value storage that outlives a single view, like browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> DeskResult<()>;
    fn remove(&self, key: &str) -> DeskResult<()>;
}

#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> DeskResult<()> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> DeskResult<()> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// A flat JSON object on disk. Every write rewrites the whole file.
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Opens `path`, starting empty when the file is missing or unreadable.
    pub fn open<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("⚠️  Session file {:?} is corrupt ({}). Starting fresh.", path, e);
                BTreeMap::new()
            }),
            Err(_) => BTreeMap::new(),
        };
        debug!("📂 Session store: {:?} ({} keys)", path, entries.len());
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> DeskResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> DeskResult<()> {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> DeskResult<()> {
        let mut entries = lock(&self.entries);
        if entries.remove(key).is_some() {
            self.flush(&entries)?;
        }
        Ok(())
    }
}

/// Display identity cached at login.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    pub full_name: String,
    #[serde(default)]
    pub profession: Option<String>,
}

/// One role's view of the shared store: `{role}_id`, tokens and profile.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn KeyValueStore>,
    role: Role,
}

impl Session {
    pub fn new(store: Arc<dyn KeyValueStore>, role: Role) -> Self {
        Self { store, role }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    fn key(&self, suffix: &str) -> String {
        format!("{}_{}", self.role, suffix)
    }

    /// The subject id, if one is stored and numeric.
    pub fn id(&self) -> Option<u64> {
        self.store
            .get(&self.key("id"))
            .and_then(|raw| raw.trim().parse().ok())
    }

    /// Like [`Session::id`] but fails with [`DeskError::MissingSession`].
    pub fn require_id(&self) -> DeskResult<u64> {
        self.id().ok_or(DeskError::MissingSession(self.role))
    }

    pub fn set_id(&self, id: u64) -> DeskResult<()> {
        self.store.set(&self.key("id"), &id.to_string())
    }

    pub fn clear_id(&self) -> DeskResult<()> {
        self.store.remove(&self.key("id"))
    }

    /// Writes only the tokens that are present; an absent token keeps its old value.
    pub fn set_tokens(&self, access: Option<&str>, refresh: Option<&str>) -> DeskResult<()> {
        if let Some(token) = access.filter(|t| !t.is_empty()) {
            self.store.set(&self.key("access_token"), token)?;
        }
        if let Some(token) = refresh.filter(|t| !t.is_empty()) {
            self.store.set(&self.key("refresh_token"), token)?;
        }
        Ok(())
    }

    pub fn access_token(&self) -> Option<String> {
        self.store.get(&self.key("access_token"))
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.store.get(&self.key("refresh_token"))
    }

    pub fn set_profile(&self, profile: &StoredProfile) -> DeskResult<()> {
        self.store
            .set(&self.key("profile"), &serde_json::to_string(profile)?)
    }

    /// A profile that fails to parse reads as none.
    pub fn profile(&self) -> Option<StoredProfile> {
        let raw = self.store.get(&self.key("profile"))?;
        serde_json::from_str(&raw).ok()
    }

    /// Drops both tokens and the profile. The id survives.
    pub fn clear_tokens(&self) -> DeskResult<()> {
        self.store.remove(&self.key("access_token"))?;
        self.store.remove(&self.key("refresh_token"))?;
        self.store.remove(&self.key("profile"))
    }

    pub fn logout(&self) -> DeskResult<()> {
        self.clear_tokens()?;
        self.clear_id()
    }
}
