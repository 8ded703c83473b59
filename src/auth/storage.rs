//! Durable client-side storage for the session.
//!
//! One slot holds the serialized [`Session`]. Its presence is the only login
//! signal the route guard looks at.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::api::models::Session;
use crate::error::ClientResult;

/// Synchronous key/value slot for the session. Writes complete before returning.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> ClientResult<Option<Session>>;

    fn save(&self, session: &Session) -> ClientResult<()>;

    fn clear(&self) -> ClientResult<()>;

    /// Whether anything is stored, without parsing it.
    fn has_session(&self) -> bool;
}

/// JSON file on disk, replaced atomically on every save.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> ClientResult<Option<Session>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(serde_json::from_str(&content)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(session)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn has_session(&self) -> bool {
        self.path.is_file()
    }
}

/// In-process slot holding the serialized session text.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slot: Mutex<Option<String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw stored text, as a browser's local storage would hand it back.
    pub fn raw(&self) -> Option<String> {
        self.slot.lock().ok().and_then(|s| s.clone())
    }

    pub fn set_raw(&self, value: impl Into<String>) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(value.into());
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> ClientResult<Option<Session>> {
        match self.raw() {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    fn save(&self, session: &Session) -> ClientResult<()> {
        let text = serde_json::to_string(session)?;
        self.set_raw(text);
        Ok(())
    }

    fn clear(&self) -> ClientResult<()> {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
        Ok(())
    }

    fn has_session(&self) -> bool {
        self.raw().is_some()
    }
}
