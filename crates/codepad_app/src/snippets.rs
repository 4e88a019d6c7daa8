use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use codepad_core::SourceBundle;
use codepad_sandbox::{write_atomic, PersistError};
use pad_logging::pad_warn;

/// A stored snippet. Owned by the store; the preview controller only ever
/// consumes the three source buffers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetRecord {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub html: String,
    pub css: String,
    pub javascript: String,
    pub is_public: bool,
    pub user_id: String,
    /// RFC 3339 timestamps.
    pub created_at: String,
    pub updated_at: String,
    pub forks: u32,
    pub forked_from: Option<String>,
}

impl SnippetRecord {
    pub fn sources(&self) -> SourceBundle {
        SourceBundle::new(
            self.html.clone(),
            self.css.clone(),
            self.javascript.clone(),
        )
    }
}

/// Fields the caller provides when saving the current buffers as a snippet.
#[derive(Debug, Clone)]
pub struct NewSnippet {
    pub title: String,
    pub description: Option<String>,
    pub sources: SourceBundle,
    pub is_public: bool,
    pub user_id: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snippet {0} not found")]
    NotFound(String),
    #[error("malformed snippet {0}: {1}")]
    Malformed(String, String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
}

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// File-backed snippet store: one RON file per record under `dir`.
pub struct SnippetStore {
    dir: PathBuf,
    now: Clock,
}

impl SnippetStore {
    pub fn new(dir: PathBuf) -> Self {
        Self::with_clock(dir, Arc::new(Utc::now))
    }

    /// Injectable clock so tests control ids and timestamps.
    pub fn with_clock(dir: PathBuf, now: Clock) -> Self {
        Self { dir, now }
    }

    pub fn save(&self, new: NewSnippet) -> Result<SnippetRecord, StoreError> {
        let now = (self.now)();
        let stamp = now.to_rfc3339();
        let record = SnippetRecord {
            id: self.fresh_id(now),
            title: new.title,
            description: new.description,
            html: new.sources.html,
            css: new.sources.css,
            javascript: new.sources.javascript,
            is_public: new.is_public,
            user_id: new.user_id,
            created_at: stamp.clone(),
            updated_at: stamp,
            forks: 0,
            forked_from: None,
        };
        self.write(&record)?;
        Ok(record)
    }

    pub fn load(&self, id: &str) -> Result<SnippetRecord, StoreError> {
        let path = self.record_path(id);
        let content = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(id.to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        ron::from_str(&content)
            .map_err(|err| StoreError::Malformed(id.to_string(), err.to_string()))
    }

    /// Write back a modified record, refreshing its `updated_at` stamp.
    pub fn update(&self, mut record: SnippetRecord) -> Result<SnippetRecord, StoreError> {
        if !self.record_path(&record.id).exists() {
            return Err(StoreError::NotFound(record.id));
        }
        record.updated_at = (self.now)().to_rfc3339();
        self.write(&record)?;
        Ok(record)
    }

    pub fn delete(&self, id: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.record_path(id)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(id.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Copy an existing snippet under a new owner and title, stamping the
    /// lineage and bumping the original's fork count.
    pub fn fork(
        &self,
        id: &str,
        title: String,
        user_id: String,
    ) -> Result<SnippetRecord, StoreError> {
        let mut original = self.load(id)?;
        let now = (self.now)();
        let stamp = now.to_rfc3339();
        let fork = SnippetRecord {
            id: self.fresh_id(now),
            title,
            user_id,
            forked_from: Some(original.id.clone()),
            forks: 0,
            created_at: stamp.clone(),
            updated_at: stamp,
            ..original.clone()
        };
        self.write(&fork)?;

        original.forks += 1;
        self.update(original)?;
        Ok(fork)
    }

    /// All records in the store, oldest first. Malformed files are skipped.
    pub fn list(&self) -> Vec<SnippetRecord> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                pad_warn!("Failed to read snippet dir {:?}: {}", self.dir, err);
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("ron") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match self.load(id) {
                Ok(record) => records.push(record),
                Err(err) => pad_warn!("Skipping snippet file {:?}: {}", path, err),
            }
        }
        records.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        records
    }

    pub fn user_snippets(&self, user_id: &str) -> Vec<SnippetRecord> {
        self.list()
            .into_iter()
            .filter(|s| s.user_id == user_id)
            .collect()
    }

    pub fn public_snippets(&self) -> Vec<SnippetRecord> {
        self.list().into_iter().filter(|s| s.is_public).collect()
    }

    fn write(&self, record: &SnippetRecord) -> Result<(), StoreError> {
        let pretty = ron::ser::PrettyConfig::new();
        let content = ron::ser::to_string_pretty(record, pretty)
            .map_err(|err| StoreError::Malformed(record.id.clone(), err.to_string()))?;
        write_atomic(&self.dir, &format!("{}.ron", record.id), &content)?;
        Ok(())
    }

    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{id}.ron"))
    }

    /// Millisecond timestamp as the id, nudged past collisions from saves
    /// landing in the same millisecond.
    fn fresh_id(&self, now: DateTime<Utc>) -> String {
        let mut millis = now.timestamp_millis();
        loop {
            let id = millis.to_string();
            if !self.record_path(&id).exists() {
                return id;
            }
            millis += 1;
        }
    }
}
