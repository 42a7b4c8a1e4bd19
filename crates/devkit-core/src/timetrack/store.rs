//! File-backed session store.
//!
//! The document is read fully, changed in memory and rewritten on every
//! mutation. Mutations hold an exclusive lock on `state.json.lock` for the whole
//! read-modify-write cycle, and writes go to a temp file that is renamed over
//! the state file, so a crash mid-write never leaves truncated JSON behind.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fd_lock::RwLock;

use super::report::{build_report, ProjectTotal, ReportQuery};
use super::session::{format_timestamp, Session, SessionDocument, SessionRecord};
use crate::error::StoreError;

/// Subdirectory of the data dir owned by the time tracker.
pub const STATE_DIR: &str = "time_tracker";

pub const STATE_FILENAME: &str = "state.json";

/// Result of [`SessionStore::start`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started(Session),
    /// A session is already open; nothing was written.
    AlreadyActive { project: String, start: String },
}

/// Result of [`SessionStore::stop`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopOutcome {
    Stopped {
        project: String,
        /// `None` when the stored start time does not parse.
        seconds: Option<i64>,
    },
    /// No open session; nothing was written.
    Idle,
}

/// Result of [`SessionStore::status`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusOutcome {
    Tracking { session: Session, elapsed: i64 },
    /// An open record exists but its fields do not parse.
    Unreadable { project: String, start: String },
    Idle,
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<data_dir>/time_tracker/state.json`, creating the directory.
    pub fn in_data_dir(data_dir: &Path) -> Result<Self, StoreError> {
        let dir = data_dir.join(STATE_DIR);
        fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
        Ok(Self::new(dir.join(STATE_FILENAME)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the document. A missing, unreadable or corrupted file reads as empty.
    pub fn load(&self) -> SessionDocument {
        if !self.path.exists() {
            return SessionDocument::default();
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Failed to read session state, using empty document");
                return SessionDocument::default();
            }
        };

        match serde_json::from_str(&contents) {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(path = ?self.path, error = %e, "Invalid session state, using empty document");
                SessionDocument::default()
            }
        }
    }

    /// Replace the file with `doc` (temp file + rename).
    pub fn save(&self, doc: &SessionDocument) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let data = serde_json::to_string_pretty(doc)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, data).map_err(|e| StoreError::io(&tmp_path, e))?;
        fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;
        Ok(())
    }

    /// Open a session for `project` unless one is already open.
    pub fn start(&self, project: &str, now: DateTime<Utc>) -> Result<StartOutcome, StoreError> {
        self.with_lock(|| {
            let mut doc = self.load();
            if let Some(active) = doc.active_record() {
                return Ok(StartOutcome::AlreadyActive {
                    project: active.display_field("project"),
                    start: active.display_field("start"),
                });
            }

            doc.sessions.push(SessionRecord::open(project, now));
            self.save(&doc)?;
            tracing::info!(project, start = %format_timestamp(now), "Session started");

            Ok(StartOutcome::Started(Session {
                project: project.to_string(),
                start: now,
                end: None,
            }))
        })
    }

    /// Close the open session, if any.
    pub fn stop(&self, now: DateTime<Utc>) -> Result<StopOutcome, StoreError> {
        self.with_lock(|| {
            let mut doc = self.load();
            let Some(index) = doc.active_index() else {
                return Ok(StopOutcome::Idle);
            };

            let record = &mut doc.sessions[index];
            record.close(now);
            let project = record.display_field("project");
            let seconds = record.parse().map(|s| s.duration_seconds(now));

            self.save(&doc)?;
            tracing::info!(project = %project, "Session stopped");
            Ok(StopOutcome::Stopped { project, seconds })
        })
    }

    /// The open session and its elapsed whole seconds.
    ///
    /// Agrees with [`start`](Self::start) on what counts as open: an open record
    /// whose fields do not parse is reported as [`StatusOutcome::Unreadable`].
    pub fn status(&self, now: DateTime<Utc>) -> StatusOutcome {
        let doc = self.load();
        let Some(record) = doc.active_record() else {
            return StatusOutcome::Idle;
        };
        match record.parse() {
            Some(session) => {
                let elapsed = session.duration_seconds(now);
                StatusOutcome::Tracking { session, elapsed }
            }
            None => StatusOutcome::Unreadable {
                project: record.display_field("project"),
                start: record.display_field("start"),
            },
        }
    }

    pub fn report(&self, query: &ReportQuery, now: DateTime<Utc>) -> Vec<ProjectTotal> {
        build_report(&self.load(), query, now)
    }

    /// Write the whole document to `dest`, returning what was written.
    pub fn export(&self, dest: &Path) -> Result<SessionDocument, StoreError> {
        let doc = self.load();
        let data = serde_json::to_string_pretty(&doc)?;
        fs::write(dest, data).map_err(|e| StoreError::io(dest, e))?;
        Ok(doc)
    }

    fn with_lock<T>(&self, f: impl FnOnce() -> Result<T, StoreError>) -> Result<T, StoreError> {
        let lock_path = self.path.with_extension("json.lock");
        if let Some(parent) = lock_path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(&lock_path)
            .map_err(|e| StoreError::io(&lock_path, e))?;

        let mut lock = RwLock::new(file);
        let _guard = lock.write().map_err(|e| StoreError::io(&lock_path, e))?;
        f()
    }
}
