//! Note service interface and the local JSON snapshot store.
//!
//! The wall only ever reads notes through [`NoteService`]. [`JsonNoteStore`] keeps
//! a snapshot in a JSON file and re-reads it on every [`NoteService::sync`], which
//! lets another process (an exporter, a sync daemon) keep the file current.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::note::Note;

/// Opaque label handle
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LabelId(pub String);

/// Filter for [`NoteService::find`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteQuery {
    pub archived: bool,
    pub trashed: bool,
    /// Notes must carry at least one of these. Empty matches every note.
    pub labels: Vec<LabelId>,
}

impl NoteQuery {
    pub fn matches(&self, note: &Note) -> bool {
        note.archived == self.archived
            && note.trashed == self.trashed
            && (self.labels.is_empty() || self.labels.iter().any(|l| note.labels.contains(&l.0)))
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read note snapshot {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse note snapshot {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("snapshot belongs to {expected}, not {actual}")]
    WrongAccount { expected: String, actual: String },
    #[error("invalid credentials for {0}")]
    InvalidCredentials(String),
    #[error("not logged in")]
    NotLoggedIn,
}

/// Source of notes for the wall
pub trait NoteService {
    /// Authenticate. Called once at startup.
    fn login(&mut self, username: &str, secret: &str) -> Result<(), StoreError>;
    /// Bring the local view up to date
    fn sync(&mut self) -> Result<(), StoreError>;
    fn find_label(&self, name: &str) -> Option<LabelId>;
    fn find(&self, query: &NoteQuery) -> Vec<Note>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    pub id: String,
    pub name: String,
}

/// On-disk snapshot format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Account the snapshot was exported for
    pub account: Option<String>,
    /// Token required to open the snapshot, if any
    pub token: Option<String>,
    pub labels: Vec<Label>,
    pub notes: Vec<Note>,
}

/// Note service backed by a JSON snapshot file
#[derive(Debug)]
pub struct JsonNoteStore {
    path: PathBuf,
    snapshot: Snapshot,
    account: Option<String>,
}

impl JsonNoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            snapshot: Snapshot::default(),
            account: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Snapshot, StoreError> {
        let content = std::fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }
}

impl NoteService for JsonNoteStore {
    fn login(&mut self, username: &str, secret: &str) -> Result<(), StoreError> {
        let snapshot = self.read()?;
        if let Some(expected) = &snapshot.account {
            if expected != username {
                return Err(StoreError::WrongAccount {
                    expected: expected.clone(),
                    actual: username.to_string(),
                });
            }
        }
        if snapshot.token.as_deref().is_some_and(|token| token != secret) {
            return Err(StoreError::InvalidCredentials(username.to_string()));
        }
        tracing::info!("Logged in as {} ({})", username, self.path.display());
        self.account = Some(username.to_string());
        self.snapshot = snapshot;
        Ok(())
    }

    fn sync(&mut self) -> Result<(), StoreError> {
        if self.account.is_none() {
            return Err(StoreError::NotLoggedIn);
        }
        self.snapshot = self.read()?;
        tracing::debug!("Synced {} notes", self.snapshot.notes.len());
        Ok(())
    }

    fn find_label(&self, name: &str) -> Option<LabelId> {
        self.snapshot
            .labels
            .iter()
            .find(|label| label.name.eq_ignore_ascii_case(name))
            .map(|label| LabelId(label.id.clone()))
    }

    fn find(&self, query: &NoteQuery) -> Vec<Note> {
        self.snapshot
            .notes
            .iter()
            .filter(|note| query.matches(note))
            .cloned()
            .collect()
    }
}
