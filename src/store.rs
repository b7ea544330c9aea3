// src/store.rs

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    error::Result,
    models::{notification::Notification, query::Query, session::Session, user::User},
};

/// The whole persisted state: four independent collections cross-referenced
/// by id. This is the exact shape written to disk, so the ledger survives a
/// process restart byte-for-byte.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub queries: Vec<Query>,
    pub sessions: Vec<Session>,
    pub notifications: Vec<Notification>,
}

impl Snapshot {
    pub fn user(&self, id: Uuid) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn user_mut(&mut self, id: Uuid) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.id == id)
    }

    pub fn user_by_email(&self, email: &str) -> Option<&User> {
        self.users.iter().find(|u| u.email == email)
    }

    pub fn query(&self, id: Uuid) -> Option<&Query> {
        self.queries.iter().find(|q| q.id == id)
    }

    pub fn query_mut(&mut self, id: Uuid) -> Option<&mut Query> {
        self.queries.iter_mut().find(|q| q.id == id)
    }

    pub fn session(&self, id: Uuid) -> Option<&Session> {
        self.sessions.iter().find(|s| s.id == id)
    }

    pub fn session_mut(&mut self, id: Uuid) -> Option<&mut Session> {
        self.sessions.iter_mut().find(|s| s.id == id)
    }

    /// At most one session may ever reference a query.
    pub fn session_for_query(&self, query_id: Uuid) -> Option<&Session> {
        self.sessions.iter().find(|s| s.query_id == query_id)
    }
}

/// Synchronous file-backed persistence for the snapshot: one JSON document
/// at one fixed path, the moral equivalent of a single localStorage key.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the snapshot, treating a missing file as the empty state.
    pub fn load(&self) -> Result<Snapshot> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no snapshot file, starting empty");
            return Ok(Snapshot::default());
        }

        let raw = fs::read_to_string(&self.path)?;
        let snapshot: Snapshot = serde_json::from_str(&raw)?;
        tracing::debug!(
            users = snapshot.users.len(),
            queries = snapshot.queries.len(),
            sessions = snapshot.sessions.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Write-through save, invoked after every successful state transition.
    pub fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let raw = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, raw).inspect_err(|e| {
            tracing::error!(path = %self.path.display(), "failed to persist snapshot: {e}");
        })?;
        Ok(())
    }
}
