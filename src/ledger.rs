// src/ledger.rs

use uuid::Uuid;

use crate::{
    config::Config,
    error::Result,
    models::user::User,
    store::{Snapshot, SnapshotStore},
};

/// The state handle every operation works through.
///
/// Owns the live snapshot, the backing store and the active identity. There
/// are no globals: the caller constructs one `Ledger` and passes it into
/// each operation.
#[derive(Debug)]
pub struct Ledger {
    config: Config,
    store: SnapshotStore,
    snapshot: Snapshot,
    active_user: Option<Uuid>,
}

impl Ledger {
    /// Opens the ledger, loading persisted state from the configured path
    /// (an absent file yields the empty ledger).
    pub fn open(config: Config) -> Result<Self> {
        let store = SnapshotStore::new(config.data_path.clone());
        let snapshot = store.load()?;
        Ok(Self {
            config,
            store,
            snapshot,
            active_user: None,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current committed state, for rendering.
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// The signed-in user, if any. Session identity is a runtime marker,
    /// never part of the persisted snapshot.
    pub fn active_user(&self) -> Option<&User> {
        self.active_user.and_then(|id| self.snapshot.user(id))
    }

    pub(crate) fn set_active_user(&mut self, id: Option<Uuid>) {
        self.active_user = id;
    }

    /// Atomically replaces the live snapshot.
    ///
    /// Operations stage every write on a clone and hand the finished
    /// candidate here; it is persisted first and swapped in only once the
    /// write succeeded, so a failed save never leaves a torn state.
    pub(crate) fn commit(&mut self, next: Snapshot) -> Result<()> {
        self.store.save(&next)?;
        self.snapshot = next;
        Ok(())
    }
}
