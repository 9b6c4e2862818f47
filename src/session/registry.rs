//! Session registry: the in-memory store of live sessions.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{
    Clock, LoginFields, SessionId, SessionRecord, SessionSnapshot, SystemClock, UpdateFields,
};
use crate::error::SessionTrackerError;
use crate::network::{HostNetworkInfo, SystemNetworkInfo};
use crate::Result;

/// Thread-safe registry of session records.
///
/// Records live from [`create`](Self::create) until
/// [`delete`](Self::delete). Nothing expires them; idle and total durations
/// are computed on demand for display.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<SessionId, SessionRecord>>,
    network: Arc<dyn HostNetworkInfo>,
    clock: Arc<dyn Clock>,
}

impl SessionRegistry {
    /// Create an empty registry reading the host's interfaces and the
    /// system clock.
    pub fn new() -> Self {
        Self::with_sources(Arc::new(SystemNetworkInfo::default()), Arc::new(SystemClock))
    }

    /// Create an empty registry with explicit network and time sources.
    pub fn with_sources(network: Arc<dyn HostNetworkInfo>, clock: Arc<dyn Clock>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            network,
            clock,
        }
    }

    fn read_lock(&self) -> Result<RwLockReadGuard<'_, HashMap<SessionId, SessionRecord>>> {
        self.sessions
            .read()
            .map_err(|_| SessionTrackerError::LockPoisoned)
    }

    fn write_lock(&self) -> Result<RwLockWriteGuard<'_, HashMap<SessionId, SessionRecord>>> {
        self.sessions
            .write()
            .map_err(|_| SessionTrackerError::LockPoisoned)
    }

    /// Register a new session for a validated login.
    ///
    /// Fails with [`SessionTrackerError::Validation`] when any identity
    /// field is missing or blank; nothing is stored in that case.
    pub fn create(&self, fields: LoginFields, client_ip: &str) -> Result<SessionRecord> {
        let fields = fields.validate()?;
        let server_info = self.network.server_info();
        let now = self.clock.now();

        let mut sessions = self.write_lock()?;

        let mut id = SessionId::new();
        while sessions.contains_key(&id) {
            id = SessionId::new();
        }

        let record = SessionRecord::new(id, fields, client_ip, server_info, now);
        sessions.insert(id, record.clone());

        tracing::info!(session_id = %id, email = %record.email, "session created");
        Ok(record)
    }

    /// Look up a session.
    ///
    /// Refreshes the stored client address and server info but leaves
    /// `last_accessed` alone, so the returned idle time reflects the last
    /// update rather than this query.
    pub fn read(&self, id: &SessionId, client_ip: &str) -> Result<SessionSnapshot> {
        let server_info = self.network.server_info();
        let now = self.clock.now();

        let mut sessions = self.write_lock()?;
        let record = sessions.get_mut(id).ok_or_else(|| not_found(id))?;

        record.server_info = server_info;
        record.client_info.ip = client_ip.to_string();

        Ok(record.snapshot(now))
    }

    /// Apply `fields` to a session and mark it as accessed.
    pub fn update(
        &self,
        id: &SessionId,
        fields: UpdateFields,
        client_ip: &str,
    ) -> Result<SessionRecord> {
        let server_info = self.network.server_info();
        let now = self.clock.now();

        let mut sessions = self.write_lock()?;
        let record = sessions.get_mut(id).ok_or_else(|| not_found(id))?;

        fields.apply_to(record);
        record.client_info.ip = client_ip.to_string();
        record.server_info = server_info;
        record.touch(now);

        tracing::info!(session_id = %id, "session updated");
        Ok(record.clone())
    }

    /// Remove a session, returning its final state.
    ///
    /// Deleting an id twice reports not-found the second time.
    pub fn delete(&self, id: &SessionId) -> Result<SessionRecord> {
        let mut sessions = self.write_lock()?;
        let record = sessions.remove(id).ok_or_else(|| not_found(id))?;

        tracing::info!(session_id = %id, "session deleted");
        Ok(record)
    }

    /// Snapshot every live session, oldest first.
    ///
    /// The caller's current address and the current server info are
    /// applied to every entry; only the MAC supplied at login is kept per
    /// record. Stored records are not modified.
    pub fn list(&self, client_ip: &str) -> Result<Vec<SessionSnapshot>> {
        let server_info = self.network.server_info();
        let now = self.clock.now();

        let sessions = self.read_lock()?;
        let mut snapshots: Vec<SessionSnapshot> = sessions
            .values()
            .map(|record| {
                let mut snapshot = record.snapshot(now);
                snapshot.record.client_info.ip = client_ip.to_string();
                snapshot.record.server_info = server_info.clone();
                snapshot
            })
            .collect();
        drop(sessions);

        snapshots.sort_by(|a, b| {
            a.record
                .created_at
                .cmp(&b.record.created_at)
                .then_with(|| a.record.session_id.cmp(&b.record.session_id))
        });
        Ok(snapshots)
    }

    /// Check if a session exists.
    pub fn contains(&self, id: &SessionId) -> Result<bool> {
        Ok(self.read_lock()?.contains_key(id))
    }

    /// Get the number of live sessions.
    pub fn count(&self) -> Result<usize> {
        Ok(self.read_lock()?.len())
    }

    /// Current server info as seen by the registry.
    pub fn server_info(&self) -> crate::network::ServerInfo {
        self.network.server_info()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn not_found(id: &SessionId) -> SessionTrackerError {
    tracing::debug!(session_id = %id, "session lookup missed");
    SessionTrackerError::SessionNotFound(id.to_string())
}
