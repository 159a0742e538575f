use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use super::SessionStore;
use crate::error::StoreError;
use crate::session::{RecordId, SessionRecord};

/// In-memory [`SessionStore`] fake.
///
/// Backs unit tests and offline embedding; semantics match the remote
/// store (append-only, per-user streams, latest by `completed_at`).
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Vec<(RecordId, SessionRecord)>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<(RecordId, SessionRecord)>>> {
        self.records.lock().expect("memory store mutex poisoned")
    }
}

impl SessionStore for MemoryStore {
    async fn query_latest(&self, user_id: &str) -> Result<Option<SessionRecord>, StoreError> {
        let records = self.lock();
        Ok(records
            .get(user_id)
            .and_then(|stream| stream.iter().max_by_key(|(_, r)| r.completed_at))
            .map(|(_, r)| r.clone()))
    }

    async fn query_all(&self, user_id: &str) -> Result<Vec<SessionRecord>, StoreError> {
        let records = self.lock();
        let mut all: Vec<SessionRecord> = records
            .get(user_id)
            .map(|stream| stream.iter().map(|(_, r)| r.clone()).collect())
            .unwrap_or_default();
        all.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(all)
    }

    async fn append(
        &self,
        user_id: &str,
        record: &SessionRecord,
    ) -> Result<RecordId, StoreError> {
        let id = RecordId(Uuid::new_v4().to_string());
        self.lock()
            .entry(user_id.to_string())
            .or_default()
            .push((id.clone(), record.clone()));
        Ok(id)
    }
}
