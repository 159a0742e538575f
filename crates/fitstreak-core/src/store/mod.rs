//! Session store abstraction.
//!
//! The recorder and CLI never talk to the backend directly; they go
//! through [`SessionStore`], so the hosted realtime database can be
//! swapped for the in-memory fake in tests.

mod memory;
mod remote;

pub use memory::MemoryStore;
pub use remote::RemoteStore;

use crate::error::StoreError;
use crate::session::{RecordId, SessionRecord};

/// Asynchronous, possibly-failing persistence for one user's
/// append-only stream of completed sessions.
#[allow(async_fn_in_trait)]
pub trait SessionStore {
    /// The most recent record for `user_id`, by `completed_at`.
    async fn query_latest(&self, user_id: &str) -> Result<Option<SessionRecord>, StoreError>;

    /// All records for `user_id`, most recent first.
    async fn query_all(&self, user_id: &str) -> Result<Vec<SessionRecord>, StoreError>;

    /// Append a record under a store-generated id. Never overwrites.
    async fn append(&self, user_id: &str, record: &SessionRecord)
        -> Result<RecordId, StoreError>;
}
