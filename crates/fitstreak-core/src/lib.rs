//! # Fitstreak Core Library
//!
//! Core business logic for the Fitstreak workout tracker. All
//! operations are available through the standalone CLI binary, which
//! is a thin layer over this library.
//!
//! ## Architecture
//!
//! - **Session timer**: a discrete countdown state machine ticked once
//!   per second by a [`TickDriver`] scoped to the session's lifetime
//! - **Session recording**: on completion, the latest prior record is
//!   read from the remote store, the consecutive-day streak is derived
//!   (UTC calendar days) and a new record is appended
//! - **Store**: the remote realtime-database REST client behind the
//!   [`SessionStore`] trait, with an in-memory fake for tests
//! - **Storage**: TOML configuration and a small SQLite kv store for
//!   local state such as the signed-in identity
//!
//! ## Key Components
//!
//! - [`SessionTimer`]: timer state machine
//! - [`SessionRecorder`]: completion/streak recording workflow
//! - [`RemoteStore`] / [`MemoryStore`]: store implementations
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod identity;
pub mod session;
pub mod storage;
pub mod store;
pub mod timer;

pub use error::{ConfigError, CoreError, Result, StoreError, TimerError};
pub use events::Event;
pub use identity::{IdentityProvider, KvIdentity, StaticIdentity};
pub use session::{
    next_streak, CompletionOutcome, Difficulty, RecordId, RecordWarning, SessionRecord,
    SessionRecorder,
};
pub use storage::{Config, Database, StoreConfig, WorkoutConfig};
pub use store::{MemoryStore, RemoteStore, SessionStore};
pub use timer::{SessionTimer, TickDriver, TimerStatus};
