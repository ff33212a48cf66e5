//! Command execution and session state for GitQuest.
//!
//! The [`Executor`] turns one terminal line into transcript entries, a new
//! ledger, and notifications. The mission transitions in [`transitions`] do
//! the same for starting, completing, and resetting. A [`Session`] strings
//! them together one step at a time: execute, update the transcript and the
//! commit graph, merge the ledger, then save it through a [`ProgressStore`].

pub mod config;
pub mod effect;
pub mod error;
pub mod executor;
pub mod graph;
pub mod session;
pub mod store;
pub mod transcript;
pub mod transitions;

pub use config::EngineConfig;
pub use effect::{Notification, NotificationKind, NotificationSink};
pub use error::{StoreError, StoreResult};
pub use executor::{Execution, Executor, TranscriptUpdate};
pub use graph::{CommitGraph, GraphAction, GraphCommit, GraphRejection};
pub use session::{Session, Turn};
pub use store::{JsonFileStore, MemoryStore, ProgressStore};
pub use transcript::{EntryKind, Transcript, TranscriptEntry};
pub use transitions::Transition;
