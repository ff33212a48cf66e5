//! Error types for recoverable quest outcomes.

use crate::catalog::MissionId;

/// Result type for quest operations.
pub type QuestResult<T> = Result<T, QuestError>;

/// Recoverable outcomes that reject or fail an action.
///
/// None of these are fatal. They are handed back to the caller as values and
/// the ledger is left untouched unless the variant says otherwise.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuestError {
    /// The input matched no grammar key. The attempt still counts toward
    /// the ledger's total.
    #[error("command not recognized: {0}")]
    UnrecognizedCommand(String),

    /// A mission was started in a chapter whose XP threshold is not met.
    #[error("chapter {chapter} ({title}) is locked")]
    ChapterLocked {
        /// Chapter number.
        chapter: u32,
        /// Chapter title.
        title: String,
    },

    /// The mission is already recorded as completed.
    #[error("mission {0} already completed")]
    MissionAlreadyCompleted(MissionId),

    /// No mission with this id exists in the catalog.
    #[error("mission not found: {0}")]
    MissionNotFound(MissionId),

    /// The persistence adapter could not load or save the ledger.
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}
