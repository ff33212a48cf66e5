//! Core types for GitQuest: the command grammar, the matcher, the progress
//! ledger, and the mission and badge catalogs.
//!
//! Everything in this crate is pure. Static tables are built once on first
//! use and are read-only afterwards; every gating decision (level, chapter
//! unlock, badge unlock) is a query over a [`ProgressLedger`].

/// Static chapter, mission, and badge catalogs.
pub mod catalog;
/// Error taxonomy for recoverable outcomes.
pub mod error;
/// The static command grammar table.
pub mod grammar;
/// The persistent progress record and its derived queries.
pub mod ledger;
/// Resolving raw input lines against the grammar table.
pub mod matcher;

/// Re-export catalog types.
pub use catalog::{BadgeSpec, ChapterSpec, Difficulty, MissionId, MissionSpec, Rarity};
/// Re-export error types.
pub use error::{QuestError, QuestResult};
/// Re-export grammar types.
pub use grammar::{CLEAR_KEY, CommandSpec, GrammarTable, HELP_KEY};
/// Re-export ledger types.
pub use ledger::{LedgerUpdate, ProgressLedger};
/// Re-export matcher types.
pub use matcher::{MatchResult, match_input, normalize};
