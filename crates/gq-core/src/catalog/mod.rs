//! Static content catalogs and the gating rules evaluated against a ledger.

/// Badge definitions and unlock predicates.
pub mod badge;
/// Chapters, missions, and chapter gating.
pub mod chapter;

pub use badge::{BadgeSpec, Rarity, badge, badges, locked_badges, unlocked_badges};
pub use chapter::{
    ChapterSpec, Difficulty, MissionId, MissionSpec, chapter, chapter_threshold, chapters,
    check_mission_start, is_chapter_unlocked, mission, progressed_chapter,
};
