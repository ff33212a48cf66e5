//! Chapters and missions.
//!
//! A chapter unlocks once the ledger's XP reaches its threshold. Thresholds
//! strictly increase with the chapter number, so unlocking is monotonic in XP.

use std::fmt;

use crate::error::{QuestError, QuestResult};
use crate::ledger::ProgressLedger;

/// Mission identifier, unique across all chapters.
pub type MissionId = u32;

/// How hard a mission is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    /// First steps.
    Beginner,
    /// Needs the basics.
    Intermediate,
    /// Rewrites history.
    Advanced,
    /// The hard stuff.
    Legendary,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beginner => write!(f, "Beginner"),
            Self::Intermediate => write!(f, "Intermediate"),
            Self::Advanced => write!(f, "Advanced"),
            Self::Legendary => write!(f, "Legendary"),
        }
    }
}

/// A mission: practice a set of commands for an XP reward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissionSpec {
    /// Unique mission id.
    pub id: MissionId,
    /// Owning chapter.
    pub chapter: u32,
    /// Display name.
    pub name: &'static str,
    /// Canonical grammar keys that must be issued to complete the mission.
    pub commands: &'static [&'static str],
    /// XP awarded on completion.
    pub xp: u32,
    /// Difficulty label.
    pub difficulty: Difficulty,
}

/// A chapter: a group of missions behind an XP threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterSpec {
    /// Chapter number, starting at 1.
    pub id: u32,
    /// Display title.
    pub title: &'static str,
    /// One-line summary.
    pub description: &'static str,
    /// XP needed to unlock (inclusive).
    pub unlock_xp: u32,
    /// Missions in this chapter.
    pub missions: &'static [MissionSpec],
}

impl ChapterSpec {
    /// Whether this chapter is unlocked for the ledger.
    pub fn is_unlocked(&self, ledger: &ProgressLedger) -> bool {
        ledger.xp >= self.unlock_xp
    }

    /// Whether every mission in this chapter is completed.
    pub fn is_completed(&self, ledger: &ProgressLedger) -> bool {
        self.missions.iter().all(|m| ledger.has_completed(m.id))
    }
}

const fn mission_spec(
    id: MissionId,
    chapter: u32,
    name: &'static str,
    commands: &'static [&'static str],
    xp: u32,
    difficulty: Difficulty,
) -> MissionSpec {
    MissionSpec {
        id,
        chapter,
        name,
        commands,
        xp,
        difficulty,
    }
}

static CHAPTERS: &[ChapterSpec] = &[
    ChapterSpec {
        id: 1,
        title: "Repository Genesis",
        description: "Learn the fundamentals of Git repositories",
        unlock_xp: 0,
        missions: &[
            mission_spec(1, 1, "First Repository", &["git init"], 50, Difficulty::Beginner),
            mission_spec(2, 1, "Adding Files", &["git add ."], 75, Difficulty::Beginner),
            mission_spec(3, 1, "First Commit", &["git commit -m"], 100, Difficulty::Beginner),
        ],
    },
    ChapterSpec {
        id: 2,
        title: "Branch Mastery",
        description: "Master the art of branching and merging",
        unlock_xp: 200,
        missions: &[
            mission_spec(
                4,
                2,
                "Create Branch",
                &["git branch", "git checkout -b"],
                125,
                Difficulty::Intermediate,
            ),
            mission_spec(5, 2, "Switch Branches", &["git checkout"], 100, Difficulty::Intermediate),
            mission_spec(6, 2, "Merge Magic", &["git merge"], 150, Difficulty::Intermediate),
        ],
    },
    ChapterSpec {
        id: 3,
        title: "Time Manipulation",
        description: "Control your project's history",
        unlock_xp: 500,
        missions: &[
            mission_spec(7, 3, "View History", &["git log"], 100, Difficulty::Intermediate),
            mission_spec(8, 3, "Reset Changes", &["git reset"], 175, Difficulty::Advanced),
            mission_spec(9, 3, "Revert Commits", &["git revert"], 200, Difficulty::Advanced),
        ],
    },
    ChapterSpec {
        id: 4,
        title: "Remote Collaboration",
        description: "Connect with the Git universe",
        unlock_xp: 800,
        missions: &[
            mission_spec(10, 4, "Clone Repository", &["git clone"], 150, Difficulty::Intermediate),
            mission_spec(11, 4, "Push to Remote", &["git push"], 175, Difficulty::Intermediate),
            mission_spec(12, 4, "Pull Updates", &["git pull"], 150, Difficulty::Intermediate),
        ],
    },
    ChapterSpec {
        id: 5,
        title: "Advanced Techniques",
        description: "Master the most powerful Git features",
        unlock_xp: 1200,
        missions: &[
            mission_spec(13, 5, "Interactive Rebase", &["git rebase -i"], 250, Difficulty::Legendary),
            mission_spec(14, 5, "Stash Management", &["git stash"], 200, Difficulty::Advanced),
            mission_spec(15, 5, "Cherry Pick", &["git cherry-pick"], 225, Difficulty::Legendary),
        ],
    },
];

/// All chapters in order.
pub fn chapters() -> &'static [ChapterSpec] {
    CHAPTERS
}

/// Look up a chapter by number.
pub fn chapter(id: u32) -> Option<&'static ChapterSpec> {
    CHAPTERS.iter().find(|c| c.id == id)
}

/// XP threshold of a chapter, if it exists.
pub fn chapter_threshold(id: u32) -> Option<u32> {
    chapter(id).map(|c| c.unlock_xp)
}

/// Whether chapter `id` is unlocked. Unknown chapters are never unlocked.
pub fn is_chapter_unlocked(ledger: &ProgressLedger, id: u32) -> bool {
    chapter(id).is_some_and(|c| c.is_unlocked(ledger))
}

/// Look up a mission and its chapter.
pub fn mission(id: MissionId) -> Option<(&'static ChapterSpec, &'static MissionSpec)> {
    CHAPTERS
        .iter()
        .find_map(|c| c.missions.iter().find(|m| m.id == id).map(|m| (c, m)))
}

/// Gate a mission start against the ledger.
///
/// Rejects unknown missions, missions in locked chapters, and missions that
/// are already completed, in that order. Never touches the ledger.
pub fn check_mission_start(
    ledger: &ProgressLedger,
    id: MissionId,
) -> QuestResult<&'static MissionSpec> {
    let (chapter, mission) = mission(id).ok_or(QuestError::MissionNotFound(id))?;

    if !chapter.is_unlocked(ledger) {
        return Err(QuestError::ChapterLocked {
            chapter: chapter.id,
            title: chapter.title.to_string(),
        });
    }

    if ledger.has_completed(id) {
        return Err(QuestError::MissionAlreadyCompleted(id));
    }

    Ok(mission)
}

/// The chapter a ledger has progressed to.
///
/// One past the last fully completed leading chapter, capped at the final
/// chapter, and never lower than the ledger's current chapter.
pub fn progressed_chapter(ledger: &ProgressLedger) -> u32 {
    let done = CHAPTERS
        .iter()
        .take_while(|c| c.is_completed(ledger))
        .count() as u32;
    let last = CHAPTERS.last().map_or(1, |c| c.id);
    (done + 1).min(last).max(ledger.current_chapter)
}
