//! Badge definitions.
//!
//! A badge is unlocked exactly when its predicate holds for the current
//! ledger. Nothing is cached: every query re-evaluates.

use std::fmt;

use crate::ledger::ProgressLedger;

/// How rare a badge is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rarity {
    /// Most learners get it.
    Common,
    /// A little effort.
    Uncommon,
    /// Real progress.
    Rare,
    /// Sustained progress.
    Epic,
    /// Near flawless.
    Legendary,
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Common => write!(f, "Common"),
            Self::Uncommon => write!(f, "Uncommon"),
            Self::Rare => write!(f, "Rare"),
            Self::Epic => write!(f, "Epic"),
            Self::Legendary => write!(f, "Legendary"),
        }
    }
}

/// A badge and its unlock rule.
#[derive(Debug, Clone, Copy)]
pub struct BadgeSpec {
    /// Stable id stored in the ledger.
    pub id: &'static str,
    /// Display name.
    pub name: &'static str,
    /// What earns it.
    pub description: &'static str,
    /// Rarity tier.
    pub rarity: Rarity,
    predicate: fn(&ProgressLedger) -> bool,
}

impl BadgeSpec {
    /// Whether the badge is unlocked for the ledger.
    pub fn is_unlocked(&self, ledger: &ProgressLedger) -> bool {
        (self.predicate)(ledger)
    }
}

fn first_commit(l: &ProgressLedger) -> bool {
    l.correct_commands >= 3
}

fn command_master(l: &ProgressLedger) -> bool {
    l.correct_commands >= 10
}

fn branch_wizard(l: &ProgressLedger) -> bool {
    l.xp >= 500
}

fn merge_master(l: &ProgressLedger) -> bool {
    l.xp >= 300
}

fn git_guardian(l: &ProgressLedger) -> bool {
    l.level() >= 5
}

fn perfectionist(l: &ProgressLedger) -> bool {
    l.total_commands > 0 && l.accuracy() >= 0.95
}

fn streak_master(l: &ProgressLedger) -> bool {
    l.streak >= 7
}

fn explorer(l: &ProgressLedger) -> bool {
    l.current_chapter > 1
}

static BADGES: [BadgeSpec; 8] = [
    BadgeSpec {
        id: "first-commit",
        name: "First Commit",
        description: "Made your first commit",
        rarity: Rarity::Common,
        predicate: first_commit,
    },
    BadgeSpec {
        id: "command-master",
        name: "Command Master",
        description: "Executed 10 correct commands",
        rarity: Rarity::Uncommon,
        predicate: command_master,
    },
    BadgeSpec {
        id: "branch-wizard",
        name: "Branch Wizard",
        description: "Mastered branching commands",
        rarity: Rarity::Rare,
        predicate: branch_wizard,
    },
    BadgeSpec {
        id: "merge-master",
        name: "Merge Master",
        description: "Successfully merged branches",
        rarity: Rarity::Uncommon,
        predicate: merge_master,
    },
    BadgeSpec {
        id: "git-guardian",
        name: "Git Guardian",
        description: "Reached level 5",
        rarity: Rarity::Epic,
        predicate: git_guardian,
    },
    BadgeSpec {
        id: "perfectionist",
        name: "Perfectionist",
        description: "95% command accuracy",
        rarity: Rarity::Legendary,
        predicate: perfectionist,
    },
    BadgeSpec {
        id: "streak-master",
        name: "Streak Master",
        description: "7-day learning streak",
        rarity: Rarity::Epic,
        predicate: streak_master,
    },
    BadgeSpec {
        id: "explorer",
        name: "Explorer",
        description: "Completed first chapter",
        rarity: Rarity::Common,
        predicate: explorer,
    },
];

/// All badges in display order.
pub fn badges() -> &'static [BadgeSpec] {
    &BADGES
}

/// Look up a badge by id.
pub fn badge(id: &str) -> Option<&'static BadgeSpec> {
    BADGES.iter().find(|b| b.id == id)
}

/// Badges unlocked for the ledger, in display order.
pub fn unlocked_badges(ledger: &ProgressLedger) -> impl Iterator<Item = &'static BadgeSpec> + '_ {
    BADGES.iter().filter(move |b| b.is_unlocked(ledger))
}

/// Badges still locked for the ledger, in display order.
pub fn locked_badges(ledger: &ProgressLedger) -> impl Iterator<Item = &'static BadgeSpec> + '_ {
    BADGES.iter().filter(move |b| !b.is_unlocked(ledger))
}
