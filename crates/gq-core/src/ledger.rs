//! The progress ledger: one mutable record per learner session.
//!
//! Mutation goes through [`ProgressLedger::merged`], which applies a partial
//! [`LedgerUpdate`] (unspecified fields keep their value) and re-syncs the
//! stored `level` and `unlocked_badges` snapshot. Gating decisions never read
//! those snapshots; they call the derived queries, which re-evaluate every
//! time.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::catalog::{self, MissionId};

/// XP needed per level.
pub const XP_PER_LEVEL: u32 = 100;

/// Level reached with `xp` experience: `floor(xp / 100) + 1`.
pub fn level_for_xp(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

/// The persistent progress record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProgressLedger {
    /// Stored level, kept equal to [`level_for_xp`] of `xp`.
    pub level: u32,
    /// Total experience.
    pub xp: u32,
    /// Completed mission ids.
    pub completed_missions: BTreeSet<MissionId>,
    /// Snapshot of badge ids unlocked at the last mutation.
    pub unlocked_badges: BTreeSet<String>,
    /// The chapter the learner is working through.
    pub current_chapter: u32,
    /// Consecutive learning days.
    pub streak: u32,
    /// Every command attempted, accepted or not.
    pub total_commands: u32,
    /// Accepted commands. Never exceeds `total_commands`.
    pub correct_commands: u32,
    /// Day of the last recorded activity, for streak tracking.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_active_on: Option<NaiveDate>,
}

impl Default for ProgressLedger {
    fn default() -> Self {
        Self {
            level: 1,
            xp: 0,
            completed_missions: BTreeSet::new(),
            unlocked_badges: BTreeSet::new(),
            current_chapter: 1,
            streak: 0,
            total_commands: 0,
            correct_commands: 0,
            last_active_on: None,
        }
    }
}

/// A partial update. `None` fields leave the ledger value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerUpdate {
    /// New XP total.
    pub xp: Option<u32>,
    /// New completed mission set.
    pub completed_missions: Option<BTreeSet<MissionId>>,
    /// New current chapter.
    pub current_chapter: Option<u32>,
    /// New streak.
    pub streak: Option<u32>,
    /// New total command count.
    pub total_commands: Option<u32>,
    /// New correct command count.
    pub correct_commands: Option<u32>,
    /// New last activity day.
    pub last_active_on: Option<NaiveDate>,
}

impl LedgerUpdate {
    /// Whether applying this update would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl ProgressLedger {
    /// A fresh ledger. Same as [`Default`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a partial update and return the new ledger.
    pub fn merged(&self, update: LedgerUpdate) -> Self {
        let mut next = self.clone();
        if let Some(xp) = update.xp {
            next.xp = xp;
        }
        if let Some(missions) = update.completed_missions {
            next.completed_missions = missions;
        }
        if let Some(chapter) = update.current_chapter {
            next.current_chapter = chapter.max(1);
        }
        if let Some(streak) = update.streak {
            next.streak = streak;
        }
        if let Some(total) = update.total_commands {
            next.total_commands = total;
        }
        if let Some(correct) = update.correct_commands {
            next.correct_commands = correct;
        }
        if let Some(day) = update.last_active_on {
            next.last_active_on = Some(day);
        }
        next.synced()
    }

    /// Re-sync the stored `level` and `unlocked_badges` snapshot.
    ///
    /// Also clamps `correct_commands` to `total_commands`, so a ledger read
    /// from storage is repaired before anything evaluates it.
    pub fn synced(mut self) -> Self {
        self.correct_commands = self.correct_commands.min(self.total_commands);
        self.level = level_for_xp(self.xp);
        self.unlocked_badges = catalog::unlocked_badges(&self)
            .map(|b| b.id.to_string())
            .collect();
        self
    }

    /// Current level, derived from XP.
    pub fn level(&self) -> u32 {
        level_for_xp(self.xp)
    }

    /// XP earned inside the current level.
    pub fn xp_into_level(&self) -> u32 {
        self.xp % XP_PER_LEVEL
    }

    /// XP still needed for the next level.
    pub fn xp_to_next_level(&self) -> u32 {
        XP_PER_LEVEL - self.xp_into_level()
    }

    /// Share of accepted commands, `0.0` before any attempt.
    pub fn accuracy(&self) -> f64 {
        if self.total_commands == 0 {
            return 0.0;
        }
        f64::from(self.correct_commands) / f64::from(self.total_commands)
    }

    /// Accuracy as a rounded percentage.
    pub fn accuracy_percent(&self) -> u32 {
        (self.accuracy() * 100.0).round() as u32
    }

    /// Whether a mission id is recorded as completed.
    pub fn has_completed(&self, mission: MissionId) -> bool {
        self.completed_missions.contains(&mission)
    }

    /// Streak update for activity on `today`.
    ///
    /// Same day: unchanged. Next day: +1. First activity or a longer gap: 1.
    /// A date earlier than the last one recorded is ignored.
    pub fn activity_update(&self, today: NaiveDate) -> LedgerUpdate {
        let streak = match self.last_active_on {
            Some(last) if last >= today => return LedgerUpdate::default(),
            Some(last) if last.succ_opt() == Some(today) => self.streak.saturating_add(1),
            _ => 1,
        };
        LedgerUpdate {
            streak: Some(streak),
            last_active_on: Some(today),
            ..LedgerUpdate::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_ledger() {
        let l = ProgressLedger::default();
        assert_eq!(l.level, 1);
        assert_eq!(l.xp, 0);
        assert_eq!(l.current_chapter, 1);
        assert_eq!(l.streak, 0);
        assert_eq!(l.total_commands, 0);
        assert_eq!(l.correct_commands, 0);
        assert!(l.completed_missions.is_empty());
        assert!(l.unlocked_badges.is_empty());
    }

    #[test]
    fn level_examples() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(99), 1);
        assert_eq!(level_for_xp(100), 2);
        assert_eq!(level_for_xp(250), 3);
    }

    #[test]
    fn xp_into_level() {
        let l = ProgressLedger::default().merged(LedgerUpdate {
            xp: Some(250),
            ..Default::default()
        });
        assert_eq!(l.xp_into_level(), 50);
        assert_eq!(l.xp_to_next_level(), 50);
        assert_eq!(l.level, 3);
    }

    #[test]
    fn accuracy_zero_without_attempts() {
        let l = ProgressLedger::default();
        assert_eq!(l.accuracy(), 0.0);
        assert_eq!(l.accuracy_percent(), 0);
    }

    #[test]
    fn accuracy_ratio() {
        let l = ProgressLedger::default().merged(LedgerUpdate {
            total_commands: Some(3),
            correct_commands: Some(2),
            ..Default::default()
        });
        assert_eq!(l.accuracy_percent(), 67);
    }

    #[test]
    fn merge_keeps_unspecified_fields() {
        let base = ProgressLedger::default().merged(LedgerUpdate {
            xp: Some(40),
            streak: Some(3),
            current_chapter: Some(2),
            ..Default::default()
        });
        let next = base.merged(LedgerUpdate {
            total_commands: Some(1),
            ..Default::default()
        });
        assert_eq!(next.xp, 40);
        assert_eq!(next.streak, 3);
        assert_eq!(next.current_chapter, 2);
        assert_eq!(next.total_commands, 1);
    }

    #[test]
    fn merge_clamps_correct_to_total() {
        let l = ProgressLedger::default().merged(LedgerUpdate {
            correct_commands: Some(5),
            total_commands: Some(2),
            ..Default::default()
        });
        assert_eq!(l.correct_commands, 2);
    }

    #[test]
    fn synced_repairs_stored_counters() {
        let l: ProgressLedger =
            serde_json::from_str(r#"{"totalCommands":1,"correctCommands":9}"#).unwrap();
        let l = l.synced();
        assert_eq!(l.correct_commands, 1);
        assert_eq!(l.accuracy_percent(), 100);
    }

    #[test]
    fn merge_resyncs_badge_snapshot() {
        let l = ProgressLedger::default().merged(LedgerUpdate {
            total_commands: Some(3),
            correct_commands: Some(3),
            ..Default::default()
        });
        assert!(l.unlocked_badges.contains("first-commit"));
        assert!(l.unlocked_badges.contains("perfectionist"));
        assert!(!l.unlocked_badges.contains("command-master"));
    }

    #[test]
    fn empty_update() {
        assert!(LedgerUpdate::default().is_empty());
        let l = ProgressLedger::default();
        assert_eq!(l.merged(LedgerUpdate::default()), l);
    }

    #[test]
    fn streak_first_activity() {
        let update = ProgressLedger::default().activity_update(day(2026, 3, 1));
        assert_eq!(update.streak, Some(1));
        assert_eq!(update.last_active_on, Some(day(2026, 3, 1)));
    }

    #[test]
    fn streak_consecutive_days() {
        let mut l = ProgressLedger::default();
        for d in 1..=7 {
            l = l.merged(l.activity_update(day(2026, 3, d)));
        }
        assert_eq!(l.streak, 7);
        assert!(l.unlocked_badges.contains("streak-master"));
    }

    #[test]
    fn streak_same_day_unchanged() {
        let l = ProgressLedger::default();
        let l = l.merged(l.activity_update(day(2026, 3, 1)));
        assert!(l.activity_update(day(2026, 3, 1)).is_empty());
    }

    #[test]
    fn streak_gap_resets() {
        let mut l = ProgressLedger::default();
        l = l.merged(l.activity_update(day(2026, 3, 1)));
        l = l.merged(l.activity_update(day(2026, 3, 2)));
        assert_eq!(l.streak, 2);
        l = l.merged(l.activity_update(day(2026, 3, 5)));
        assert_eq!(l.streak, 1);
    }

    #[test]
    fn json_shape_is_camel_case() {
        let l = ProgressLedger::default();
        let json = serde_json::to_value(&l).unwrap();
        assert_eq!(json["completedMissions"], serde_json::json!([]));
        assert_eq!(json["currentChapter"], 1);
        assert_eq!(json["totalCommands"], 0);
        assert!(json.get("lastActiveOn").is_none());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let l: ProgressLedger = serde_json::from_str(r#"{"xp": 120}"#).unwrap();
        assert_eq!(l.xp, 120);
        assert_eq!(l.current_chapter, 1);
        assert_eq!(l.level, 1);
        assert_eq!(l.clone().synced().level, 2);
    }

    fn arb_ledger() -> impl Strategy<Value = ProgressLedger> {
        (
            0u32..5000,
            proptest::collection::btree_set(1u32..16, 0..6),
            1u32..6,
            0u32..30,
            0u32..500,
            0u32..500,
            proptest::option::of(0u64..3650),
        )
            .prop_map(|(xp, missions, chapter, streak, a, b, offset)| {
                ProgressLedger::default().merged(LedgerUpdate {
                    xp: Some(xp),
                    completed_missions: Some(missions),
                    current_chapter: Some(chapter),
                    streak: Some(streak),
                    total_commands: Some(a.max(b)),
                    correct_commands: Some(a.min(b)),
                    last_active_on: offset
                        .and_then(|d| day(2020, 1, 1).checked_add_days(chrono::Days::new(d))),
                })
            })
    }

    proptest! {
        #[test]
        fn level_formula(xp in 0u32..1_000_000) {
            prop_assert_eq!(level_for_xp(xp), xp / 100 + 1);
            prop_assert!(level_for_xp(xp) >= 1);
        }

        #[test]
        fn json_round_trip(l in arb_ledger()) {
            let json = serde_json::to_string(&l).unwrap();
            let back: ProgressLedger = serde_json::from_str(&json).unwrap();
            prop_assert_eq!(back, l);
        }

        #[test]
        fn merge_preserves_correct_le_total(
            l in arb_ledger(),
            total in proptest::option::of(0u32..1000),
            correct in proptest::option::of(0u32..1000),
        ) {
            let next = l.merged(LedgerUpdate {
                total_commands: total,
                correct_commands: correct,
                ..Default::default()
            });
            prop_assert!(next.correct_commands <= next.total_commands);
            prop_assert_eq!(next.level, level_for_xp(next.xp));
        }
    }
}
