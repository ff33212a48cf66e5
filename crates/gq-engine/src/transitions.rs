//! Mission and reset transitions.
//!
//! Each function takes the current ledger and returns a [`Transition`]: the
//! next ledger, the notifications to emit, and whether the request was
//! accepted. A rejected request returns the ledger unchanged.

use gq_core::catalog::{self, MissionSpec};
use gq_core::{LedgerUpdate, MissionId, ProgressLedger, QuestError, QuestResult};
use tracing::debug;

use crate::effect::Notification;

/// Result of a mission or reset transition.
#[derive(Debug, Clone)]
pub struct Transition<T> {
    /// The ledger after the transition.
    pub ledger: ProgressLedger,
    /// Notifications to emit, in order.
    pub notifications: Vec<Notification>,
    /// What happened.
    pub outcome: QuestResult<T>,
}

impl<T> Transition<T> {
    fn rejected(ledger: &ProgressLedger, err: QuestError) -> Self {
        Self {
            ledger: ledger.clone(),
            notifications: vec![rejection_notice(&err)],
            outcome: Err(err),
        }
    }

    /// Whether the request was accepted.
    pub fn is_accepted(&self) -> bool {
        self.outcome.is_ok()
    }
}

fn rejection_notice(err: &QuestError) -> Notification {
    match err {
        QuestError::ChapterLocked { chapter, .. } => {
            let need = catalog::chapter_threshold(*chapter).unwrap_or_default();
            Notification::failure(
                "Chapter Locked",
                format!("Complete previous chapters to unlock (needs {need} XP)"),
            )
        }
        QuestError::MissionAlreadyCompleted(_) => Notification::info(
            "Mission Completed",
            "You've already completed this mission!",
        ),
        other => Notification::failure("Mission Unavailable", other.to_string()),
    }
}

/// Ask to start a mission.
///
/// Starting never changes the ledger. It only reports whether the mission is
/// available.
pub fn start_mission(
    ledger: &ProgressLedger,
    id: MissionId,
) -> Transition<&'static MissionSpec> {
    match catalog::check_mission_start(ledger, id) {
        Ok(mission) => {
            debug!(mission = id, "mission started");
            Transition {
                ledger: ledger.clone(),
                notifications: vec![Notification::success(
                    "Mission Started!",
                    format!("Starting: {}", mission.name),
                )],
                outcome: Ok(mission),
            }
        }
        Err(err) => Transition::rejected(ledger, err),
    }
}

/// Mark a mission completed and award its XP.
///
/// The same gates as [`start_mission`] apply, so a mission's XP is granted
/// at most once. The current chapter advances once every mission in the
/// leading chapters is done.
pub fn complete_mission(
    ledger: &ProgressLedger,
    id: MissionId,
) -> Transition<&'static MissionSpec> {
    let mission = match catalog::check_mission_start(ledger, id) {
        Ok(mission) => mission,
        Err(err) => return Transition::rejected(ledger, err),
    };

    let mut completed = ledger.completed_missions.clone();
    completed.insert(id);
    let mut next = ledger.merged(LedgerUpdate {
        xp: Some(ledger.xp.saturating_add(mission.xp)),
        completed_missions: Some(completed),
        ..LedgerUpdate::default()
    });
    next = next.merged(LedgerUpdate {
        current_chapter: Some(catalog::progressed_chapter(&next)),
        ..LedgerUpdate::default()
    });
    debug!(mission = id, xp = next.xp, chapter = next.current_chapter, "mission completed");

    Transition {
        ledger: next,
        notifications: vec![Notification::success(
            "Mission Complete!",
            format!("{} (+{} XP)", mission.name, mission.xp),
        )],
        outcome: Ok(mission),
    }
}

/// Wipe all progress.
pub fn reset() -> Transition<()> {
    Transition {
        ledger: ProgressLedger::default(),
        notifications: vec![Notification::info(
            "Progress Reset",
            "All progress has been cleared",
        )],
        outcome: Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::NotificationKind;

    fn with_xp(xp: u32) -> ProgressLedger {
        ProgressLedger::default().merged(LedgerUpdate {
            xp: Some(xp),
            ..LedgerUpdate::default()
        })
    }

    #[test]
    fn start_unlocked_mission() {
        let ledger = ProgressLedger::default();
        let t = start_mission(&ledger, 1);
        assert_eq!(t.outcome.unwrap().id, 1);
        assert_eq!(t.ledger, ledger);
        assert_eq!(t.notifications[0].title, "Mission Started!");
    }

    #[test]
    fn start_locked_chapter() {
        let t = start_mission(&with_xp(199), 4);
        assert!(matches!(
            t.outcome,
            Err(QuestError::ChapterLocked { chapter: 2, .. })
        ));
        assert_eq!(t.notifications[0].kind, NotificationKind::Failure);
        assert_eq!(t.notifications[0].title, "Chapter Locked");
        assert!(t.notifications[0].detail.contains("200 XP"));

        assert!(start_mission(&with_xp(200), 4).is_accepted());
    }

    #[test]
    fn start_completed_mission() {
        let ledger = complete_mission(&ProgressLedger::default(), 2).ledger;
        let t = start_mission(&ledger, 2);
        assert_eq!(t.outcome.unwrap_err(), QuestError::MissionAlreadyCompleted(2));
        assert_eq!(t.notifications[0].kind, NotificationKind::Info);
        assert_eq!(t.ledger, ledger);
    }

    #[test]
    fn start_unknown_mission() {
        let t = start_mission(&ProgressLedger::default(), 99);
        assert_eq!(t.outcome.unwrap_err(), QuestError::MissionNotFound(99));
        assert_eq!(t.notifications[0].kind, NotificationKind::Failure);
    }

    #[test]
    fn complete_awards_xp_once() {
        let first = complete_mission(&ProgressLedger::default(), 1);
        assert!(first.is_accepted());
        assert!(first.ledger.has_completed(1));
        assert_eq!(first.ledger.xp, 50);

        let second = complete_mission(&first.ledger, 1);
        assert!(!second.is_accepted());
        assert_eq!(second.ledger.xp, 50);
    }

    #[test]
    fn complete_advances_chapter() {
        let mut ledger = ProgressLedger::default();
        for id in [1, 2, 3] {
            ledger = complete_mission(&ledger, id).ledger;
        }
        assert_eq!(ledger.current_chapter, 2);
        assert_eq!(ledger.level(), ledger.level);
        assert!(ledger.unlocked_badges.contains("explorer"));
    }

    #[test]
    fn complete_locked_mission_rejected() {
        let t = complete_mission(&ProgressLedger::default(), 15);
        assert!(matches!(t.outcome, Err(QuestError::ChapterLocked { chapter: 5, .. })));
        assert!(!t.ledger.has_completed(15));
    }

    #[test]
    fn complete_saturates_xp() {
        let t = complete_mission(&with_xp(u32::MAX - 5), 1);
        assert!(t.is_accepted());
        assert_eq!(t.ledger.xp, u32::MAX);
        assert!(t.ledger.has_completed(1));
    }

    #[test]
    fn reset_clears_everything() {
        let t = reset();
        assert_eq!(t.ledger, ProgressLedger::default());
        assert_eq!(t.notifications.len(), 1);
        assert!(t.outcome.is_ok());
    }
}
