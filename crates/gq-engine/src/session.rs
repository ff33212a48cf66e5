//! A learner session.
//!
//! The session owns the live ledger, the terminal transcript, and the commit
//! graph. Each operation runs the pure step from [`crate::executor`] or
//! [`crate::transitions`], applies it, hands notifications to the sink, and
//! saves the ledger. Save failures are logged and kept as warnings. The
//! in-memory state always moves forward.

use std::collections::BTreeSet;

use gq_core::{GrammarTable, MissionId, MissionSpec, ProgressLedger, QuestError, QuestResult};
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::effect::{Notification, NotificationSink};
use crate::executor::{Executor, TranscriptUpdate};
use crate::graph::CommitGraph;
use crate::store::ProgressStore;
use crate::transcript::{Transcript, TranscriptEntry};
use crate::transitions::{self, Transition};

/// What one processed input produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Turn {
    /// The input was the clear directive.
    pub cleared: bool,
    /// Entries appended to the transcript.
    pub entries: Vec<TranscriptEntry>,
    /// Canonical key of the matched command.
    pub matched: Option<String>,
    /// Mission finished by this input.
    pub completed_mission: Option<MissionId>,
    /// Set when the input was not recognized.
    pub error: Option<QuestError>,
    /// Set when the ledger could not be saved.
    pub warning: Option<QuestError>,
}

#[derive(Debug, Clone)]
struct ActiveMission {
    id: MissionId,
    remaining: BTreeSet<&'static str>,
}

impl ActiveMission {
    fn new(mission: &'static MissionSpec) -> Self {
        Self {
            id: mission.id,
            remaining: mission.commands.iter().copied().collect(),
        }
    }
}

/// A running GitQuest session.
pub struct Session<S: ProgressStore, N: NotificationSink> {
    store: S,
    sink: N,
    config: EngineConfig,
    ledger: ProgressLedger,
    transcript: Transcript,
    graph: CommitGraph,
    active: Option<ActiveMission>,
    warnings: Vec<QuestError>,
}

impl<S: ProgressStore, N: NotificationSink> Session<S, N> {
    /// Open a session, loading the ledger stored under the configured key.
    ///
    /// A missing ledger starts fresh. An unreadable one also starts fresh,
    /// with a warning recorded.
    pub fn open(store: S, sink: N, config: EngineConfig) -> Self {
        let mut warnings = Vec::new();
        let ledger = match store.load(&config.session_key) {
            Ok(Some(ledger)) => ledger.synced(),
            Ok(None) => ProgressLedger::default(),
            Err(e) => {
                warn!(key = %config.session_key, error = %e, "could not load progress, starting fresh");
                warnings.push(QuestError::PersistenceUnavailable(e.to_string()));
                ProgressLedger::default()
            }
        };
        info!(key = %config.session_key, xp = ledger.xp, "session opened");

        let graph = CommitGraph::new(config.max_branches);
        Self {
            store,
            sink,
            config,
            ledger,
            transcript: Transcript::with_welcome(),
            graph,
            active: None,
            warnings,
        }
    }

    /// Process one line of terminal input.
    ///
    /// Blank input is ignored and counts as nothing.
    pub fn process(&mut self, input: &str) -> Turn {
        if input.trim().is_empty() {
            return Turn::default();
        }

        let executor = Executor::new(GrammarTable::builtin(), self.config.prompt.as_str());
        let exec = executor.execute(input, &self.ledger);

        let entries = match exec.transcript {
            TranscriptUpdate::Clear => {
                self.transcript.clear();
                return Turn {
                    cleared: true,
                    ..Turn::default()
                };
            }
            TranscriptUpdate::Append(entries) => entries,
        };
        self.transcript.extend(entries.iter().cloned());

        let activity = exec.ledger.activity_update(self.config.today());
        self.ledger = if activity.is_empty() {
            exec.ledger
        } else {
            exec.ledger.merged(activity)
        };

        self.emit(exec.notifications);
        if let Some(action) = &exec.graph {
            let notice = self.graph.apply(action);
            self.sink.notify(notice);
        }

        let matched = exec.matched.map(|spec| spec.key.clone());
        let completed_mission = match &matched {
            Some(key) => self.advance_active_mission(key),
            None => None,
        };

        Turn {
            cleared: false,
            entries,
            matched,
            completed_mission,
            error: exec.error,
            warning: self.persist(),
        }
    }

    /// Start a mission and make it the active one.
    ///
    /// While a mission is active, issuing each of its commands in the
    /// terminal completes it.
    pub fn start_mission(&mut self, id: MissionId) -> QuestResult<&'static MissionSpec> {
        let outcome = self.apply(transitions::start_mission(&self.ledger, id));
        if let Ok(mission) = &outcome {
            self.active = Some(ActiveMission::new(*mission));
        }
        outcome
    }

    /// Complete a mission and save.
    pub fn complete_mission(&mut self, id: MissionId) -> QuestResult<&'static MissionSpec> {
        let outcome = self.apply(transitions::complete_mission(&self.ledger, id));
        if outcome.is_ok() {
            if self.active.as_ref().is_some_and(|a| a.id == id) {
                self.active = None;
            }
            self.persist();
        }
        outcome
    }

    /// Wipe progress, the transcript, and the commit graph, then save.
    pub fn reset(&mut self) -> Option<QuestError> {
        let outcome = self.apply(transitions::reset());
        debug_assert!(outcome.is_ok());
        self.transcript = Transcript::with_welcome();
        self.graph.reset();
        self.active = None;
        self.persist()
    }

    /// The live ledger.
    pub fn ledger(&self) -> &ProgressLedger {
        &self.ledger
    }

    /// The terminal transcript.
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// The commit graph.
    pub fn graph(&self) -> &CommitGraph {
        &self.graph
    }

    /// The notification sink.
    pub fn sink(&self) -> &N {
        &self.sink
    }

    /// Mutable access to the notification sink.
    pub fn sink_mut(&mut self) -> &mut N {
        &mut self.sink
    }

    /// The backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The session configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The mission in progress, if any.
    pub fn active_mission(&self) -> Option<MissionId> {
        self.active.as_ref().map(|a| a.id)
    }

    /// Commands the active mission still needs, in key order.
    pub fn remaining_commands(&self) -> Vec<&'static str> {
        self.active
            .as_ref()
            .map(|a| a.remaining.iter().copied().collect())
            .unwrap_or_default()
    }

    /// Every persistence problem seen so far.
    pub fn warnings(&self) -> &[QuestError] {
        &self.warnings
    }

    fn apply<T>(&mut self, transition: Transition<T>) -> QuestResult<T> {
        self.ledger = transition.ledger;
        self.emit(transition.notifications);
        transition.outcome
    }

    fn emit(&mut self, notifications: Vec<Notification>) {
        for n in notifications {
            self.sink.notify(n);
        }
    }

    fn advance_active_mission(&mut self, key: &str) -> Option<MissionId> {
        let active = self.active.as_mut()?;
        if !active.remaining.remove(key) || !active.remaining.is_empty() {
            return None;
        }
        let id = active.id;
        self.active = None;
        debug!(mission = id, "all mission commands issued");
        self.apply(transitions::complete_mission(&self.ledger, id))
            .ok()
            .map(|m| m.id)
    }

    fn persist(&mut self) -> Option<QuestError> {
        match self.store.save(&self.config.session_key, &self.ledger) {
            Ok(()) => None,
            Err(e) => {
                warn!(key = %self.config.session_key, error = %e, "could not save progress");
                let err = QuestError::PersistenceUnavailable(e.to_string());
                self.warnings.push(err.clone());
                Some(err)
            }
        }
    }
}
