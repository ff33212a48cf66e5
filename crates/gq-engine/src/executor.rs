//! The command executor.
//!
//! `execute` is a pure step: given an input line and the current ledger it
//! returns the transcript change, the next ledger, and the notifications to
//! emit. Nothing is stored here; the session applies the result.

use gq_core::{CommandSpec, GrammarTable, LedgerUpdate, MatchResult, ProgressLedger, QuestError};
use tracing::debug;

use crate::effect::Notification;
use crate::graph::GraphAction;
use crate::transcript::TranscriptEntry;

/// How the transcript changes after one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptUpdate {
    /// Replace the whole transcript with nothing.
    Clear,
    /// Append these entries.
    Append(Vec<TranscriptEntry>),
}

/// The result of executing one input line.
#[derive(Debug, Clone)]
pub struct Execution<'a> {
    /// Transcript change.
    pub transcript: TranscriptUpdate,
    /// The ledger after the merge.
    pub ledger: ProgressLedger,
    /// Notifications to emit, in order.
    pub notifications: Vec<Notification>,
    /// The command the input matched, if any.
    pub matched: Option<&'a CommandSpec>,
    /// Set when the input matched nothing.
    pub error: Option<QuestError>,
    /// Commit-graph change implied by the command, if any.
    pub graph: Option<GraphAction>,
}

impl Execution<'_> {
    /// Whether the input counted as a command. Only clear does not.
    pub fn is_mutation(&self) -> bool {
        self.transcript != TranscriptUpdate::Clear
    }
}

/// Executes terminal input against a grammar table.
#[derive(Debug, Clone)]
pub struct Executor<'a> {
    table: &'a GrammarTable,
    prompt: String,
}

impl Executor<'static> {
    /// An executor over the built-in grammar.
    pub fn builtin(prompt: impl Into<String>) -> Self {
        Self::new(GrammarTable::builtin(), prompt)
    }
}

impl<'a> Executor<'a> {
    /// An executor over `table`, echoing commands after `prompt`.
    pub fn new(table: &'a GrammarTable, prompt: impl Into<String>) -> Self {
        Self {
            table,
            prompt: prompt.into(),
        }
    }

    /// The grammar this executor matches against.
    pub fn table(&self) -> &'a GrammarTable {
        self.table
    }

    /// Execute one raw input line.
    ///
    /// Every non-clear input counts toward `total_commands`. Accepted input
    /// also counts toward `correct_commands` and adds its XP reward. Clear
    /// leaves the ledger untouched.
    pub fn execute(&self, input: &str, ledger: &ProgressLedger) -> Execution<'a> {
        let result = gq_core::match_input(input, self.table);
        debug!(input, ?result, "matched input");

        let spec = match result {
            MatchResult::Clear => {
                return Execution {
                    transcript: TranscriptUpdate::Clear,
                    ledger: ledger.clone(),
                    notifications: Vec::new(),
                    matched: None,
                    error: None,
                    graph: None,
                };
            }
            MatchResult::Exact(spec) | MatchResult::PrefixMatched(spec) => Some(spec),
            MatchResult::NoMatch => None,
        };

        let echo = TranscriptEntry::command(format!("{}$ {input}", self.prompt));

        match spec {
            Some(spec) => self.accept(input, spec, echo, ledger),
            None => self.reject(input, echo, ledger),
        }
    }

    fn accept(
        &self,
        input: &str,
        spec: &'a CommandSpec,
        echo: TranscriptEntry,
        ledger: &ProgressLedger,
    ) -> Execution<'a> {
        let mut update = LedgerUpdate {
            total_commands: Some(ledger.total_commands.saturating_add(1)),
            correct_commands: Some(ledger.correct_commands.saturating_add(1)),
            ..LedgerUpdate::default()
        };

        let mut notifications = Vec::new();
        if spec.xp_reward > 0 {
            update.xp = Some(ledger.xp.saturating_add(spec.xp_reward));
            notifications.push(Notification::success(
                "Command Executed!",
                format!("+{} XP earned", spec.xp_reward),
            ));
        }

        Execution {
            transcript: TranscriptUpdate::Append(vec![
                echo,
                TranscriptEntry::success(spec.response.clone()),
            ]),
            ledger: ledger.merged(update),
            notifications,
            matched: Some(spec),
            error: None,
            graph: graph_action(spec, argument(input, spec)),
        }
    }

    fn reject(&self, input: &str, echo: TranscriptEntry, ledger: &ProgressLedger) -> Execution<'a> {
        let update = LedgerUpdate {
            total_commands: Some(ledger.total_commands.saturating_add(1)),
            ..LedgerUpdate::default()
        };

        Execution {
            transcript: TranscriptUpdate::Append(vec![
                echo,
                TranscriptEntry::error(format!(
                    "Command not recognized: {input}\nType \"help\" for available commands."
                )),
            ]),
            ledger: ledger.merged(update),
            notifications: vec![Notification::failure(
                "Command Error",
                "Command not recognized. Try 'help' for available commands.",
            )],
            matched: None,
            error: Some(QuestError::UnrecognizedCommand(input.trim().to_string())),
            graph: None,
        }
    }
}

/// Text after the matched key, with the user's original casing.
///
/// The key length is measured in lower-cased bytes, which can differ from
/// the original text's, so the cut point is found char by char.
fn argument<'i>(input: &'i str, spec: &CommandSpec) -> &'i str {
    let trimmed = input.trim();
    let mut lowered = 0;
    for (at, c) in trimmed.char_indices() {
        if lowered >= spec.key.len() {
            return trimmed[at..].trim();
        }
        lowered += c.to_lowercase().map(char::len_utf8).sum::<usize>();
    }
    ""
}

fn graph_action(spec: &CommandSpec, arg: &str) -> Option<GraphAction> {
    let first_word = arg.split_whitespace().next().map(str::to_string);
    match spec.key.as_str() {
        "git commit -m" => Some(GraphAction::Commit {
            message: Some(unquote(arg).to_string()).filter(|m| !m.is_empty()),
        }),
        "git checkout -b" => Some(GraphAction::CreateBranch { name: first_word }),
        "git checkout" => first_word.map(|branch| GraphAction::Checkout { branch }),
        "git merge" => Some(GraphAction::Merge),
        _ => None,
    }
}

fn unquote(s: &str) -> &str {
    s.trim().trim_matches(|c| c == '"' || c == '\'')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::NotificationKind;
    use crate::transcript::EntryKind;
    use gq_core::{CommandSpec, GrammarTable};
    use proptest::prelude::*;

    fn executor() -> Executor<'static> {
        Executor::builtin("~/gitquest")
    }

    fn appended(exec: &Execution<'_>) -> Vec<TranscriptEntry> {
        match &exec.transcript {
            TranscriptUpdate::Append(entries) => entries.clone(),
            TranscriptUpdate::Clear => panic!("expected append"),
        }
    }

    #[test]
    fn accepted_command() {
        let exec = executor().execute("git init", &ProgressLedger::default());
        let entries = appended(&exec);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].kind, EntryKind::Command);
        assert_eq!(entries[0].text, "~/gitquest$ git init");
        assert_eq!(entries[1].kind, EntryKind::Success);
        assert_eq!(entries[1].text, "Initialized empty Git repository in .git/");

        assert_eq!(exec.ledger.xp, 10);
        assert_eq!(exec.ledger.total_commands, 1);
        assert_eq!(exec.ledger.correct_commands, 1);
        assert_eq!(exec.notifications.len(), 1);
        assert_eq!(exec.notifications[0].kind, NotificationKind::Success);
        assert_eq!(exec.notifications[0].detail, "+10 XP earned");
        assert_eq!(exec.matched.unwrap().key, "git init");
    }

    #[test]
    fn echo_keeps_original_input() {
        let exec = executor().execute("Git Status", &ProgressLedger::default());
        assert_eq!(appended(&exec)[0].text, "~/gitquest$ Git Status");
    }

    #[test]
    fn unrecognized_command() {
        let before = ProgressLedger::default();
        let exec = executor().execute("banana", &before);
        let entries = appended(&exec);
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries.iter().filter(|e| e.kind == EntryKind::Error).count(),
            1
        );
        assert!(entries[1].text.contains("Command not recognized: banana"));
        assert!(entries[1].text.contains("help"));

        assert_eq!(exec.ledger.total_commands, 1);
        assert_eq!(exec.ledger.correct_commands, 0);
        assert_eq!(exec.ledger.xp, 0);
        assert_eq!(exec.notifications[0].kind, NotificationKind::Failure);
        assert_eq!(
            exec.error,
            Some(QuestError::UnrecognizedCommand("banana".to_string()))
        );
        assert!(exec.matched.is_none());
    }

    #[test]
    fn help_counts_as_correct_without_xp() {
        let exec = executor().execute("help", &ProgressLedger::default());
        assert_eq!(exec.ledger.total_commands, 1);
        assert_eq!(exec.ledger.correct_commands, 1);
        assert_eq!(exec.ledger.xp, 0);
        assert!(exec.notifications.is_empty());
        assert!(appended(&exec)[1].text.starts_with("Available Git commands:"));
    }

    #[test]
    fn clear_leaves_ledger_untouched() {
        let ledger = executor()
            .execute("git init", &ProgressLedger::default())
            .ledger;
        let exec = executor().execute("  Clear ", &ledger);
        assert_eq!(exec.transcript, TranscriptUpdate::Clear);
        assert_eq!(exec.ledger, ledger);
        assert!(exec.notifications.is_empty());
        assert!(!exec.is_mutation());
    }

    #[test]
    fn merge_keeps_other_fields() {
        let mut ledger = ProgressLedger::default();
        ledger.streak = 4;
        ledger.current_chapter = 2;
        ledger.completed_missions.insert(1);
        let exec = executor().execute("git push", &ledger);
        assert_eq!(exec.ledger.streak, 4);
        assert_eq!(exec.ledger.current_chapter, 2);
        assert!(exec.ledger.has_completed(1));
        assert_eq!(exec.ledger.xp, 25);
    }

    #[test]
    fn exact_over_prefix_in_custom_table() {
        let table = GrammarTable::new(vec![
            CommandSpec::new("git add", "bare", "usage", 5, 1),
            CommandSpec::new("git add .", "all", "staged", 15, 1),
        ]);
        let exec = Executor::new(&table, "$").execute("git add .", &ProgressLedger::default());
        assert_eq!(exec.ledger.xp, 15);
        assert_eq!(appended(&exec)[1].text, "staged");
    }

    #[test]
    fn commit_message_becomes_graph_action() {
        let exec = executor().execute("git commit -m \"Add README\"", &ProgressLedger::default());
        assert_eq!(
            exec.graph,
            Some(GraphAction::Commit {
                message: Some("Add README".to_string())
            })
        );
    }

    #[test]
    fn branch_name_keeps_case() {
        let exec = executor().execute("git checkout -b Feature/Login", &ProgressLedger::default());
        assert_eq!(
            exec.graph,
            Some(GraphAction::CreateBranch {
                name: Some("Feature/Login".to_string())
            })
        );
    }

    #[test]
    fn graph_actions_for_other_commands() {
        let ledger = ProgressLedger::default();
        assert_eq!(executor().execute("git merge feature-1", &ledger).graph, Some(GraphAction::Merge));
        assert_eq!(
            executor().execute("git checkout main", &ledger).graph,
            Some(GraphAction::Checkout {
                branch: "main".to_string()
            })
        );
        assert_eq!(executor().execute("git checkout", &ledger).graph, None);
        assert_eq!(executor().execute("git status", &ledger).graph, None);
        assert_eq!(
            executor().execute("git commit -m", &ledger).graph,
            Some(GraphAction::Commit { message: None })
        );
    }

    #[test]
    fn branch_name_after_case_folded_key() {
        // U+212A KELVIN SIGN lower-cases to a one-byte 'k'.
        let exec = executor().execute("git chec\u{212A}out -b Dev", &ProgressLedger::default());
        assert_eq!(exec.matched.unwrap().key, "git checkout -b");
        assert_eq!(
            exec.graph,
            Some(GraphAction::CreateBranch {
                name: Some("Dev".to_string())
            })
        );
    }

    #[test]
    fn counters_saturate_at_max() {
        let ledger = ProgressLedger::default().merged(LedgerUpdate {
            xp: Some(u32::MAX - 5),
            total_commands: Some(u32::MAX),
            correct_commands: Some(u32::MAX),
            ..LedgerUpdate::default()
        });
        let exec = executor().execute("git init", &ledger);
        assert_eq!(exec.ledger.xp, u32::MAX);
        assert_eq!(exec.ledger.total_commands, u32::MAX);
        assert_eq!(exec.ledger.correct_commands, u32::MAX);
        assert_eq!(exec.ledger.level(), u32::MAX / 100 + 1);

        let exec = executor().execute("banana", &ledger);
        assert_eq!(exec.ledger.total_commands, u32::MAX);
        assert_eq!(exec.ledger.xp, u32::MAX - 5);
    }

    proptest! {
        #[test]
        fn correct_never_exceeds_total(inputs in proptest::collection::vec(
            prop_oneof![
                Just("git init".to_string()),
                Just("help".to_string()),
                Just("clear".to_string()),
                Just("git add .".to_string()),
                "[a-z ]{0,12}",
            ],
            0..40,
        )) {
            let exec = executor();
            let mut ledger = ProgressLedger::default();
            for input in &inputs {
                let before = ledger.clone();
                ledger = exec.execute(input, &ledger).ledger;
                prop_assert!(ledger.correct_commands <= ledger.total_commands);
                prop_assert!(ledger.total_commands >= before.total_commands);
                prop_assert!(ledger.xp >= before.xp);
            }
        }
    }
}
