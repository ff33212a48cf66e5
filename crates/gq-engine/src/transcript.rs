//! The terminal transcript.
//!
//! Append-only for the lifetime of a terminal session, except for the clear
//! directive which empties it wholesale. Never persisted.

use std::fmt;

/// Welcome line shown when a terminal opens.
pub const WELCOME: &str = "Welcome to GitQuest Terminal! Type \"help\" for available commands.";

/// What produced a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Terminal chrome (welcome text, hints).
    System,
    /// The echoed input line.
    Command,
    /// Canned output of an accepted command.
    Success,
    /// Rejection of an unrecognized command.
    Error,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::System => write!(f, "system"),
            Self::Command => write!(f, "command"),
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One transcript line (possibly multi-line text).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEntry {
    /// What produced it.
    pub kind: EntryKind,
    /// Text to display.
    pub text: String,
}

impl TranscriptEntry {
    /// A system line.
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::System,
            text: text.into(),
        }
    }

    /// An echoed command line.
    pub fn command(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Command,
            text: text.into(),
        }
    }

    /// A success line.
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Success,
            text: text.into(),
        }
    }

    /// An error line.
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: EntryKind::Error,
            text: text.into(),
        }
    }
}

/// The ordered transcript of a terminal session.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    entries: Vec<TranscriptEntry>,
}

impl Transcript {
    /// An empty transcript.
    pub fn new() -> Self {
        Self::default()
    }

    /// A transcript opened with the welcome line.
    pub fn with_welcome() -> Self {
        Self {
            entries: vec![TranscriptEntry::system(WELCOME)],
        }
    }

    /// Append entries in order.
    pub fn extend(&mut self, entries: impl IntoIterator<Item = TranscriptEntry>) {
        self.entries.extend(entries);
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// All entries.
    pub fn entries(&self) -> &[TranscriptEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the transcript as plain text, one entry per block.
    pub fn export_text(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            match entry.kind {
                EntryKind::Command => out.push_str(&entry.text),
                EntryKind::System => out.push_str(&format!("# {}", entry.text)),
                EntryKind::Success => out.push_str(&format!("✔ {}", entry.text)),
                EntryKind::Error => out.push_str(&format!("✘ {}", entry.text)),
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn welcome() {
        let t = Transcript::with_welcome();
        assert_eq!(t.len(), 1);
        assert_eq!(t.entries()[0].kind, EntryKind::System);
    }

    #[test]
    fn extend_and_clear() {
        let mut t = Transcript::new();
        assert!(t.is_empty());
        t.extend([
            TranscriptEntry::command("~/gitquest$ git init"),
            TranscriptEntry::success("Initialized empty Git repository in .git/"),
        ]);
        assert_eq!(t.len(), 2);
        t.clear();
        assert!(t.is_empty());
    }

    #[test]
    fn export_text() {
        let mut t = Transcript::with_welcome();
        t.extend([
            TranscriptEntry::command("~/gitquest$ banana"),
            TranscriptEntry::error("Command not recognized: banana"),
        ]);
        let txt = t.export_text();
        assert!(txt.starts_with("# Welcome to GitQuest Terminal!"));
        assert!(txt.contains("~/gitquest$ banana\n"));
        assert!(txt.contains("✘ Command not recognized: banana\n"));
    }
}
