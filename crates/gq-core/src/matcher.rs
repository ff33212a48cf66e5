//! Resolving raw terminal input against a [`GrammarTable`].

use crate::grammar::{CLEAR_KEY, CommandSpec, GrammarTable};

/// The outcome of matching one input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult<'a> {
    /// The input was the reserved clear directive. The caller empties the
    /// transcript and does nothing else.
    Clear,
    /// The normalized input equals a table key.
    Exact(&'a CommandSpec),
    /// The normalized input starts with a table key (first in table order).
    PrefixMatched(&'a CommandSpec),
    /// Nothing matched.
    NoMatch,
}

impl<'a> MatchResult<'a> {
    /// The matched spec, if any.
    pub fn spec(&self) -> Option<&'a CommandSpec> {
        match *self {
            Self::Exact(spec) | Self::PrefixMatched(spec) => Some(spec),
            Self::Clear | Self::NoMatch => None,
        }
    }

    /// Whether the input was accepted as a command.
    pub fn is_match(&self) -> bool {
        self.spec().is_some()
    }
}

/// Trim surrounding whitespace and lower-case.
pub fn normalize(input: &str) -> String {
    input.trim().to_lowercase()
}

/// Match a raw input line against the table.
///
/// Exact matches win over prefix matches. Prefix matching is a literal
/// `starts_with` with no word-boundary check, scanned in table order with the
/// reserved keys skipped.
pub fn match_input<'a>(input: &str, table: &'a GrammarTable) -> MatchResult<'a> {
    let normalized = normalize(input);

    if normalized == CLEAR_KEY {
        return MatchResult::Clear;
    }

    if let Some(spec) = table.get(&normalized) {
        return MatchResult::Exact(spec);
    }

    table
        .prefix_candidates()
        .find(|spec| normalized.starts_with(spec.key.as_str()))
        .map_or(MatchResult::NoMatch, MatchResult::PrefixMatched)
}
