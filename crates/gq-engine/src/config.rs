//! Configuration for a GitQuest session.

use chrono::NaiveDate;

/// Configuration for a session.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Key the ledger is stored under.
    pub session_key: String,
    /// Working-directory text echoed before each command.
    pub prompt: String,
    /// Most branches the commit graph may hold, `main` included.
    pub max_branches: usize,
    /// Fixed "today" for streak tracking. `None` uses the UTC date.
    pub today: Option<NaiveDate>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            session_key: "gitquest-progress".to_string(),
            prompt: "~/gitquest".to_string(),
            max_branches: 3,
            today: None,
        }
    }
}

impl EngineConfig {
    /// Set the storage key.
    pub fn with_session_key(mut self, key: impl Into<String>) -> Self {
        self.session_key = key.into();
        self
    }

    /// Set the echoed prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the branch cap (at least 1, for `main`).
    pub fn with_max_branches(mut self, max: usize) -> Self {
        self.max_branches = max.max(1);
        self
    }

    /// Pin the date used for streak tracking.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// The date activity is recorded on.
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| chrono::Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.session_key, "gitquest-progress");
        assert_eq!(cfg.prompt, "~/gitquest");
        assert_eq!(cfg.max_branches, 3);
        assert!(cfg.today.is_none());
    }

    #[test]
    fn builder_methods() {
        let day = NaiveDate::from_ymd_opt(2026, 5, 4).unwrap();
        let cfg = EngineConfig::default()
            .with_session_key("alice")
            .with_prompt("~/repo")
            .with_max_branches(5)
            .with_today(day);
        assert_eq!(cfg.session_key, "alice");
        assert_eq!(cfg.prompt, "~/repo");
        assert_eq!(cfg.max_branches, 5);
        assert_eq!(cfg.today(), day);
    }

    #[test]
    fn branch_cap_keeps_main() {
        let cfg = EngineConfig::default().with_max_branches(0);
        assert_eq!(cfg.max_branches, 1);
    }
}
