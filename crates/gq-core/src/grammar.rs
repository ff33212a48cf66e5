//! The command grammar table.
//!
//! An ordered list of [`CommandSpec`]s keyed by lower-cased canonical command
//! text. Order matters: prefix matching scans the table front to back and
//! takes the first key the input starts with, so a specific key such as
//! `git add .` has to come before a shorter key it extends (`git add`).

use std::sync::LazyLock;

/// Reserved key that lists every other command's description.
pub const HELP_KEY: &str = "help";

/// Reserved key that empties the transcript instead of producing output.
pub const CLEAR_KEY: &str = "clear";

/// Metadata for one supported command family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Lower-cased canonical command text, used as the lookup key.
    pub key: String,
    /// Short human description shown by `help`.
    pub description: String,
    /// Canned response printed when the command is accepted.
    pub response: String,
    /// Experience awarded per accepted use.
    pub xp_reward: u32,
    /// Chapter this command is taught in.
    pub chapter: u32,
}

impl CommandSpec {
    /// Create a command spec. The key is lower-cased.
    pub fn new(
        key: &str,
        description: &str,
        response: &str,
        xp_reward: u32,
        chapter: u32,
    ) -> Self {
        Self {
            key: key.trim().to_lowercase(),
            description: description.to_string(),
            response: response.to_string(),
            xp_reward,
            chapter,
        }
    }

    /// Whether this is one of the two reserved keys.
    pub fn is_reserved(&self) -> bool {
        self.key == HELP_KEY || self.key == CLEAR_KEY
    }
}

/// An ordered, read-only command grammar.
#[derive(Debug, Clone)]
pub struct GrammarTable {
    commands: Vec<CommandSpec>,
}

static BUILTIN: LazyLock<GrammarTable> = LazyLock::new(|| GrammarTable::new(builtin_commands()));

impl GrammarTable {
    /// Build a table from regular commands, in priority order.
    ///
    /// The reserved `help` and `clear` entries are appended. Any entries with
    /// a reserved key in `commands` are dropped so the reserved pair is
    /// always present exactly once.
    pub fn new(commands: Vec<CommandSpec>) -> Self {
        let mut commands: Vec<CommandSpec> =
            commands.into_iter().filter(|c| !c.is_reserved()).collect();

        let help = help_text(&commands);
        commands.push(CommandSpec::new(
            HELP_KEY,
            "Show available commands",
            &help,
            0,
            1,
        ));
        commands.push(CommandSpec::new(CLEAR_KEY, "Clear the terminal", "", 0, 1));

        Self { commands }
    }

    /// The built-in GitQuest grammar, constructed once.
    pub fn builtin() -> &'static GrammarTable {
        &BUILTIN
    }

    /// Look up a command by exact (already normalized) key.
    pub fn get(&self, key: &str) -> Option<&CommandSpec> {
        self.commands.iter().find(|c| c.key == key)
    }

    /// All entries in table order, reserved keys included.
    pub fn iter(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter()
    }

    /// Entries eligible for prefix matching, in table order.
    pub fn prefix_candidates(&self) -> impl Iterator<Item = &CommandSpec> {
        self.commands.iter().filter(|c| !c.is_reserved())
    }

    /// Number of entries, reserved keys included.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the table has no entries. Never true for a constructed table.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// The generated help listing.
    pub fn help(&self) -> &str {
        self.get(HELP_KEY).map(|c| c.response.as_str()).unwrap_or("")
    }
}

fn help_text(commands: &[CommandSpec]) -> String {
    let mut out = String::from("Available Git commands:");
    for cmd in commands {
        out.push_str(&format!("\n• {} - {}", cmd.key, cmd.description));
    }
    out.push_str("\n• clear - Clear terminal");
    out
}

fn builtin_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec::new(
            "git init",
            "Initialize a new Git repository",
            "Initialized empty Git repository in .git/",
            10,
            1,
        ),
        CommandSpec::new(
            "git add .",
            "Add all files to staging area",
            "Files added to staging area",
            15,
            1,
        ),
        CommandSpec::new(
            "git add",
            "Add specific files to staging area",
            "Usage: git add <file> or git add .",
            5,
            1,
        ),
        CommandSpec::new(
            "git commit -m",
            "Commit changes with a message",
            "Changes committed successfully!",
            20,
            1,
        ),
        CommandSpec::new(
            "git status",
            "Show the working tree status",
            "On branch main\nnothing to commit, working tree clean",
            5,
            1,
        ),
        CommandSpec::new(
            "git log",
            "Show commit history",
            "commit abc123 (HEAD -> main)\nAuthor: Git Guardian\nDate: Now\n\n    Initial commit",
            10,
            3,
        ),
        CommandSpec::new(
            "git branch",
            "List, create, or delete branches",
            "* main",
            10,
            2,
        ),
        CommandSpec::new(
            "git checkout -b",
            "Create and switch to a new branch",
            "Switched to a new branch",
            25,
            2,
        ),
        CommandSpec::new("git merge", "Merge branches", "Merge completed successfully", 30, 2),
        CommandSpec::new(
            "git clone",
            "Clone a repository",
            "Cloning into repository...\nClone completed!",
            20,
            4,
        ),
        CommandSpec::new(
            "git push",
            "Push changes to remote repository",
            "Changes pushed to origin/main",
            25,
            4,
        ),
        CommandSpec::new(
            "git pull",
            "Pull changes from remote repository",
            "Already up to date.",
            20,
            4,
        ),
        CommandSpec::new("git checkout", "Switch branches", "Switched to branch", 15, 2),
        CommandSpec::new(
            "git reset",
            "Reset current HEAD to a specified state",
            "Unstaged changes after reset",
            20,
            3,
        ),
        CommandSpec::new(
            "git revert",
            "Revert an existing commit",
            "Revert commit created",
            25,
            3,
        ),
        CommandSpec::new(
            "git rebase -i",
            "Interactively rebase commits",
            "Successfully rebased and updated refs/heads/main.",
            30,
            5,
        ),
        CommandSpec::new(
            "git stash",
            "Stash working directory changes",
            "Saved working directory and index state WIP on main",
            20,
            5,
        ),
        CommandSpec::new(
            "git cherry-pick",
            "Apply a commit from another branch",
            "Cherry-pick applied cleanly",
            25,
            5,
        ),
    ]
}
