//! A toy commit graph driven by terminal play.
//!
//! Not real version control: commits are labels on branches. The graph
//! starts with one commit on `main` and can hold a small fixed number of
//! branches. It lives for one session and is not persisted.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::effect::Notification;

/// The branch every graph starts on.
pub const MAIN: &str = "main";

/// One node in the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphCommit {
    /// `c<n>` for commits, `m<n>` for merges.
    pub id: String,
    /// Commit message.
    pub message: String,
    /// Branch the commit sits on.
    pub branch: String,
    /// Whether this is a merge commit.
    pub is_merge: bool,
    /// When it was recorded.
    pub timestamp: DateTime<Utc>,
}

/// A graph change requested by a terminal command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphAction {
    /// Commit on the current branch.
    Commit {
        /// Message, or a generated one.
        message: Option<String>,
    },
    /// Create a branch and switch to it.
    CreateBranch {
        /// Name, or `feature-<n>`.
        name: Option<String>,
    },
    /// Switch to an existing branch.
    Checkout {
        /// Branch name.
        branch: String,
    },
    /// Merge the current branch into `main`.
    Merge,
}

/// Why a graph action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphRejection {
    /// The branch cap is reached.
    #[error("branch limit of {0} reached")]
    BranchLimit(usize),

    /// A branch with this name already exists.
    #[error("branch '{0}' already exists")]
    BranchExists(String),

    /// No branch with this name.
    #[error("no branch named '{0}'")]
    UnknownBranch(String),

    /// Merging needs a branch other than `main` checked out.
    #[error("already on main branch")]
    MergeOnMain,
}

/// The commit graph model.
#[derive(Debug, Clone)]
pub struct CommitGraph {
    commits: Vec<GraphCommit>,
    branches: Vec<String>,
    current: String,
    max_branches: usize,
}

impl CommitGraph {
    /// A fresh graph with an initial commit on `main`.
    pub fn new(max_branches: usize) -> Self {
        let mut graph = Self {
            commits: Vec::new(),
            branches: Vec::new(),
            current: MAIN.to_string(),
            max_branches: max_branches.max(1),
        };
        graph.reset();
        graph
    }

    /// Back to the initial state.
    pub fn reset(&mut self) {
        self.commits = vec![GraphCommit {
            id: "c1".to_string(),
            message: "Initial commit".to_string(),
            branch: MAIN.to_string(),
            is_merge: false,
            timestamp: Utc::now(),
        }];
        self.branches = vec![MAIN.to_string()];
        self.current = MAIN.to_string();
    }

    /// All commits in the order they were made.
    pub fn commits(&self) -> &[GraphCommit] {
        &self.commits
    }

    /// Branch names in creation order.
    pub fn branches(&self) -> &[String] {
        &self.branches
    }

    /// The checked-out branch.
    pub fn current_branch(&self) -> &str {
        &self.current
    }

    /// Commits on one branch.
    pub fn commits_on<'a>(&'a self, branch: &'a str) -> impl Iterator<Item = &'a GraphCommit> {
        self.commits.iter().filter(move |c| c.branch == branch)
    }

    /// Commit on the current branch.
    pub fn commit(&mut self, message: Option<&str>) -> &GraphCommit {
        let n = self.commits.len() + 1;
        let message = message
            .filter(|m| !m.is_empty())
            .map_or_else(|| format!("Feature update {n}"), str::to_string);
        self.commits.push(GraphCommit {
            id: format!("c{n}"),
            message,
            branch: self.current.clone(),
            is_merge: false,
            timestamp: Utc::now(),
        });
        &self.commits[self.commits.len() - 1]
    }

    /// Create a branch and switch to it.
    pub fn create_branch(&mut self, name: Option<&str>) -> Result<&str, GraphRejection> {
        let name = name
            .filter(|n| !n.is_empty())
            .map_or_else(|| format!("feature-{}", self.branches.len()), str::to_string);

        if self.branches.contains(&name) {
            return Err(GraphRejection::BranchExists(name));
        }
        if self.branches.len() >= self.max_branches {
            return Err(GraphRejection::BranchLimit(self.max_branches));
        }

        self.branches.push(name.clone());
        self.current = name;
        Ok(self.current.as_str())
    }

    /// Switch to an existing branch.
    pub fn checkout(&mut self, branch: &str) -> Result<&str, GraphRejection> {
        if !self.branches.iter().any(|b| b == branch) {
            return Err(GraphRejection::UnknownBranch(branch.to_string()));
        }
        self.current = branch.to_string();
        Ok(self.current.as_str())
    }

    /// Merge the current branch into `main` and switch back to `main`.
    pub fn merge(&mut self) -> Result<&GraphCommit, GraphRejection> {
        if self.current == MAIN {
            return Err(GraphRejection::MergeOnMain);
        }
        let n = self.commits.len() + 1;
        let source = std::mem::replace(&mut self.current, MAIN.to_string());
        self.commits.push(GraphCommit {
            id: format!("m{n}"),
            message: format!("Merge {source} into {MAIN}"),
            branch: MAIN.to_string(),
            is_merge: true,
            timestamp: Utc::now(),
        });
        Ok(&self.commits[self.commits.len() - 1])
    }

    /// Apply an action and describe the result.
    pub fn apply(&mut self, action: &GraphAction) -> Notification {
        match action {
            GraphAction::Commit { message } => {
                let commit = self.commit(message.as_deref());
                Notification::success(
                    "Commit Added!",
                    format!("New commit on {} branch", commit.branch),
                )
            }
            GraphAction::CreateBranch { name } => match self.create_branch(name.as_deref()) {
                Ok(name) => Notification::success("Branch Created!", format!("Switched to {name}")),
                Err(e) => Notification::info("Cannot Create Branch", e.to_string()),
            },
            GraphAction::Checkout { branch } => match self.checkout(branch) {
                Ok(name) => Notification::info("Branch Switched", format!("Now on {name}")),
                Err(e) => Notification::info("Cannot Switch Branch", e.to_string()),
            },
            GraphAction::Merge => {
                let source = self.current.clone();
                match self.merge() {
                    Ok(_) => Notification::success(
                        "Branch Merged!",
                        format!("{source} merged into {MAIN}"),
                    ),
                    Err(e) => Notification::info("Cannot Merge", e.to_string()),
                }
            }
        }
    }
}
