pub mod badges;
pub mod cheatsheet;
pub mod mission;
pub mod missions;
pub mod play;
pub mod reset;
pub mod status;

use std::path::Path;

use colored::Colorize;

use gq_core::QuestError;
use gq_engine::{EngineConfig, JsonFileStore, Notification, NotificationKind, Session};

pub type CliSession = Session<JsonFileStore, Vec<Notification>>;

/// Open the session stored under `key` in `state_dir`.
fn open_session(state_dir: &Path, key: &str) -> Result<CliSession, String> {
    let store = JsonFileStore::new(state_dir);
    store.path_for(key).map_err(|e| e.to_string())?;
    let config = EngineConfig::default().with_session_key(key);
    Ok(Session::open(store, Vec::new(), config))
}

/// Print and drop the notifications collected so far.
fn flush_notifications(session: &mut CliSession) {
    for n in session.sink_mut().drain(..) {
        print_notification(&n);
    }
}

fn print_warning(warning: &QuestError) {
    println!("  {}", format!("warning: {warning}").yellow());
}

/// Print every persistence warning the session has collected.
fn print_warnings(session: &CliSession) {
    for w in session.warnings() {
        print_warning(w);
    }
}

fn print_notification(n: &Notification) {
    let title = match n.kind {
        NotificationKind::Success => n.title.green().bold(),
        NotificationKind::Failure => n.title.red().bold(),
        NotificationKind::Info => n.title.cyan().bold(),
    };
    if n.detail.is_empty() {
        println!("  {title}");
    } else {
        println!("  {title} {}", n.detail);
    }
}

/// A text progress bar `width` cells wide.
fn bar(filled: u32, total: u32, width: usize) -> String {
    let cells = if total == 0 {
        0
    } else {
        (filled.min(total) as usize * width) / total as usize
    };
    format!("[{}{}]", "#".repeat(cells), "-".repeat(width - cells))
}
