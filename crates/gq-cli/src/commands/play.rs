use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use gq_engine::{CommitGraph, EntryKind, TranscriptEntry};

use super::CliSession;

pub fn run(state_dir: &Path, key: &str, mission: Option<u32>) -> Result<(), String> {
    let mut session = super::open_session(state_dir, key)?;

    println!("  {} GitQuest Terminal", "Starting".bold());
    for entry in session.transcript().entries() {
        print_entry(entry);
    }
    super::print_warnings(&session);
    println!("  Type 'quit' to exit, ':help' for session commands.\n");

    if let Some(id) = mission {
        start_mission(&mut session, id);
    }

    let prompt = format!("{}$ ", session.config().prompt);
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("{}", prompt.green());
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break,
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }

        if let Some(meta) = input.strip_prefix(':') {
            meta_command(&mut session, meta);
            println!();
            continue;
        }

        let turn = session.process(input);
        if turn.cleared {
            print!("\x1B[2J\x1B[1;1H");
            continue;
        }
        for entry in turn.entries.iter().filter(|e| e.kind != EntryKind::Command) {
            print_entry(entry);
        }
        super::flush_notifications(&mut session);
        if let Some(warning) = &turn.warning {
            super::print_warning(warning);
        }
        if let Some(id) = turn.completed_mission {
            println!("  {} mission {id} complete", "✔".green());
        }
        println!();
    }

    let ledger = session.ledger();
    println!(
        "  Session saved: level {}, {} XP, {}% accuracy",
        ledger.level(),
        ledger.xp,
        ledger.accuracy_percent()
    );
    Ok(())
}

fn meta_command(session: &mut CliSession, meta: &str) {
    let mut parts = meta.split_whitespace();
    let cmd = parts.next().unwrap_or("");
    let arg = parts.next().and_then(|a| a.parse::<u32>().ok());

    match (cmd, arg) {
        ("status", _) => {
            let l = session.ledger();
            println!(
                "  Level {} | {} XP ({} to next) | chapter {} | streak {}",
                l.level(),
                l.xp,
                l.xp_to_next_level(),
                l.current_chapter,
                l.streak
            );
            match session.active_mission() {
                Some(id) => println!(
                    "  Mission {id} in progress, still to do: {}",
                    session.remaining_commands().join(", ")
                ),
                None => println!("  No active mission."),
            }
        }
        ("graph", _) => print_graph(session.graph()),
        ("export", _) => print!("{}", session.transcript().export_text()),
        ("start", Some(id)) => start_mission(session, id),
        ("complete", Some(id)) => {
            if let Err(e) = session.complete_mission(id) {
                println!("  {}", e.to_string().yellow());
            }
            super::flush_notifications(session);
        }
        ("start" | "complete", None) => {
            println!("  {}", "usage: :start <id> | :complete <id>".yellow());
        }
        _ => {
            println!("  :status          level, XP, and the active mission");
            println!("  :graph           the commit graph");
            println!("  :export          the transcript as text");
            println!("  :start <id>      start a mission");
            println!("  :complete <id>   mark a mission completed");
        }
    }
}

fn start_mission(session: &mut CliSession, id: u32) {
    let outcome = session.start_mission(id);
    super::flush_notifications(session);
    match outcome {
        Ok(mission) => println!(
            "  {} {}",
            "Issue:".bold(),
            mission.commands.join(", ")
        ),
        Err(e) => println!("  {}", e.to_string().yellow()),
    }
}

fn print_entry(entry: &TranscriptEntry) {
    let text = match entry.kind {
        EntryKind::System => entry.text.cyan(),
        EntryKind::Command => entry.text.dimmed(),
        EntryKind::Success => entry.text.normal(),
        EntryKind::Error => entry.text.red(),
    };
    println!("{text}");
}

fn print_graph(graph: &CommitGraph) {
    for branch in graph.branches() {
        let marker = if branch == graph.current_branch() { "*" } else { " " };
        let nodes: Vec<String> = graph
            .commits_on(branch)
            .map(|c| {
                let dot = if c.is_merge { "◆" } else { "●" };
                format!("{dot} {}", c.id)
            })
            .collect();
        let name = format!("{branch:<12}");
        println!("  {marker} {} {}", name.bold(), nodes.join(" ─ "));
    }
    if let Some(last) = graph.commits().last() {
        println!("  last: {} \"{}\" on {}", last.id, last.message, last.branch);
    }
}
