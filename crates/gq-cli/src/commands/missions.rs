use std::path::Path;

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use gq_core::catalog::chapters;

pub fn run(state_dir: &Path, key: &str) -> Result<(), String> {
    let session = super::open_session(state_dir, key)?;
    let ledger = session.ledger();

    for chapter in chapters() {
        let unlocked = chapter.is_unlocked(ledger);
        let state = if chapter.is_completed(ledger) {
            "completed".green()
        } else if unlocked {
            "unlocked".cyan()
        } else {
            format!("locked, needs {} XP", chapter.unlock_xp).red()
        };
        println!(
            "  {} {}  ({state})",
            format!("Chapter {}:", chapter.id).bold(),
            chapter.title
        );
        println!("  {}", chapter.description.dimmed());

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["ID", "Mission", "Commands", "Difficulty", "XP", "Status"]);

        for mission in chapter.missions {
            let status = if ledger.has_completed(mission.id) {
                "Done"
            } else if unlocked {
                "Available"
            } else {
                "Locked"
            };
            table.add_row(vec![
                mission.id.to_string(),
                mission.name.to_string(),
                mission.commands.join(", "),
                mission.difficulty.to_string(),
                mission.xp.to_string(),
                status.to_string(),
            ]);
        }

        println!("{table}");
        println!();
    }

    Ok(())
}
