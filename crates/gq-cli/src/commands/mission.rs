use std::path::Path;

use colored::Colorize;

pub fn start(state_dir: &Path, key: &str, id: u32) -> Result<(), String> {
    let mut session = super::open_session(state_dir, key)?;
    let outcome = session.start_mission(id);
    super::flush_notifications(&mut session);

    let mission = outcome.map_err(|e| e.to_string())?;
    println!(
        "  {} {}",
        "Issue in the terminal:".bold(),
        mission.commands.join(", ")
    );
    println!("  Run `gq play --mission {id}` to play it.");
    Ok(())
}

pub fn complete(state_dir: &Path, key: &str, id: u32) -> Result<(), String> {
    let mut session = super::open_session(state_dir, key)?;
    let outcome = session.complete_mission(id);
    super::flush_notifications(&mut session);
    super::print_warnings(&session);

    outcome.map_err(|e| e.to_string())?;
    let ledger = session.ledger();
    println!(
        "  Level {} | {} XP | chapter {}",
        ledger.level(),
        ledger.xp,
        ledger.current_chapter
    );
    Ok(())
}
