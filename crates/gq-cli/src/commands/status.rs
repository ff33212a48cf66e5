use std::path::Path;

use colored::Colorize;

use gq_core::catalog::{self, badges, chapters};
use gq_core::ledger::XP_PER_LEVEL;

pub fn run(state_dir: &Path, key: &str) -> Result<(), String> {
    let session = super::open_session(state_dir, key)?;
    let ledger = session.ledger();

    let chapter_title = catalog::chapter(ledger.current_chapter)
        .map(|c| c.title)
        .unwrap_or("Unknown");
    let total_missions: usize = chapters().iter().map(|c| c.missions.len()).sum();

    println!("  {} ({key})", "GitQuest progress".bold());
    println!();
    println!(
        "  Level {}  {} {}/{} XP",
        ledger.level().to_string().bold(),
        super::bar(ledger.xp_into_level(), XP_PER_LEVEL, 20),
        ledger.xp_into_level(),
        XP_PER_LEVEL,
    );
    println!("  Total XP:  {}", ledger.xp);
    println!("  Next level in {} XP", ledger.xp_to_next_level());
    println!(
        "  Chapter:   {} ({chapter_title})",
        ledger.current_chapter
    );
    println!(
        "  Missions:  {}/{total_missions}",
        ledger.completed_missions.len()
    );
    println!(
        "  Accuracy:  {}% ({}/{} commands)",
        ledger.accuracy_percent(),
        ledger.correct_commands,
        ledger.total_commands
    );
    println!(
        "  Streak:    {} day{}",
        ledger.streak,
        if ledger.streak == 1 { "" } else { "s" }
    );
    println!(
        "  Badges:    {}/{}",
        catalog::unlocked_badges(ledger).count(),
        badges().len()
    );

    Ok(())
}
