use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use gq_core::catalog::{badges, unlocked_badges};

pub fn run(state_dir: &Path, key: &str) -> Result<(), String> {
    let session = super::open_session(state_dir, key)?;
    let ledger = session.ledger();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Badge", "Rarity", "Description", "Status"]);

    for badge in badges() {
        let status = if badge.is_unlocked(ledger) {
            "Unlocked"
        } else {
            "Locked"
        };
        table.add_row(vec![
            badge.name,
            badge.rarity.to_string().as_str(),
            badge.description,
            status,
        ]);
    }

    println!("{table}");
    println!();
    println!(
        "  {}/{} badges unlocked",
        unlocked_badges(ledger).count(),
        badges().len()
    );

    Ok(())
}
