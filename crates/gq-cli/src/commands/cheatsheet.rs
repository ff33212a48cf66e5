use comfy_table::{ContentArrangement, Table};

use gq_core::GrammarTable;

pub fn run() -> Result<(), String> {
    let grammar = GrammarTable::builtin();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Command", "Description", "XP", "Chapter"]);

    for spec in grammar.iter() {
        table.add_row(vec![
            spec.key.clone(),
            spec.description.clone(),
            spec.xp_reward.to_string(),
            spec.chapter.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} commands", grammar.len());

    Ok(())
}
