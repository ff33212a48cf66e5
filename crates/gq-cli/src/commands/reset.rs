use std::io::{self, BufRead, Write};
use std::path::Path;

pub fn run(state_dir: &Path, key: &str, yes: bool) -> Result<(), String> {
    if !yes && !confirm(key)? {
        println!("  Reset cancelled.");
        return Ok(());
    }

    let mut session = super::open_session(state_dir, key)?;
    let warning = session.reset();
    super::flush_notifications(&mut session);

    match warning {
        Some(e) => Err(e.to_string()),
        None => Ok(()),
    }
}

fn confirm(key: &str) -> Result<bool, String> {
    print!("  Erase all progress for '{key}'? [y/N] ");
    io::stdout().flush().map_err(|e| e.to_string())?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|e| e.to_string())?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
