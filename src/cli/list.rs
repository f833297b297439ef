use anyhow::Result;

use crate::cli::ui::{divider, prompt_or_back, Console};
use crate::db::Database;
use crate::models::{Note, SortKey};

/// Ask for a sort key and print every note in that order
pub fn run_list(db: &Database, console: &mut impl Console) -> Result<()> {
    loop {
        let Some(answer) =
            prompt_or_back(console, "Type of sorting: id, create time, or update time: ")?
        else {
            return Ok(());
        };

        let Some(key) = SortKey::parse(&answer) else {
            console.say(&format!("Sorting '{}' is not valid.", answer))?;
            continue;
        };

        let notes = db.list_all(key)?;
        return print_notes(console, &notes);
    }
}

pub fn print_notes(console: &mut impl Console, notes: &[Note]) -> Result<()> {
    if notes.is_empty() {
        console.say("No notes.")?;
        return Ok(());
    }

    for note in notes {
        console.say(&format!("ID: {}", note.id))?;
        console.say(&format!("Title: {}", note.title))?;
        console.say(&format!("Text: {}", note.text))?;
        console.say(&format!("Created Time: {}", note.created_str()))?;
        console.say(&format!("Updated Time: {}", note.updated_str()))?;
        console.say(&divider())?;
    }
    Ok(())
}
