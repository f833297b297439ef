use anyhow::Result;

use crate::cli::report_upsert;
use crate::cli::ui::{prompt_or_back, Console};
use crate::db::{Database, StoreError};

/// Ask for a fresh title and a body, then create the note.
///
/// A title that already resolves to a note is rejected and asked for again.
pub fn run_create(db: &Database, console: &mut impl Console) -> Result<()> {
    loop {
        let Some(title) = prompt_or_back(console, "Please write title for your note: ")? else {
            return Ok(());
        };

        if db.exists(&title)? {
            console.say(&format!("Note '{}' already exists.", title))?;
            continue;
        }

        let Some(text) = prompt_or_back(console, "Please write text for your note: ")? else {
            return Ok(());
        };

        match db.upsert(&title, &text, None) {
            Ok(outcome) => return report_upsert(console, &outcome),
            // Another writer inserted the title between the check and the insert
            Err(StoreError::DuplicateTitle(taken)) => {
                console.say(&format!("Note '{}' already exists.", taken))?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}
