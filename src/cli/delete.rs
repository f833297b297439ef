use anyhow::Result;
use log::debug;

use crate::cli::ui::{prompt_or_back, Console};
use crate::db::Database;

/// Execute the delete flow
pub fn run_delete(db: &Database, console: &mut impl Console) -> Result<()> {
    loop {
        let Some(identifier) = prompt_or_back(
            console,
            "Please write title or ID of the note you want to delete: ",
        )?
        else {
            return Ok(());
        };

        if !db.exists(&identifier)? {
            console.say(&format!("Note '{}' does not exist.", identifier))?;
            continue;
        }

        let removed = db.delete(&identifier)?;
        debug!("delete removed {} row(s)", removed);

        // Reported as deleted even when nothing matched
        console.say(&format!("Note '{}' deleted successfully.", identifier))?;
        return Ok(());
    }
}
