use anyhow::Result;

pub mod create;
pub mod delete;
pub mod edit;
pub mod list;
pub mod menu;
pub mod ui;

pub use create::run_create;
pub use delete::run_delete;
pub use edit::run_edit;
pub use list::run_list;
pub use menu::{run_menu, Command};
pub use ui::{Console, LineConsole, TerminalConsole};

use crate::db::Upsert;

/// Print the one-line confirmation for a successful upsert
pub(crate) fn report_upsert(console: &mut impl Console, outcome: &Upsert) -> Result<()> {
    let line = match outcome {
        Upsert::Created(note) => format!("Note '{}' added successfully.", note.title),
        Upsert::Updated(note) => format!("Note '{}' updated successfully.", note.title),
    };
    console.say(&line)
}
