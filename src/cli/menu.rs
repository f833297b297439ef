//! Top-level command loop for notecmd

use anyhow::Result;

use crate::cli::ui::Console;
use crate::cli::{run_create, run_delete, run_edit, run_list};
use crate::db::Database;

const MENU_PROMPT: &str = "create - edit - delete - list - quit (or 'back' to return): ";

/// Commands accepted at the top level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Create,
    Edit,
    Delete,
    List,
    Quit,
}

impl Command {
    const ALL: &'static [Command] = &[
        Command::Create,
        Command::Edit,
        Command::Delete,
        Command::List,
        Command::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Command::Create => "create",
            Command::Edit => "edit",
            Command::Delete => "delete",
            Command::List => "list",
            Command::Quit => "quit",
        }
    }

    /// Exact match against the command labels
    pub fn parse(s: &str) -> Option<Command> {
        Command::ALL.iter().find(|cmd| cmd.label() == s).copied()
    }
}

/// Run the command loop until `quit` or end of input.
///
/// Storage errors propagate out; the caller owns closing the database.
pub fn run_menu(db: &Database, console: &mut impl Console) -> Result<()> {
    loop {
        let Some(input) = console.read_line(MENU_PROMPT)? else {
            return Ok(());
        };

        // `back` lands here too: there is nothing to go back to
        let Some(command) = Command::parse(&input) else {
            console.say("Invalid input.")?;
            continue;
        };

        match command {
            Command::Create => run_create(db, console)?,
            Command::Edit => run_edit(db, console)?,
            Command::Delete => run_delete(db, console)?,
            Command::List => run_list(db, console)?,
            Command::Quit => return Ok(()),
        }
    }
}
