use notecmd::cli::{run_menu, LineConsole, TerminalConsole};
use notecmd::db::Database;
use notecmd::logging::init_logging;
use std::io::{self, IsTerminal};

fn main() -> anyhow::Result<()> {
    let _logger = init_logging()?;
    let db = Database::open()?;

    let result = if io::stdin().is_terminal() {
        run_menu(&db, &mut TerminalConsole::new())
    } else {
        run_menu(&db, &mut LineConsole::new(io::stdin().lock(), io::stdout()))
    };

    // Release the connection before reporting how the loop ended
    let closed = db.close();

    result?;
    closed?;
    Ok(())
}
