//! Shared terminal I/O for notecmd
//!
//! Conventions:
//! - One prompt reads exactly one line.
//! - `None` from `read_line` means input is exhausted (EOF or Ctrl+C).
//! - Feedback is a single line naming the affected note.

use anyhow::Result;
use inquire::{ui::RenderConfig, InquireError, Text};
use std::io::{self, BufRead, Write};

/// Token that aborts a flow without side effects
pub const BACK: &str = "back";

/// Token that keeps the current title or text during an edit
pub const SKIP: &str = "skip";

/// Divider printed after each note in a listing
pub const DIVIDER_WIDTH: usize = 30;

/// Line-oriented conversation with the user
pub trait Console {
    /// Show `prompt` and read one line. Returns `None` once input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Print one line of output
    fn say(&mut self, line: &str) -> Result<()>;
}

/// Console over any reader/writer pair. Used for piped stdin and in tests.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.output, "{}", line)?;
        Ok(())
    }
}

/// Console backed by inquire prompts, for interactive terminals.
///
/// Escape answers with `back`; Ctrl+C ends input.
pub struct TerminalConsole {
    stdout: io::Stdout,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
        }
    }
}

impl Default for TerminalConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let result = Text::new(prompt.trim_end())
            .with_render_config(minimal_render_config())
            .prompt_skippable();

        match result {
            Ok(Some(answer)) => Ok(Some(answer)),
            Ok(None) => Ok(Some(BACK.to_string())),
            Err(InquireError::OperationInterrupted) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn say(&mut self, line: &str) -> Result<()> {
        writeln!(self.stdout, "{}", line)?;
        Ok(())
    }
}

/// Prompt inside a flow. `back` and end of input both yield `None`.
pub fn prompt_or_back(console: &mut impl Console, prompt: &str) -> Result<Option<String>> {
    Ok(console.read_line(prompt)?.filter(|answer| answer != BACK))
}

/// Get a minimal render config for inquire prompts
pub fn minimal_render_config() -> RenderConfig<'static> {
    RenderConfig::default_colored()
        .with_prompt_prefix(inquire::ui::Styled::new(""))
        .with_answered_prompt_prefix(inquire::ui::Styled::new(""))
}

pub fn divider() -> String {
    "-".repeat(DIVIDER_WIDTH)
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_line_strips_newline() {
        let mut console = LineConsole::new(Cursor::new(b"create\r\nlist\n".to_vec()), Vec::new());
        assert_eq!(console.read_line("> ").unwrap().as_deref(), Some("create"));
        assert_eq!(console.read_line("> ").unwrap().as_deref(), Some("list"));
        assert_eq!(console.read_line("> ").unwrap(), None);
    }

    #[test]
    fn test_read_line_keeps_inner_whitespace() {
        let mut console = scripted(&["  create time "]);
        assert_eq!(
            console.read_line("").unwrap().as_deref(),
            Some("  create time ")
        );
    }

    #[test]
    fn test_last_line_without_newline() {
        let mut console = LineConsole::new(Cursor::new(b"quit".to_vec()), Vec::new());
        assert_eq!(console.read_line("").unwrap().as_deref(), Some("quit"));
    }

    #[test]
    fn test_prompt_and_say_written() {
        let mut console = scripted(&["x"]);
        console.read_line("title: ").unwrap();
        console.say("Saved.").unwrap();
        assert_eq!(output(console), "title: Saved.\n");
    }

    #[test]
    fn test_prompt_or_back() {
        let mut console = scripted(&["back", "backup"]);
        assert_eq!(prompt_or_back(&mut console, "").unwrap(), None);
        assert_eq!(
            prompt_or_back(&mut console, "").unwrap().as_deref(),
            Some("backup")
        );
        assert_eq!(prompt_or_back(&mut console, "").unwrap(), None);
    }

    #[test]
    fn test_divider() {
        assert_eq!(divider(), "------------------------------");
    }
}
