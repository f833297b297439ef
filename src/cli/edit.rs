use anyhow::Result;

use crate::cli::report_upsert;
use crate::cli::ui::{prompt_or_back, Console, SKIP};
use crate::db::{Database, StoreError};

/// Edit the title and/or text of an existing note.
///
/// `skip` keeps the current value. A new title that already names another note
/// sends the user back to choosing which note to edit.
pub fn run_edit(db: &Database, console: &mut impl Console) -> Result<()> {
    loop {
        let Some(identifier) = prompt_or_back(
            console,
            "Please write title or ID of the note you want to edit: ",
        )?
        else {
            return Ok(());
        };

        let Some(note) = db.get_note(&identifier)? else {
            console.say(&format!("Note '{}' does not exist.", identifier))?;
            continue;
        };

        let Some(title) = prompt_or_back(
            console,
            "Enter new title (or type 'skip' to keep current): ",
        )?
        else {
            return Ok(());
        };

        // A title that names some other note, by title or by id, is taken
        let title = if title == SKIP {
            db.get_title(&identifier)?.unwrap_or(note.title)
        } else if db.resolve(&title)?.is_some_and(|other| other != note.id) {
            console.say(&format!("Note '{}' already exists.", title))?;
            continue;
        } else {
            title
        };

        let Some(text) = prompt_or_back(
            console,
            "Enter new text (or type 'skip' to keep current): ",
        )?
        else {
            return Ok(());
        };

        let text = if text == SKIP {
            db.get_text(&identifier)?.unwrap_or(note.text)
        } else {
            text
        };

        match db.upsert(&identifier, &text, Some(&title)) {
            Ok(outcome) => return report_upsert(console, &outcome),
            // The title was claimed after it was checked above
            Err(StoreError::DuplicateTitle(taken)) => {
                console.say(&format!("Note '{}' already exists.", taken))?;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ui::testing::{output, scripted, ScriptConsole};

    /// Runs `before_text` once, just before the new-text prompt is answered
    struct InterleavedConsole<'a> {
        script: ScriptConsole,
        before_text: Option<Box<dyn FnOnce() + 'a>>,
    }

    impl Console for InterleavedConsole<'_> {
        fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
            if prompt.starts_with("Enter new text") {
                if let Some(write) = self.before_text.take() {
                    write();
                }
            }
            self.script.read_line(prompt)
        }

        fn say(&mut self, line: &str) -> Result<()> {
            self.script.say(line)
        }
    }

    fn setup_test_db() -> Database {
        let db = Database::open_memory().unwrap();
        db.upsert("groceries", "milk, eggs", None).unwrap();
        db.upsert("chores", "laundry", None).unwrap();
        db
    }

    #[test]
    fn test_rename_keep_text() {
        let db = setup_test_db();
        let mut console = scripted(&["groceries", "shopping", "skip"]);

        run_edit(&db, &mut console).unwrap();

        assert!(output(console).contains("Note 'shopping' updated successfully."));
        assert_eq!(db.get_text("shopping").unwrap().as_deref(), Some("milk, eggs"));
        assert_eq!(db.get_title("1").unwrap().as_deref(), Some("shopping"));
        assert!(!db.exists("groceries").unwrap());
    }

    #[test]
    fn test_edit_by_id_keep_title() {
        let db = setup_test_db();
        let mut console = scripted(&["2", "skip", "dishes"]);

        run_edit(&db, &mut console).unwrap();

        assert_eq!(db.get_title("2").unwrap().as_deref(), Some("chores"));
        assert_eq!(db.get_text("chores").unwrap().as_deref(), Some("dishes"));
    }

    #[test]
    fn test_skip_both_keeps_fields() {
        let db = setup_test_db();
        let before = db.get_note("groceries").unwrap().unwrap();
        let mut console = scripted(&["groceries", "skip", "skip"]);

        run_edit(&db, &mut console).unwrap();

        let after = db.get_note("groceries").unwrap().unwrap();
        assert_eq!(after.id, before.id);
        assert_eq!(after.title, before.title);
        assert_eq!(after.text, before.text);
        assert_eq!(after.created_time, before.created_time);
        assert!(after.updated_time >= before.updated_time);
    }

    #[test]
    fn test_missing_note_reprompts() {
        let db = setup_test_db();
        let mut console = scripted(&["nope", "groceries", "skip", "bread"]);

        run_edit(&db, &mut console).unwrap();

        assert!(output(console).contains("Note 'nope' does not exist."));
        assert_eq!(db.get_text("groceries").unwrap().as_deref(), Some("bread"));
    }

    #[test]
    fn test_taken_title_restarts_from_identifier() {
        let db = setup_test_db();
        let mut console = scripted(&["groceries", "chores", "groceries", "list", "skip"]);

        run_edit(&db, &mut console).unwrap();

        assert!(output(console).contains("Note 'chores' already exists."));
        assert_eq!(db.get_text("chores").unwrap().as_deref(), Some("laundry"));
        assert_eq!(db.get_title("1").unwrap().as_deref(), Some("list"));
    }

    #[test]
    fn test_title_naming_other_id_rejected() {
        let db = setup_test_db();
        let mut console = scripted(&["groceries", "2", "skip", "back"]);

        run_edit(&db, &mut console).unwrap();

        assert!(output(console).contains("Note '2' already exists."));
        assert_eq!(db.get_title("1").unwrap().as_deref(), Some("groceries"));
        assert_eq!(db.get_title("2").unwrap().as_deref(), Some("chores"));
    }

    #[test]
    fn test_own_id_as_title_accepted() {
        let db = setup_test_db();
        let mut console = scripted(&["groceries", "1", "skip"]);

        run_edit(&db, &mut console).unwrap();

        assert_eq!(db.get_title("1").unwrap().as_deref(), Some("1"));
        assert_eq!(db.get_text("1").unwrap().as_deref(), Some("milk, eggs"));
    }

    #[test]
    fn test_title_claimed_before_write_reprompts() {
        let db = setup_test_db();
        let mut console = InterleavedConsole {
            script: scripted(&["groceries", "errands", "skip", "back"]),
            before_text: Some(Box::new(|| {
                db.upsert("errands", "post office", None).unwrap();
            })),
        };

        run_edit(&db, &mut console).unwrap();

        assert!(output(console.script).contains("Note 'errands' already exists."));
        assert_eq!(db.get_title("1").unwrap().as_deref(), Some("groceries"));
        assert_eq!(db.get_text("errands").unwrap().as_deref(), Some("post office"));
    }

    #[test]
    fn test_same_title_accepted() {
        let db = setup_test_db();
        let mut console = scripted(&["groceries", "groceries", "bread"]);

        run_edit(&db, &mut console).unwrap();

        assert_eq!(db.get_text("groceries").unwrap().as_deref(), Some("bread"));
    }

    #[test]
    fn test_back_leaves_note_untouched() {
        for script in [
            &["back"][..],
            &["groceries", "back"][..],
            &["groceries", "shopping", "back"][..],
        ] {
            let db = setup_test_db();
            let before = db.get_note("groceries").unwrap().unwrap();
            let mut console = scripted(script);

            run_edit(&db, &mut console).unwrap();

            assert_eq!(db.get_note("groceries").unwrap(), Some(before));
        }
    }
}
