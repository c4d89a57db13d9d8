// UI layer: the numeric menu loop and the prompts shared by every
// operation. Operations live in `clients` and `statements`; this module
// only decides which one runs and what happens with its result.

use std::path::{Path, PathBuf};

use tracing::error;

use crate::api::{ClientTable, StatementBucket};
use crate::clients;
use crate::error::AdminError;
use crate::statements;

pub mod console;
pub mod progress;

pub use console::{Console, TerminalConsole};

pub const SELECTION_ERROR: &str = "ERROR: Select one of the options listed above.";
pub const FAREWELL: &str = "Thank you!";

const FIRST_PROMPT: &str = "Select an option";
const NEXT_PROMPT: &str = "Select another option";

const MENU: &str = "\nOptions:
0. VIEW HELP DOCUMENTATION.
1. View a client's information.
2. Print all clients' information with keys identified.
3. Enter a new client's information in the database.
4. Remove a client from the database.
5. Display all statements inside the storage bucket.
6. Download a statement from a storage bucket to the local system.
7. Upload a statement from the local system to a storage bucket.
8. Delete a statement from the storage bucket.
9. Exit.";

const MANUAL: &str = "\nWelcome to the company's internal database interface. This
program allows you to directly interact with the database and a storage unit
intended for client statements.

To use this program, utilize the number keys on your keyboard as instructed by
the menu.

All client information belongs in the database, as indicated by options 1-4.

All business statements for transactions belong in the storage bucket, as
indicated by options 5-8.

Press \"9\" to exit the program.";

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Help,
    ShowClient,
    ShowAllClients,
    CreateClient,
    RemoveClient,
    ListStatements,
    DownloadStatement,
    UploadStatement,
    DeleteStatement,
    Exit,
}

impl MenuChoice {
    pub fn from_number(number: i64) -> Option<Self> {
        let choice = match number {
            0 => MenuChoice::Help,
            1 => MenuChoice::ShowClient,
            2 => MenuChoice::ShowAllClients,
            3 => MenuChoice::CreateClient,
            4 => MenuChoice::RemoveClient,
            5 => MenuChoice::ListStatements,
            6 => MenuChoice::DownloadStatement,
            7 => MenuChoice::UploadStatement,
            8 => MenuChoice::DeleteStatement,
            9 => MenuChoice::Exit,
            _ => return None,
        };
        Some(choice)
    }
}

/// Everything an operation needs: the console plus the two stores.
/// Local statement files are read from and written to `workdir`.
pub struct Session<'a> {
    pub(crate) console: &'a mut dyn Console,
    pub(crate) table: &'a dyn ClientTable,
    pub(crate) bucket: &'a dyn StatementBucket,
    pub(crate) workdir: PathBuf,
}

impl<'a> Session<'a> {
    pub fn new(
        console: &'a mut dyn Console,
        table: &'a dyn ClientTable,
        bucket: &'a dyn StatementBucket,
    ) -> Self {
        Session {
            console,
            table,
            bucket,
            workdir: PathBuf::from("."),
        }
    }

    pub fn with_workdir(mut self, workdir: impl AsRef<Path>) -> Self {
        self.workdir = workdir.as_ref().to_path_buf();
        self
    }

    pub(crate) fn interactive(&self) -> bool {
        self.console.is_interactive()
    }
}

/// Main interactive menu. Loops until the operator picks 9 or input ends.
///
/// Operation failures are printed and the loop carries on; only a broken
/// console ends it with an error.
pub fn main_menu(session: &mut Session<'_>) -> Result<(), AdminError> {
    let mut prompt = FIRST_PROMPT;
    show_menu(session.console)?;
    loop {
        let Some(selection) = read_selection(session.console, prompt)? else {
            break;
        };
        prompt = NEXT_PROMPT;

        let Selection::Choice(choice) = selection else {
            writeln!(session.console.out(), "\n{SELECTION_ERROR}")?;
            show_menu(session.console)?;
            continue;
        };
        if choice == MenuChoice::Exit {
            break;
        }

        match dispatch(session, choice) {
            Ok(()) => {}
            Err(AdminError::InputClosed) => break,
            Err(err) if err.is_fatal() => return Err(err),
            Err(err) => {
                error!(?choice, error = %err, "operation failed");
                writeln!(session.console.out(), "ERROR: {err}")?;
            }
        }
        show_menu(session.console)?;
    }
    writeln!(session.console.out(), "{FAREWELL}")?;
    Ok(())
}

/// Run the operation behind `choice`.
pub fn dispatch(session: &mut Session<'_>, choice: MenuChoice) -> Result<(), AdminError> {
    match choice {
        MenuChoice::Help => {
            writeln!(session.console.out(), "{MANUAL}")?;
            Ok(())
        }
        MenuChoice::ShowClient => clients::show_client(session),
        MenuChoice::ShowAllClients => clients::show_all_clients(session),
        MenuChoice::CreateClient => clients::create_client(session),
        MenuChoice::RemoveClient => clients::remove_client(session),
        MenuChoice::ListStatements => statements::list_statements(session),
        MenuChoice::DownloadStatement => statements::download_statement(session),
        MenuChoice::UploadStatement => statements::upload_statement(session),
        MenuChoice::DeleteStatement => statements::delete_statement(session),
        MenuChoice::Exit => Ok(()),
    }
}

/// Prompt for text inside an operation; end of input aborts the operation.
pub fn prompt_text(console: &mut dyn Console, prompt: &str) -> Result<String, AdminError> {
    console.read_line(prompt)?.ok_or(AdminError::InputClosed)
}

fn show_menu(console: &mut dyn Console) -> Result<(), AdminError> {
    writeln!(console.out(), "{MENU}")?;
    Ok(())
}

/// A whole number typed at the menu prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Choice(MenuChoice),
    /// Any other integer, however many digits it has.
    OutOfRange,
}

impl Selection {
    /// `None` when `input` is not an integer at all.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        let digits = input.strip_prefix(['-', '+']).unwrap_or(input);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let choice = input.parse::<i64>().ok().and_then(MenuChoice::from_number);
        Some(choice.map_or(Selection::OutOfRange, Selection::Choice))
    }
}

/// Read until the operator types an integer. Returns `None` once input ends.
fn read_selection(
    console: &mut dyn Console,
    prompt: &str,
) -> Result<Option<Selection>, AdminError> {
    loop {
        let Some(line) = console.read_line(prompt)? else {
            return Ok(None);
        };
        match Selection::parse(&line) {
            Some(selection) => return Ok(Some(selection)),
            None => writeln!(console.out(), "{SELECTION_ERROR}")?,
        }
    }
}
