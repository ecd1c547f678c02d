//! Interactive menu loop over the book service.
//!
//! # Responsibility
//! - Present the numbered main menu and per-workflow prompts.
//! - Delegate every action to [`BookService`] and format results as text.
//!
//! # Invariants
//! - An empty line at any selection prompt returns to the previous level;
//!   at the main menu it ends the loop without an explicit save.
//! - Selection prompts only accept ids known to exist at prompt time.

use bookshelf_core::{Book, BookId, BookRepository, BookService, RepoError};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};

const INDENT: &str = "      ";

// Literal newlines; a `\` continuation would strip the menu indent.
const MAIN_MENU_PROMPT: &str = "\n==== Book Manager ====\n
      1) View all books
      2) Add a book
      3) Edit a book
      4) Search for a book
      5) Save and exit\n\nChoose [1-5]: ";

pub type ConsoleResult<T> = Result<T, ConsoleError>;

/// Console-level error: terminal I/O or a propagated service failure.
#[derive(Debug)]
pub enum ConsoleError {
    Io(std::io::Error),
    Repo(RepoError),
}

impl Display for ConsoleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ConsoleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ConsoleError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<RepoError> for ConsoleError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Line-oriented menu console over a book service.
///
/// Generic over reader/writer so the loop can be driven by tests.
pub struct Console<'a, R: BookRepository, In: BufRead, Out: Write> {
    service: &'a BookService<R>,
    input: In,
    output: Out,
}

impl<'a, R: BookRepository, In: BufRead, Out: Write> Console<'a, R, In, Out> {
    pub fn new(service: &'a BookService<R>, input: In, output: Out) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Runs the main menu loop until empty input or save-and-exit.
    pub fn run(&mut self) -> ConsoleResult<()> {
        let book_count = self.service.count()?;
        if book_count > 0 {
            writeln!(
                self.output,
                "Loaded {book_count} book(s) into the library."
            )?;
        }

        loop {
            match self.prompt_selection(MAIN_MENU_PROMPT, &[1, 2, 3, 4, 5])? {
                None => break,
                Some(1) => self.view_books()?,
                Some(2) => self.add_book()?,
                Some(3) => self.edit_book()?,
                Some(4) => self.search_for_book()?,
                Some(_) => {
                    self.save_and_exit()?;
                    break;
                }
            }
        }

        Ok(())
    }

    /// Re-prompts until a valid selection or an empty line.
    ///
    /// Returns `None` on empty input (or end of input), `Some(selection)`
    /// for a line that parses to a member of `valid_selections`.
    fn prompt_selection(
        &mut self,
        prompt: &str,
        valid_selections: &[i64],
    ) -> ConsoleResult<Option<i64>> {
        loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let line = self.read_line()?;
            if line.is_empty() {
                return Ok(None);
            }

            match line.trim().parse::<i64>() {
                Ok(selection) if valid_selections.contains(&selection) => {
                    return Ok(Some(selection));
                }
                _ => {
                    writeln!(self.output, "Invalid selection. Please, try again.")?;
                }
            }
        }
    }

    fn read_line(&mut self) -> ConsoleResult<String> {
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }

    fn view_books(&mut self) -> ConsoleResult<()> {
        writeln!(self.output, "\n==== View Books ====\n")?;
        let books = self.service.list()?;
        self.print_book_lines(&books)?;

        let prompt = "\nTo view details, enter the book ID. \
            To return, press <Enter>.\n\nBook ID: ";

        loop {
            // Re-queried per round so the valid set tracks storage state.
            let ids = self.service.list_ids()?;
            match self.prompt_selection(prompt, &ids)? {
                None => return Ok(()),
                Some(id) => self.print_book_details(id)?,
            }
        }
    }

    fn add_book(&mut self) -> ConsoleResult<()> {
        write!(
            self.output,
            "\n==== Add a Book ====\n\n\
             Please enter the following information:\n\n\
             {INDENT}Title: "
        )?;
        self.output.flush()?;
        let title = self.read_line()?;

        write!(self.output, "{INDENT}Author: ")?;
        self.output.flush()?;
        let author = self.read_line()?;

        write!(self.output, "{INDENT}Description: ")?;
        self.output.flush()?;
        let description = self.read_line()?;

        let book_id = self.service.add(title, author, description)?;

        writeln!(self.output, "\nBook [{book_id}] saved.")?;
        Ok(())
    }

    fn edit_book(&mut self) -> ConsoleResult<()> {
        writeln!(self.output, "\n==== Edit a Book ====\n")?;
        let books = self.service.list()?;
        self.print_book_lines(&books)?;

        let prompt = "\nEnter the book ID of the book you want to edit. \
            To return, press <Enter>.\n\nBook ID: ";

        loop {
            let ids = self.service.list_ids()?;
            match self.prompt_selection(prompt, &ids)? {
                None => return Ok(()),
                Some(id) => self.edit_book_fields(id)?,
            }
        }
    }

    fn edit_book_fields(&mut self, id: BookId) -> ConsoleResult<()> {
        let book = self.service.get_by_id(id)?;

        write!(
            self.output,
            "\nInput the following information. \
             To leave a field unchanged, press <Enter>.\n\n\
             {INDENT}Title [{}]: ",
            book.title
        )?;
        self.output.flush()?;
        let new_title = self.read_line()?;

        write!(self.output, "{INDENT}Author [{}]: ", book.author)?;
        self.output.flush()?;
        let new_author = self.read_line()?;

        write!(self.output, "{INDENT}Description [{}]: ", book.description)?;
        self.output.flush()?;
        let new_description = self.read_line()?;

        self.service
            .edit(book.id, &new_title, &new_author, &new_description)?;

        writeln!(self.output, "\nBook saved.")?;
        Ok(())
    }

    fn search_for_book(&mut self) -> ConsoleResult<()> {
        write!(
            self.output,
            "\n==== Search ====\n\n\
             Type in one or more keywords to search for.\n\n\
             {INDENT}Search: "
        )?;
        self.output.flush()?;
        let words: Vec<String> = self
            .read_line()?
            .split_whitespace()
            .map(str::to_string)
            .collect();

        let matches = self.service.search_for_words(&words)?;

        writeln!(
            self.output,
            "\nThe following books matched your query. \
             Enter the book ID to see more details or <Enter> to return.\n"
        )?;
        self.print_book_lines(&matches)?;

        let matched_ids: Vec<BookId> = matches.iter().map(|book| book.id).collect();

        loop {
            match self.prompt_selection("\nBook ID: ", &matched_ids)? {
                None => return Ok(()),
                Some(id) => self.print_book_details(id)?,
            }
        }
    }

    fn save_and_exit(&mut self) -> ConsoleResult<()> {
        self.service.save()?;
        writeln!(self.output, "\nLibrary saved.")?;
        Ok(())
    }

    fn print_book_lines(&mut self, books: &[Book]) -> ConsoleResult<()> {
        for book in books {
            writeln!(self.output, "{INDENT}[{}] {}", book.id, book.title)?;
        }
        Ok(())
    }

    fn print_book_details(&mut self, id: BookId) -> ConsoleResult<()> {
        let book = self.service.get_by_id(id)?;
        write!(
            self.output,
            "\n{INDENT}ID: {}\n\
             {INDENT}Title: {}\n\
             {INDENT}Author: {}\n\
             {INDENT}Description: {}\n",
            book.id, book.title, book.author, book.description
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Console;
    use bookshelf_core::db::open_db_in_memory;
    use bookshelf_core::{BookService, SqliteBookRepository};
    use rusqlite::Connection;
    use std::io::Cursor;

    fn run_console(conn: &Connection, input: &str) -> String {
        let service = BookService::new(SqliteBookRepository::new(conn));
        let mut output = Vec::new();
        let mut console = Console::new(&service, Cursor::new(input.to_string()), &mut output);
        console.run().unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn empty_input_exits_without_saving_message() {
        let conn = open_db_in_memory().unwrap();
        let output = run_console(&conn, "\n");
        assert!(output.contains("==== Book Manager ===="));
        assert!(!output.contains("Library saved."));
    }

    #[test]
    fn invalid_selection_reprompts() {
        let conn = open_db_in_memory().unwrap();
        let output = run_console(&conn, "9\n\n");
        assert!(output.contains("Invalid selection. Please, try again."));
        assert_eq!(output.matches("Choose [1-5]:").count(), 2);
    }

    #[test]
    fn add_workflow_persists_book_and_reports_id() {
        let conn = open_db_in_memory().unwrap();
        let output = run_console(
            &conn,
            "2\nThe Hobbit\nJ. R. R. Tolkien\nUnlikely hero takes on dragon\n\n",
        );
        assert!(output.contains("Book [1] saved."));

        let service = BookService::new(SqliteBookRepository::new(&conn));
        let book = service.get_by_id(1).unwrap();
        assert_eq!(book.title, "The Hobbit");
        assert_eq!(book.author, "J. R. R. Tolkien");
    }

    #[test]
    fn edit_workflow_keeps_fields_on_empty_input() {
        let conn = open_db_in_memory().unwrap();
        {
            let service = BookService::new(SqliteBookRepository::new(&conn));
            service
                .add("Ulysses", "James Joyce", "A day in the life")
                .unwrap();
        }

        // Select edit, pick book 1, keep title, change author, keep
        // description, then leave the edit prompt and the main menu.
        let output = run_console(
            &conn,
            "3\n1\n\nJames Augustine Aloysius Joyce\n\n\n\n",
        );
        assert!(output.contains("Title [Ulysses]:"));
        assert!(output.contains("Book saved."));

        let service = BookService::new(SqliteBookRepository::new(&conn));
        let book = service.get_by_id(1).unwrap();
        assert_eq!(book.title, "Ulysses");
        assert_eq!(book.author, "James Augustine Aloysius Joyce");
        assert_eq!(book.description, "A day in the life");
    }

    #[test]
    fn search_workflow_lists_matches_and_shows_details() {
        let conn = open_db_in_memory().unwrap();
        {
            let service = BookService::new(SqliteBookRepository::new(&conn));
            service
                .add("The Hobbit", "J. R. R. Tolkien", "Unlikely hero takes on dragon")
                .unwrap();
            service.add("Decameron", "Boccaccio", "Various").unwrap();
        }

        let output = run_console(&conn, "4\nthe\n1\n\n\n");
        assert!(output.contains("[1] The Hobbit"));
        assert!(!output.contains("[2] Decameron"));
        assert!(output.contains("Description: Unlikely hero takes on dragon"));
    }

    #[test]
    fn save_and_exit_flushes_and_reports() {
        let conn = open_db_in_memory().unwrap();
        let output = run_console(&conn, "5\n");
        assert!(output.contains("Library saved."));
    }

    #[test]
    fn startup_reports_loaded_count_when_books_exist() {
        let conn = open_db_in_memory().unwrap();
        {
            let service = BookService::new(SqliteBookRepository::new(&conn));
            service.add("Promethea", "Alan Moore", "Apocalypse").unwrap();
        }

        let output = run_console(&conn, "\n");
        assert!(output.contains("Loaded 1 book(s) into the library."));
    }
}
