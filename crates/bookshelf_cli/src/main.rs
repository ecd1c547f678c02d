//! Interactive console entry point.
//!
//! # Responsibility
//! - Load startup configuration and wire core components together.
//! - Hand terminal I/O to the menu loop in [`console`].

mod console;

use bookshelf_core::db::open_db;
use bookshelf_core::{init_logging, BookService, Config, SqliteBookRepository};
use console::Console;
use log::info;
use std::error::Error;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            let mut source = err.source();
            while let Some(cause) = source {
                eprintln!("caused by: {cause}");
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let config = Config::load_or_default(bookshelf_core::config::DEFAULT_CONFIG_FILE)?;

    if let Some(logging) = &config.logging {
        init_logging(&logging.level, &logging.directory)?;
    }

    let conn = open_db(&config.storage.database)?;
    let repo = SqliteBookRepository::new(&conn);
    let service = BookService::new(repo);

    info!(
        "event=cli_start module=cli status=ok database={}",
        config.storage.database.display()
    );

    let mut console = Console::new(&service, io::stdin().lock(), io::stdout().lock());
    console.run()?;

    info!("event=cli_exit module=cli status=ok");
    Ok(())
}
