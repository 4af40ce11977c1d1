// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, load the library, hand it to the
//   menu loop.
// - Returns `anyhow::Result` so an unreadable or unwritable library file
//   ends the program with a message and a non-zero exit code.

use anyhow::Context;
use library_manager::console::{LineConsole, TerminalConsole};
use library_manager::{catalog::Library, storage::LibraryStore, ui::main_menu};
use std::io::IsTerminal;

fn main() -> anyhow::Result<()> {
    // RUST_LOG controls verbosity; warnings (e.g. a corrupt library file)
    // are shown by default.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Storage location comes from `LIBRARY_FILE` or defaults to
    // ./library.json. See `storage::LibraryStore::from_env`.
    let store = LibraryStore::from_env();
    let books = store
        .load()
        .with_context(|| format!("could not open library at {}", store.path().display()))?;

    // Blocks until the user picks "Exit", which also saves. Piped input is
    // read line by line and running out of it ends the program with an error.
    let library = Library::from_books(books);
    if std::io::stdin().is_terminal() {
        main_menu(&mut TerminalConsole::new(), &store, library)?;
    } else {
        main_menu(&mut LineConsole::stdio(), &store, library)?;
    }
    Ok(())
}
