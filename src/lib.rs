// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive CLI.
//
// Module responsibilities:
// - `models`: the `Book` record and its display form.
// - `catalog`: the session's `Library` and the add/remove/search/stats
//   operations on it. No console I/O.
// - `storage`: loading and saving the library as a JSON file.
// - `console`: where input comes from (a dialoguer terminal or plain
//   lines) and where messages go.
// - `prompt`: input validation rules and the re-prompting readers.
// - `ui`: the numbered menu loop and the per-option handlers.
//
// Keeping `catalog` free of prompts means the operations can be tested
// without simulating a terminal.
pub mod catalog;
pub mod console;
pub mod models;
pub mod prompt;
pub mod storage;
pub mod ui;
