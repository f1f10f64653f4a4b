//! Ratatui front-end: a toggle that reveals the song, the song info pane, and
//! an error panel when the song cannot be loaded.

mod app;
mod helpers;
mod terminal;

pub use app::App;
pub use terminal::run_app;
