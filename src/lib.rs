//! Core library surface for the OpenLyrics viewer.
//!
//! The decoding pipeline (`assets` + `openlyrics` + `models`) does not depend
//! on the terminal UI, so other tools can load songs without pulling in the
//! viewer.
pub mod assets;
pub mod config;
pub mod logging;
pub mod models;
pub mod openlyrics;
pub mod ui;

/// Asset access used to fetch song documents.
pub use assets::{read_asset, AssetSource, DirectoryAssets, MemoryAssets, BUNDLED_SONG};

/// The decoder and the song loading use case.
pub use openlyrics::{
    decode, normalize_line_breaks, read_song, DecodeError, DecodeErrorKind, OPENLYRICS_NAMESPACE,
};

/// Song model returned by a successful decode.
pub use models::{Line, Properties, Song, Songbook, Title, Verse};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
