//! OpenLyrics song decoding: break normalization, XML-to-model mapping and the
//! use case that loads a song from an asset source.

mod decoder;
mod error;
mod normalize;

use tracing::{debug, info, warn};

use crate::assets::{read_asset, AssetSource};
use crate::models::Song;

pub use decoder::decode;
pub use error::{DecodeError, DecodeErrorKind};
pub use normalize::normalize_line_breaks;

/// Namespace every OpenLyrics song document declares on its root element.
pub const OPENLYRICS_NAMESPACE: &str = "http://openlyrics.info/namespace/2009/song";

/// Read the asset at `path` and decode it.
///
/// The asset is fully read and released before decoding starts. Failures are
/// logged and returned unchanged; nothing is retried because decoding the same
/// text again would fail the same way.
pub fn read_song(source: &dyn AssetSource, path: &str) -> Result<Song, DecodeError> {
    debug!(path, "loading OpenLyrics song");

    let result = read_asset(source, path).and_then(|text| decode(&text));
    match &result {
        Ok(song) => info!(
            path,
            title = song.display_title(),
            verses = song.lyrics().len(),
            "decoded song"
        ),
        Err(err) => warn!(path, kind = ?err.kind(), error = %err, "failed to load song"),
    }
    result
}
