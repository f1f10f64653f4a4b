//! Where song documents come from. The decoder only ever sees text, so the
//! asset layer is a small trait that hands out readers by path: one backed by
//! a directory on disk and one backed by memory (tests plus the song compiled
//! into the binary).

use std::borrow::Cow;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufReader, Cursor, Read};
use std::path::{Component, Path, PathBuf};

use crate::openlyrics::DecodeError;

/// Path of the sample song shipped inside the binary.
pub const BUNDLED_SONG: &str = "assets/amazing_grace.xml";

const BUNDLED_ASSETS: &[(&str, &[u8])] = &[(
    BUNDLED_SONG,
    include_bytes!("../assets/amazing_grace.xml"),
)];

/// Supplies raw asset content by path.
///
/// The returned reader is the acquired resource: it is open while the caller
/// reads from it and released when dropped.
pub trait AssetSource {
    fn get(&self, path: &str) -> io::Result<Box<dyn Read + '_>>;
}

/// Open `path`, read it to the end as UTF-8 and release it.
///
/// A missing asset becomes [`DecodeError::AssetNotFound`]; any other I/O
/// problem, including invalid UTF-8, becomes [`DecodeError::AssetReadFailure`].
pub fn read_asset(source: &dyn AssetSource, path: &str) -> Result<String, DecodeError> {
    let mut reader = source
        .get(path)
        .map_err(|err| DecodeError::from_io(path, err))?;

    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|err| DecodeError::from_io(path, err))?;

    Ok(text)
}

/// Assets stored below a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryAssets {
    root: PathBuf,
}

impl DirectoryAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for DirectoryAssets {
    fn get(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        let relative = Path::new(path);
        let escapes_root = relative.is_absolute()
            || relative
                .components()
                .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
        if escapes_root {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("asset path `{path}` must stay inside {}", self.root.display()),
            ));
        }

        let file = File::open(self.root.join(relative))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Assets held in memory, keyed by their path.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    entries: HashMap<String, Cow<'static, [u8]>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// The assets compiled into the binary.
    pub fn bundled() -> Self {
        let mut assets = Self::new();
        for (path, bytes) in BUNDLED_ASSETS {
            assets
                .entries
                .insert((*path).to_string(), Cow::Borrowed(*bytes));
        }
        assets
    }

    /// Add or replace an asset.
    pub fn with(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.entries
            .insert(path.into(), Cow::Owned(contents.into()));
        self
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl AssetSource for MemoryAssets {
    fn get(&self, path: &str) -> io::Result<Box<dyn Read + '_>> {
        let bytes = self.entries.get(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("no bundled asset named `{path}`"))
        })?;
        Ok(Box::new(Cursor::new(&bytes[..])))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::openlyrics::DecodeErrorKind;

    #[test]
    fn memory_assets_read_back_their_contents() {
        let assets = MemoryAssets::new().with("song.xml", "<song/>");
        assert_eq!(read_asset(&assets, "song.xml").unwrap(), "<song/>");
    }

    #[test]
    fn missing_memory_asset_is_not_found() {
        let err = read_asset(&MemoryAssets::new(), "nope.xml").unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::AssetNotFound);
    }

    #[test]
    fn invalid_utf8_is_a_read_failure() {
        let assets = MemoryAssets::new().with("bad.xml", vec![0x3c, 0xff, 0xfe, 0x3e]);
        let err = read_asset(&assets, "bad.xml").unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::AssetReadFailure);
    }

    #[test]
    fn bundled_assets_contain_the_sample_song() {
        let assets = MemoryAssets::bundled();
        assert!(assets.paths().any(|path| path == BUNDLED_SONG));
        let text = read_asset(&assets, BUNDLED_SONG).unwrap();
        assert!(text.contains("Amazing Grace"));
    }

    #[test]
    fn directory_assets_resolve_relative_paths() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("assets")).unwrap();
        fs::write(dir.path().join("assets/song.xml"), "content").unwrap();

        let assets = DirectoryAssets::new(dir.path());
        assert_eq!(read_asset(&assets, "assets/song.xml").unwrap(), "content");
        assert_eq!(read_asset(&assets, "./assets/song.xml").unwrap(), "content");
    }

    #[test]
    fn directory_assets_report_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let assets = DirectoryAssets::new(dir.path());
        let err = read_asset(&assets, "missing.xml").unwrap_err();
        assert_eq!(err.kind(), DecodeErrorKind::AssetNotFound);
    }

    #[test]
    fn directory_assets_refuse_to_leave_the_root() {
        let dir = tempfile::tempdir().unwrap();
        let assets = DirectoryAssets::new(dir.path().join("inner"));
        for path in ["../secret.xml", "/etc/passwd", "assets/../../x.xml"] {
            let err = read_asset(&assets, path).unwrap_err();
            assert_eq!(err.kind(), DecodeErrorKind::AssetReadFailure, "{path}");
        }
    }
}
