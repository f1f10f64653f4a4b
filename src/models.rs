//! Domain models produced by the OpenLyrics decoder and rendered by the TUI.
//! The types are plain values: the decoder builds them once and every other
//! layer only reads them. Fields stay crate-private so nothing outside the
//! decoder can break the "at least one title" guarantee after the fact.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
/// A decoded OpenLyrics song: metadata plus verses in document order.
pub struct Song {
    pub(crate) properties: Properties,
    pub(crate) lyrics: Vec<Verse>,
}

impl Song {
    /// Metadata block taken from `<properties>`.
    pub fn properties(&self) -> &Properties {
        &self.properties
    }

    /// Verses in the order they appear in `<lyrics>`.
    pub fn lyrics(&self) -> &[Verse] {
        &self.lyrics
    }

    /// The first title. Decoding guarantees one exists, so the screen can show
    /// it without having to invent a placeholder.
    pub fn display_title(&self) -> &str {
        self.properties
            .titles
            .first()
            .map(|title| title.value.as_str())
            .unwrap_or_default()
    }

    /// The first songbook reference, if the document lists any.
    pub fn primary_songbook(&self) -> Option<&Songbook> {
        self.properties.songbooks.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Song metadata. `titles` is never empty for a decoded song.
pub struct Properties {
    pub(crate) titles: Vec<Title>,
    pub(crate) songbooks: Vec<Songbook>,
}

impl Properties {
    pub fn titles(&self) -> &[Title] {
        &self.titles
    }

    /// Songbooks in document order; empty when `<songbooks>` is absent.
    pub fn songbooks(&self) -> &[Songbook] {
        &self.songbooks
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// One `<title>` entry, optionally tagged with its language.
pub struct Title {
    pub(crate) value: String,
    pub(crate) language: Option<String>,
}

impl Title {
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Content of the `lang` attribute, e.g. `en` or `de-CH`.
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }
}

impl fmt::Display for Title {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Reference to a published collection, with the hymn number when known.
pub struct Songbook {
    pub(crate) name: String,
    pub(crate) entry: Option<String>,
}

impl Songbook {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Entry inside the songbook. Kept as text because hymnals use numbers
    /// such as `42a`.
    pub fn entry(&self) -> Option<&str> {
        self.entry.as_deref()
    }

    /// `Hymnal, No. 42`, or just the name when there is no entry.
    pub fn display_label(&self) -> String {
        match &self.entry {
            Some(entry) => format!("{}, No. {}", self.name, entry),
            None => self.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A named block of lyric lines such as `v1` or `c1`.
pub struct Verse {
    pub(crate) name: String,
    pub(crate) lines: Vec<Line>,
}

impl Verse {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// All lines joined with newlines, the way the song screen prints a verse.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// A single lyric line. Never contains a newline.
pub struct Line {
    pub(crate) content: String,
}

impl Line {
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.content)
    }
}
