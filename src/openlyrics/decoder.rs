//! Explicit mapping from the OpenLyrics XML tree to the song model.
//!
//! Elements are matched by local name. Children may sit in the OpenLyrics
//! namespace or in no namespace at all, and may redeclare the namespace
//! themselves; elements from any other namespace are skipped.

use roxmltree::{Document, Node};

use crate::models::{Line, Properties, Song, Songbook, Title, Verse};

use super::error::DecodeError;
use super::normalize::normalize_line_breaks;
use super::OPENLYRICS_NAMESPACE;

/// Decode an OpenLyrics document into a [`Song`].
///
/// The text is normalized first (see [`normalize_line_breaks`]) and then parsed
/// as XML. Nothing is returned unless the whole song decoded, so callers never
/// see a half-populated model.
pub fn decode(document_text: &str) -> Result<Song, DecodeError> {
    let normalized = normalize_line_breaks(document_text);
    let doc = Document::parse(&normalized).map_err(DecodeError::MalformedDocument)?;

    let root = doc.root_element();
    let root_name = root.tag_name();
    if root_name.name() != "song" || root_name.namespace() != Some(OPENLYRICS_NAMESPACE) {
        return Err(DecodeError::UnexpectedRoot {
            found_name: root_name.name().to_string(),
            found_namespace: root_name.namespace().map(str::to_string),
        });
    }

    let properties = first_child(root, "properties")
        .ok_or(DecodeError::MissingRequiredField("properties"))
        .and_then(decode_properties)?;

    let lyrics = first_child(root, "lyrics")
        .ok_or(DecodeError::MissingRequiredField("lyrics"))?;
    let verses = song_children(lyrics, "verse")
        .map(decode_verse)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Song {
        properties,
        lyrics: verses,
    })
}

fn decode_properties(node: Node<'_, '_>) -> Result<Properties, DecodeError> {
    let titles: Vec<Title> = first_child(node, "titles")
        .map(|titles| {
            song_children(titles, "title")
                .map(|title| Title {
                    value: text_content(title).trim().to_string(),
                    language: title.attribute("lang").map(str::to_string),
                })
                .collect()
        })
        .unwrap_or_default();

    if titles.is_empty() {
        return Err(DecodeError::MissingRequiredField("title"));
    }

    let songbooks = match first_child(node, "songbooks") {
        Some(songbooks) => song_children(songbooks, "songbook")
            .map(decode_songbook)
            .collect::<Result<Vec<_>, _>>()?,
        None => Vec::new(),
    };

    Ok(Properties { titles, songbooks })
}

fn decode_songbook(node: Node<'_, '_>) -> Result<Songbook, DecodeError> {
    let name = node
        .attribute("name")
        .ok_or(DecodeError::MissingRequiredField("songbook name"))?;

    Ok(Songbook {
        name: name.to_string(),
        entry: node.attribute("entry").map(str::to_string),
    })
}

fn decode_verse(node: Node<'_, '_>) -> Result<Verse, DecodeError> {
    let name = node
        .attribute("name")
        .ok_or(DecodeError::MissingRequiredField("verse name"))?;

    let mut text = VerseText::default();
    collect_verse_text(node, &mut text);

    Ok(Verse {
        name: name.to_string(),
        lines: split_lines(&text.text),
    })
}

/// Verse text being assembled, with enough state to place line breaks that
/// come from elements rather than from normalized `<br/>` tags.
#[derive(Default)]
struct VerseText {
    text: String,
    /// Length of `text` right after the last emitted break.
    line_start: usize,
    /// Set after a break until non-blank text arrives.
    at_break: bool,
    /// Number of `<lines>` blocks seen so far.
    blocks: usize,
}

impl VerseText {
    fn push_text(&mut self, text: &str) {
        let text = if self.at_break {
            text.trim_start()
        } else {
            text
        };
        if !text.is_empty() {
            self.at_break = false;
        }
        self.text.push_str(text);
    }

    /// End the current line. Indentation left over from the source layout is
    /// dropped on both sides of the break, but an earlier break is never eaten.
    fn push_break(&mut self) {
        let keep = self.line_start.max(self.text.trim_end().len());
        self.text.truncate(keep);
        self.text.push('\n');
        self.line_start = self.text.len();
        self.at_break = true;
    }
}

/// Gather the lyric text below a verse. `<comment>` text is not part of the
/// lyrics. `<br>` elements that survived normalization (prefixed or spelled
/// differently) end a line, and every `<lines>` block after the first starts a
/// new one, even when the block is empty.
fn collect_verse_text(node: Node<'_, '_>, out: &mut VerseText) {
    for child in node.children() {
        if child.is_text() {
            out.push_text(child.text().unwrap_or_default());
        } else if is_song_element(child, "br") {
            out.push_break();
        } else if child.is_element() && !is_song_element(child, "comment") {
            if is_song_element(child, "lines") {
                if out.blocks > 0 {
                    out.push_break();
                }
                out.blocks += 1;
            }
            collect_verse_text(child, out);
        }
    }
}

/// Split normalized verse text into lines. Leading and trailing blank space of
/// the verse is dropped, every line is trimmed, and empty lines between
/// content are kept.
fn split_lines(text: &str) -> Vec<Line> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    trimmed
        .split('\n')
        .map(|segment| Line {
            content: segment.trim().to_string(),
        })
        .collect()
}

fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

fn is_song_element(node: Node<'_, '_>, name: &str) -> bool {
    if !node.is_element() {
        return false;
    }
    let tag = node.tag_name();
    tag.name() == name && matches!(tag.namespace(), None | Some(OPENLYRICS_NAMESPACE))
}

fn song_children<'a, 'input>(
    node: Node<'a, 'input>,
    name: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(move |child| is_song_element(*child, name))
}

fn first_child<'a, 'input>(node: Node<'a, 'input>, name: &'static str) -> Option<Node<'a, 'input>> {
    song_children(node, name).next()
}
