/// Spellings of the OpenLyrics inline break element that get turned into
/// newlines. Writers disagree on the space before the slash.
const LINE_BREAK_TAGS: &[&str] = &["<br/>", "<br />"];

/// Replace every inline `<br/>` with a literal newline.
///
/// This runs over the raw document before XML parsing. Verses store several
/// lines as one text node interrupted by break elements; once the breaks are
/// plain newlines the decoder can read the verse as ordinary text and split it.
///
/// Whitespace touching a break tag is absorbed into the single newline, so a
/// pretty-printed `<br/>` followed by the document's own line break and
/// indentation still ends exactly one line. Two adjacent tags still produce an
/// empty line between them.
pub fn normalize_line_breaks(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut rest = text;

    while let Some((start, tag_len)) = next_break(rest) {
        normalized.push_str(rest[..start].trim_end());
        normalized.push('\n');
        rest = rest[start + tag_len..].trim_start();
    }

    normalized.push_str(rest);
    normalized
}

/// Byte offset and length of the earliest break tag in `text`.
fn next_break(text: &str) -> Option<(usize, usize)> {
    LINE_BREAK_TAGS
        .iter()
        .filter_map(|tag| text.find(tag).map(|pos| (pos, tag.len())))
        .min_by_key(|(pos, _)| *pos)
}
