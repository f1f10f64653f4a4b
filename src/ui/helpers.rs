use std::error::Error;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use crate::models::Song;

/// Lay out the song the way the song info screen reads: heading, title,
/// songbook reference, then every verse under its bold name with a blank line
/// after it.
pub(crate) fn build_song_lines(song: &Song) -> Vec<Line<'static>> {
    let heading = Style::default()
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::UNDERLINED);
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled("Song info", heading)),
        Line::from(""),
        Line::from(Span::styled(song.display_title().to_string(), bold)),
    ];

    if let Some(songbook) = song.primary_songbook() {
        lines.push(Line::from(format!("Songbook: {}", songbook.display_label())));
    }
    lines.push(Line::from(""));

    for verse in song.lyrics() {
        lines.push(Line::from(Span::styled(verse.name().to_string(), bold)));
        for line in verse.lines() {
            lines.push(Line::from(line.content().to_string()));
        }
        lines.push(Line::from(""));
    }

    lines
}

/// Produce a rectangle centered within `area` that spans the requested percent
/// of the width and height.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(horizontal[1]);

    vertical[1]
}

/// Flatten an error and its causes into one line, skipping causes whose text
/// the previous message already repeats.
pub(crate) fn surface_error(err: &(dyn Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openlyrics::{decode, DecodeError};

    fn plain(lines: &[Line<'_>]) -> Vec<String> {
        lines.iter().map(|line| line.to_string()).collect()
    }

    #[test]
    fn song_lines_follow_the_song_info_layout() {
        let song = decode(
            r#"<song xmlns="http://openlyrics.info/namespace/2009/song">
  <properties><titles><title>Amazing Grace</title></titles>
    <songbooks><songbook name="Hymnal" entry="42"/></songbooks></properties>
  <lyrics><verse name="v1">Amazing grace<br/>how sweet the sound</verse><verse name="c1">chorus</verse></lyrics>
</song>"#,
        )
        .unwrap();

        assert_eq!(
            plain(&build_song_lines(&song)),
            vec![
                "Song info",
                "",
                "Amazing Grace",
                "Songbook: Hymnal, No. 42",
                "",
                "v1",
                "Amazing grace",
                "how sweet the sound",
                "",
                "c1",
                "chorus",
                "",
            ]
        );
    }

    #[test]
    fn songbook_line_is_omitted_without_songbooks() {
        let song = decode(
            r#"<song xmlns="http://openlyrics.info/namespace/2009/song">
  <properties><titles><title>T</title></titles></properties><lyrics/></song>"#,
        )
        .unwrap();

        let text = plain(&build_song_lines(&song));
        assert!(text.iter().all(|line| !line.starts_with("Songbook")));
    }

    #[test]
    fn surfaced_errors_include_io_causes_once() {
        let err = DecodeError::AssetNotFound {
            path: "a.xml".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(surface_error(&err), "asset `a.xml` not found: gone");

        let malformed = decode("<song").unwrap_err();
        let text = surface_error(&malformed);
        assert!(text.starts_with("malformed XML document: "));
        let cause = std::error::Error::source(&malformed).unwrap().to_string();
        assert_eq!(text.matches(&cause).count(), 1);
    }
}
