use std::cell::Cell;

use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;
use tracing::debug;

use crate::assets::AssetSource;
use crate::models::Song;
use crate::openlyrics::read_song;

use super::helpers::{build_song_lines, centered_rect, surface_error};

/// Rows reserved for the toggle button at the top of the screen.
const BUTTON_HEIGHT: u16 = 3;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows moved by PageUp/PageDown.
const PAGE_SCROLL: u16 = 10;

/// Outcome of the most recent load attempt. A song is loaded at most once;
/// later toggles reuse whatever is cached here.
enum SongState {
    NotLoaded,
    Loaded(Song),
    Failed(String),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Application state for the lyrics viewer.
pub struct App {
    source: Box<dyn AssetSource>,
    song_path: String,
    song: SongState,
    show_content: bool,
    scroll: u16,
    /// Inner width and height of the lyrics pane at the last draw.
    pane: Cell<(u16, u16)>,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(source: Box<dyn AssetSource>, song_path: impl Into<String>) -> Self {
        Self {
            source,
            song_path: song_path.into(),
            song: SongState::NotLoaded,
            show_content: false,
            scroll: 0,
            pane: Cell::new((0, 0)),
            status: None,
        }
    }

    /// The song, once a load has succeeded.
    pub fn song(&self) -> Option<&Song> {
        match &self.song {
            SongState::Loaded(song) => Some(song),
            _ => None,
        }
    }

    /// Message of the last failed load, if the last load failed.
    pub fn load_error(&self) -> Option<&str> {
        match &self.song {
            SongState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_showing_content(&self) -> bool {
        self.show_content
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Apply one key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Enter | KeyCode::Char(' ') => self.toggle_content(),
            KeyCode::Char('r') => self.retry_load(),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::PageUp => self.scroll_by(-i32::from(PAGE_SCROLL)),
            KeyCode::PageDown => self.scroll_by(i32::from(PAGE_SCROLL)),
            KeyCode::Home if self.show_content => self.scroll = 0,
            KeyCode::End if self.show_content => self.scroll = self.max_scroll(),
            _ => {}
        }
        false
    }

    fn toggle_content(&mut self) {
        if matches!(self.song, SongState::NotLoaded) {
            self.load_song();
        }
        self.show_content = !self.show_content;
        debug!(visible = self.show_content, "toggled lyrics");
    }

    fn retry_load(&mut self) {
        if !matches!(self.song, SongState::Failed(_)) {
            return;
        }
        self.load_song();
        self.show_content = true;
    }

    fn load_song(&mut self) {
        self.scroll = 0;
        match read_song(self.source.as_ref(), &self.song_path) {
            Ok(song) => {
                self.set_status(
                    format!("Loaded \"{}\".", song.display_title()),
                    StatusKind::Info,
                );
                self.song = SongState::Loaded(song);
            }
            Err(err) => {
                self.set_status(
                    format!("Failed to load {}.", self.song_path),
                    StatusKind::Error,
                );
                self.song = SongState::Failed(surface_error(&err));
            }
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        if !self.show_content {
            return;
        }
        let target = (i32::from(self.scroll) + delta).clamp(0, i32::from(self.max_scroll()));
        self.scroll = u16::try_from(target).unwrap_or(0);
    }

    /// Scroll offset that puts the last wrapped row at the bottom of the pane.
    /// Before the first draw the pane size is unknown, so every logical line
    /// counts as one row and the last one may reach the top.
    fn max_scroll(&self) -> u16 {
        let SongState::Loaded(song) = &self.song else {
            return 0;
        };
        let (width, height) = self.pane.get();
        let rows = if width == 0 {
            build_song_lines(song).len().saturating_sub(1)
        } else {
            song_paragraph(song)
                .line_count(width)
                .saturating_sub(usize::from(height))
        };
        u16::try_from(rows).unwrap_or(u16::MAX)
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(BUTTON_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_button(frame, chunks[0]);
        if self.show_content {
            match &self.song {
                SongState::Loaded(song) => self.draw_song(frame, chunks[1], song),
                SongState::Failed(message) => self.draw_error(frame, chunks[1], message),
                SongState::NotLoaded => {}
            }
        }
        self.draw_footer(frame, chunks[2]);
    }

    fn draw_button(&self, frame: &mut Frame, area: Rect) {
        let label = if self.show_content {
            "Hide lyrics"
        } else {
            "Show lyrics"
        };
        let button = Paragraph::new(Line::from(Span::styled(
            format!("[ {label} ]"),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("OpenLyrics Viewer"),
        );
        frame.render_widget(button, area);
    }

    fn draw_song(&self, frame: &mut Frame, area: Rect, song: &Song) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(self.song_path.as_str());
        let inner = block.inner(area);
        self.pane.set((inner.width, inner.height));

        frame.render_widget(block, area);
        frame.render_widget(song_paragraph(song).scroll((self.scroll, 0)), inner);
    }

    fn draw_error(&self, frame: &mut Frame, area: Rect, message: &str) {
        let popup = centered_rect(80, 50, area);
        frame.render_widget(Clear, popup);

        let lines = vec![
            Line::from(Span::styled(
                "Unable to read lyrics xml",
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(message.to_string()),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Error"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, popup);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let key_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);

        let mut spans = vec![
            Span::styled("[Enter]", key_style),
            Span::raw(if self.show_content {
                " Hide lyrics   "
            } else {
                " Show lyrics   "
            }),
        ];
        if self.show_content && matches!(self.song, SongState::Loaded(_)) {
            spans.push(Span::styled("[↑↓/PgUp/PgDn]", key_style));
            spans.push(Span::raw(" Scroll   "));
        }
        if matches!(self.song, SongState::Failed(_)) {
            spans.push(Span::styled("[r]", key_style));
            spans.push(Span::raw(" Retry   "));
        }
        spans.push(Span::styled("[q]", key_style));
        spans.push(Span::raw(" Quit"));
        Line::from(spans)
    }
}

fn song_paragraph(song: &Song) -> Paragraph<'static> {
    Paragraph::new(build_song_lines(song)).wrap(Wrap { trim: false })
}
