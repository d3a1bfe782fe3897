//! UI rendering helpers for the terminal user interface.
//!
//! Everything here is a projection of the `App` model and the session's
//! read-only snapshots; nothing in this module mutates state.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::time::Duration;

use crate::app::{App, Confirm, Focus, InputMode};
use crate::config::{ControlsSettings, TimeField, UiSettings};
use crate::library::{GenreFilter, Track, display_from_fields, format_mss};
use crate::playback::{PlaybackState, RepeatMode};
use crate::playlist::Playlist;
use crate::session::{NowPlaying, Session};
use crate::transport::TransportDevice;

const LEFT_PAD: Padding = Padding {
    left: 1,
    right: 0,
    top: 0,
    bottom: 0,
};

/// Render the controls help text, incorporating the configured steps.
fn controls_text(controls: &ControlsSettings) -> String {
    [
        "[j/k] up/down".to_string(),
        "[h/l] prev/next".to_string(),
        format!("[H/L] seek -/+{}%", controls.seek_step_percent),
        "[enter] play/open".to_string(),
        "[space/p] play/pause".to_string(),
        format!("[-/+] volume {}%", controls.volume_step_percent),
        "[tab] pane".to_string(),
        "[gg/G] top/bottom".to_string(),
        "[zz] now playing".to_string(),
        "[/] search".to_string(),
        "[f] genre".to_string(),
        "[s] shuffle".to_string(),
        "[r] repeat".to_string(),
        "[n] new playlist".to_string(),
        "[a] add to playlist".to_string(),
        "[d] remove".to_string(),
        "[i] import".to_string(),
        "[K] metadata".to_string(),
        "[q] quit".to_string(),
    ]
    .join(" | ")
}

/// Build the now-playing time text (elapsed/total/remaining) per `UiSettings`.
fn now_playing_time_text(
    elapsed: Duration,
    total: Option<Duration>,
    ui: &UiSettings,
) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    for f in &ui.now_playing_time_fields {
        match f {
            TimeField::Elapsed => parts.push(format_mss(elapsed)),
            TimeField::Total => {
                if let Some(t) = total {
                    parts.push(format_mss(t));
                }
            }
            TimeField::Remaining => {
                if let Some(t) = total {
                    parts.push(format!("-{}", format_mss(t.saturating_sub(elapsed))));
                }
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(&ui.now_playing_time_separator))
    }
}

fn now_playing_text(now: &NowPlaying<'_>, ui: &UiSettings) -> String {
    let song = display_from_fields(
        now.track,
        &ui.now_playing_track_fields,
        &ui.now_playing_track_separator,
    );
    let state = match now.state {
        PlaybackState::Playing => "Playing",
        PlaybackState::Paused => "Paused",
        PlaybackState::Stopped => "Stopped",
    };
    let mut text = match now_playing_time_text(now.position, now.duration, ui) {
        Some(time) => format!("Song: {song} [{time}] • {state}"),
        None => format!("Song: {song} • {state}"),
    };
    if now.index.is_none() {
        text.push_str(" (outside this view)");
    }
    text
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(3);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Format an optional duration, rounding up partial seconds.
fn format_duration_ceil(d: Option<Duration>) -> String {
    let Some(d) = d else {
        return "-".to_string();
    };

    let mut total_secs = d.as_secs();
    if d.subsec_nanos() > 0 {
        total_secs = total_secs.saturating_add(1);
    }
    format!("{}:{:02} ({}s)", total_secs / 60, total_secs % 60, total_secs)
}

/// Scroll window that keeps the selected row roughly centered.
fn visible_window(total: usize, height: usize, selected: usize) -> (usize, usize) {
    if total <= height || height == 0 {
        return (0, total);
    }
    let half = height / 2;
    let mut start = selected.saturating_sub(half);
    if start + height > total {
        start = total - height;
    }
    (start, start + height)
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let block = Block::default().borders(Borders::ALL).title(title);
    if focused {
        block.border_style(Style::default().add_modifier(Modifier::BOLD))
    } else {
        block
    }
}

fn status_text<T: TransportDevice>(app: &App, session: &Session<T>, ui: &UiSettings) -> String {
    let mut parts: Vec<String> = Vec::new();

    if app.follow_playback {
        parts.push(" CURSOR: Follow".to_string());
    } else {
        parts.push(" CURSOR: Free-roam".to_string());
    }

    let view = match session.selected_playlist() {
        Some(p) => format!("VIEW: {}", p.name),
        None => "VIEW: Library".to_string(),
    };
    parts.push(view);

    let repeat = match session.cursor().repeat_mode {
        RepeatMode::Off => "REPEAT: Off",
        RepeatMode::RepeatAll => "REPEAT: All",
        RepeatMode::RepeatOne => "REPEAT: One",
    };
    parts.push(repeat.to_string());

    if session.cursor().is_shuffling {
        parts.push("Shuffle: ON".to_string());
    } else {
        parts.push("Shuffle: OFF".to_string());
    }
    parts.push(format!("Volume: {}%", session.volume_percent()));

    let filter = session.filter();
    if filter.is_active() {
        let mut f = String::from("FILTER:");
        let q = filter.search().trim();
        if !q.is_empty() {
            f.push_str(&format!(" \"{q}\""));
        }
        if let GenreFilter::Genre(g) = filter.genre() {
            f.push_str(&format!(" genre={g}"));
        }
        parts.push(f);
    }

    match session.now_playing() {
        Some(now) => parts.push(now_playing_text(&now, ui)),
        None if session.cursor().is_held_paused() => parts.push("Loading… (paused)".to_string()),
        None if session.cursor().is_pending() => parts.push("Loading…".to_string()),
        None => parts.push("Stopped".to_string()),
    }

    let mut text = parts.join(" • ");
    if let Some(notice) = &app.notice {
        text.push('\n');
        text.push(' ');
        text.push_str(notice);
    }
    text
}

fn playlist_label(playlist: &Playlist) -> String {
    if playlist.is_empty() {
        format!("{} (empty)", playlist.name)
    } else {
        format!("{} ({})", playlist.name, playlist.len())
    }
}

fn draw_playlists<T: TransportDevice>(frame: &mut Frame, area: Rect, app: &App, session: &Session<T>) {
    let selected_id = session.selected_playlist_id();
    let mut items: Vec<ListItem> = Vec::with_capacity(session.playlists().len() + 1);

    let library = format!("Library ({})", session.library().len());
    items.push(if selected_id.is_none() {
        ListItem::new(library).bold()
    } else {
        ListItem::new(library)
    });
    for p in session.playlists() {
        let label = playlist_label(p);
        items.push(if selected_id == Some(p.id) {
            ListItem::new(label).bold()
        } else {
            ListItem::new(label)
        });
    }

    let focused = app.focus == Focus::Playlists;
    let list = List::new(items)
        .block(pane_block(" playlists ", focused))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if focused {
        state.select(Some(app.playlist_row));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_tracks<T: TransportDevice>(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    session: &Session<T>,
    tracks: &[&Track],
    ui: &UiSettings,
) {
    let loaded = session.cursor().loaded_track();
    let total = tracks.len();
    let height = area.height.saturating_sub(2) as usize;
    let (start, end) = visible_window(total, height, app.selected);

    // Only build ListItems for the visible window.
    let visible_items: Vec<ListItem> = tracks[start..end]
        .iter()
        .map(|t| {
            let text = display_from_fields(t, &ui.track_fields, &ui.track_separator);
            if loaded == Some(t.id) {
                ListItem::new(format!("♪ {text}")).bold()
            } else {
                ListItem::new(text)
            }
        })
        .collect();

    let title = match session.selected_playlist() {
        Some(p) => format!(" {} ", p.name),
        None => " tracks ".to_string(),
    };
    let list = List::new(visible_items)
        .block(pane_block(&title, app.focus == Focus::Tracks))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    if total > 0 {
        state.select(Some(app.selected.saturating_sub(start)));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_metadata(frame: &mut Frame, area: Rect, track: Option<&Track>) {
    let popup_area = centered_rect_sized(72, 9, area);
    frame.render_widget(Clear, popup_area);

    let meta = match track {
        Some(track) => format!(
            "Name: {}\nArtist: {}\nAlbum: {}\nGenre: {}\nDuration: {}\nLocator: {}",
            track.name,
            track.artist,
            track.album,
            track.genre,
            format_duration_ceil(track.duration),
            track.locator
        ),
        None => "No track selected".to_string(),
    };
    let paragraph = Paragraph::new(meta)
        .block(
            Block::default()
                .padding(LEFT_PAD)
                .borders(Borders::ALL)
                .title(" metadata (K closes) "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, popup_area);
}

fn draw_popup(frame: &mut Frame, area: Rect, title: &str, body: String) {
    let popup_area = centered_rect_sized(60, 3, area);
    frame.render_widget(Clear, popup_area);
    let paragraph = Paragraph::new(body)
        .block(
            Block::default()
                .padding(LEFT_PAD)
                .borders(Borders::ALL)
                .title(title),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, popup_area);
}

fn draw_picker<T: TransportDevice>(frame: &mut Frame, area: Rect, session: &Session<T>, choice: usize) {
    let playlists = session.playlists();
    let height = u16::try_from(playlists.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup_area = centered_rect_sized(40, height, area);
    frame.render_widget(Clear, popup_area);

    let items: Vec<ListItem> = playlists
        .iter()
        .map(|p| ListItem::new(p.name.as_str()))
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" add to playlist (enter/esc) "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(choice));
    frame.render_stateful_widget(list, popup_area, &mut state);
}

/// Render the entire UI into the provided `frame`.
pub fn draw<T: TransportDevice>(
    frame: &mut Frame,
    app: &App,
    session: &Session<T>,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(1),
            Constraint::Length(5),
        ])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" medley ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let status = Paragraph::new(status_text(app, session, ui_settings))
        .block(Block::bordered().padding(LEFT_PAD).title(" status "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status, chunks[1]);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(28), Constraint::Min(10)])
        .split(chunks[2]);
    let tracks = session.active_tracks();
    draw_playlists(frame, panes[0], app, session);
    draw_tracks(frame, panes[1], app, session, &tracks, ui_settings);

    // Popups stay inside the main area so header/status/footer remain visible.
    if app.metadata_window {
        draw_metadata(frame, chunks[2], tracks.get(app.selected).copied());
    }
    match &app.mode {
        InputMode::Normal => {}
        InputMode::Editing { prompt, input } => {
            draw_popup(frame, chunks[2], prompt.title(), format!("{input}▏"));
        }
        InputMode::PickPlaylist { choice, .. } => draw_picker(frame, chunks[2], session, *choice),
        InputMode::Confirm(question) => {
            let body = match question {
                Confirm::RemoveTrack(id) => format!(
                    "Remove \"{}\" from the library and every playlist? (y/n)",
                    session.find(*id).map_or("?", |t| t.name.as_str())
                ),
                Confirm::DeletePlaylist(id) => format!(
                    "Delete playlist \"{}\"? (y/n)",
                    session
                        .playlists()
                        .iter()
                        .find(|p| p.id == *id)
                        .map_or("?", |p| p.name.as_str())
                ),
            };
            draw_popup(frame, chunks[2], " confirm ", body);
        }
    }

    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(LEFT_PAD),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::TrackId;
    use crate::playlist::PlaylistId;

    #[test]
    fn window_centers_the_selection() {
        assert_eq!(visible_window(5, 10, 3), (0, 5));
        assert_eq!(visible_window(100, 10, 50), (45, 55));
        assert_eq!(visible_window(100, 10, 98), (90, 100));
        assert_eq!(visible_window(100, 0, 3), (0, 100));
    }

    #[test]
    fn time_text_follows_the_configured_fields() {
        let ui = UiSettings {
            now_playing_time_fields: vec![TimeField::Elapsed, TimeField::Remaining],
            now_playing_time_separator: " | ".to_string(),
            ..UiSettings::default()
        };
        let text = now_playing_time_text(
            Duration::from_secs(65),
            Some(Duration::from_secs(200)),
            &ui,
        );
        assert_eq!(text.as_deref(), Some("1:05 | -2:15"));

        // Without a known length only the elapsed part is left.
        let text = now_playing_time_text(Duration::from_secs(5), None, &ui);
        assert_eq!(text.as_deref(), Some("0:05"));
    }

    #[test]
    fn partial_seconds_round_up() {
        assert_eq!(format_duration_ceil(None), "-");
        assert_eq!(
            format_duration_ceil(Some(Duration::from_millis(61_200))),
            "1:02 (62s)"
        );
    }

    #[test]
    fn playlist_label_counts_tracks() {
        let mut playlist = Playlist::new(PlaylistId::generate(), "road".to_string());
        assert_eq!(playlist_label(&playlist), "road (empty)");
        playlist.push(TrackId::generate());
        playlist.push(TrackId::generate());
        assert_eq!(playlist_label(&playlist), "road (2)");
    }
}
