use std::path::PathBuf;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::app::{App, Confirm, Focus, InputMode, Prompt};
use crate::config;
use crate::error::Result;
use crate::library::GenreFilter;
use crate::runtime::startup::import_notice;
use crate::session::Session;
use crate::transport::{TransportDevice, TransportEvent};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    pending_zz: bool,
}

/// Main terminal event loop: feeds device events into the session, draws,
/// and dispatches keys. Returns `Ok(())` when the user quits.
pub fn run<T: TransportDevice>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    session: &mut Session<T>,
    events: &Receiver<TransportEvent>,
    state: &mut EventLoopState,
) -> anyhow::Result<()> {
    loop {
        while let Ok(event) = events.try_recv() {
            let result = session.handle_event(event);
            report(app, result);
        }

        let len = session.active_sequence().len();
        app.clamp_selection(len);
        app.playlist_row = app.playlist_row.min(session.playlists().len());
        if app.follow_playback && app.is_normal() {
            if let Some(idx) = session.current_index() {
                app.selected = idx;
            }
        }

        terminal.draw(|f| ui::draw(f, app, session, &settings.ui, &settings.controls))?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, app, session, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Log a failed session operation and surface it in the status box.
fn report(app: &mut App, result: Result<()>) {
    if let Err(e) = result {
        warn!(error = %e, "operation failed");
        app.set_notice(e.to_string());
    }
}

/// Dispatch one key press. Returns true when the user asked to quit.
pub fn handle_key_event<T: TransportDevice>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    session: &mut Session<T>,
    state: &mut EventLoopState,
) -> bool {
    app.clear_notice();

    match app.mode.clone() {
        InputMode::Normal => return handle_normal_key(key, settings, app, session, state),
        InputMode::Editing { .. } => handle_prompt_key(key, settings, app, session),
        InputMode::PickPlaylist { track, choice } => {
            let count = session.playlists().len();
            match key.code {
                KeyCode::Esc | KeyCode::Char('q') => app.cancel(),
                KeyCode::Char('j') | KeyCode::Down => app.picker_next(count),
                KeyCode::Char('k') | KeyCode::Up => app.picker_prev(count),
                KeyCode::Enter => {
                    app.cancel();
                    let Some(playlist) = session.playlists().get(choice) else {
                        return false;
                    };
                    let (id, name) = (playlist.id, playlist.name.clone());
                    match session.add_to_playlist(id, track) {
                        Ok(true) => app.set_notice(format!("Added to {name}")),
                        Ok(false) => app.set_notice(format!("Already in {name}")),
                        Err(e) => report(app, Err(e)),
                    }
                }
                _ => {}
            }
        }
        InputMode::Confirm(question) => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                app.cancel();
                let result = match question {
                    Confirm::RemoveTrack(id) => session.remove_track(id),
                    Confirm::DeletePlaylist(id) => session.delete_playlist(id),
                };
                report(app, result);
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel(),
            _ => {}
        },
    }

    false
}

fn handle_prompt_key<T: TransportDevice>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    session: &mut Session<T>,
) {
    match key.code {
        KeyCode::Esc => app.cancel(),
        KeyCode::Backspace => app.pop_input_char(),
        KeyCode::Char(c) if !c.is_control() => app.push_input_char(c),
        KeyCode::Enter => {
            let Some((prompt, input)) = app.take_input() else {
                return;
            };
            match prompt {
                Prompt::Search => {
                    session.set_search(input.trim());
                    app.selected = 0;
                }
                Prompt::Genre => {
                    session.set_genre(GenreFilter::parse(&input));
                    app.selected = 0;
                }
                Prompt::NewPlaylist => match session.create_playlist(&input) {
                    Some(_) => app.set_notice(format!("Created playlist {}", input.trim())),
                    None => app.set_notice("Playlist name cannot be empty"),
                },
                Prompt::Import => {
                    let path = input.trim();
                    if path.is_empty() {
                        return;
                    }
                    let path = PathBuf::from(path);
                    let outcome = session.import_dir(&path, &settings.library);
                    app.set_notice(import_notice(&path, &outcome));
                }
            }
        }
        _ => {}
    }
}

fn handle_normal_key<T: TransportDevice>(
    key: KeyEvent,
    settings: &config::Settings,
    app: &mut App,
    session: &mut Session<T>,
    state: &mut EventLoopState,
) -> bool {
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }
    if key.code != KeyCode::Char('z') {
        state.pending_zz = false;
    }

    let len = session.active_sequence().len();
    let playlists = session.playlists().len();

    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => app.toggle_focus(),
        KeyCode::Char('j') | KeyCode::Down => match app.focus {
            Focus::Tracks => {
                app.follow_playback_off();
                app.select_next(len);
            }
            Focus::Playlists => app.playlist_row_next(playlists),
        },
        KeyCode::Char('k') | KeyCode::Up => match app.focus {
            Focus::Tracks => {
                app.follow_playback_off();
                app.select_prev(len);
            }
            Focus::Playlists => app.playlist_row_prev(playlists),
        },
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                match app.focus {
                    Focus::Tracks => {
                        app.follow_playback_off();
                        app.selected = 0;
                    }
                    Focus::Playlists => app.playlist_row = 0,
                }
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => match app.focus {
            Focus::Tracks => {
                app.follow_playback_off();
                app.select_last(len);
            }
            Focus::Playlists => app.playlist_row = playlists,
        },
        KeyCode::Char('z') => {
            if state.pending_zz {
                state.pending_zz = false;
                if let Some(idx) = session.current_index() {
                    app.focus = Focus::Tracks;
                    app.selected = idx;
                    app.follow_playback_on();
                }
            } else {
                state.pending_zz = true;
            }
        }
        KeyCode::Enter => match app.focus {
            Focus::Tracks => {
                app.follow_playback_on();
                let result = session.play_index(app.selected);
                report(app, result);
            }
            Focus::Playlists => {
                let target = app
                    .playlist_row
                    .checked_sub(1)
                    .and_then(|i| session.playlists().get(i))
                    .map(|p| p.id);
                let result = session.select_playlist(target);
                report(app, result);
                app.selected = 0;
                app.focus = Focus::Tracks;
            }
        },
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            app.follow_playback_on();
            let result = session.toggle_play_pause();
            report(app, result);
        }
        KeyCode::Char('l') => {
            app.follow_playback_on();
            let result = session.next();
            report(app, result);
        }
        KeyCode::Char('h') => {
            app.follow_playback_on();
            let result = session.previous();
            report(app, result);
        }
        KeyCode::Char('L') => {
            session.seek_by_percent(i32::from(settings.controls.seek_step_percent));
        }
        KeyCode::Char('H') => {
            session.seek_by_percent(-i32::from(settings.controls.seek_step_percent));
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            let v = session
                .volume_percent()
                .saturating_add(settings.controls.volume_step_percent);
            session.set_volume(v.min(100));
        }
        KeyCode::Char('-') => {
            let v = session
                .volume_percent()
                .saturating_sub(settings.controls.volume_step_percent);
            session.set_volume(v);
        }
        KeyCode::Char('s') => session.toggle_shuffle(),
        KeyCode::Char('r') => {
            session.cycle_repeat_mode();
        }
        KeyCode::Char('/') => {
            let current = session.filter().search().to_string();
            app.begin_prompt(Prompt::Search, current);
        }
        KeyCode::Char('f') => {
            let current = match session.filter().genre() {
                GenreFilter::All => String::new(),
                GenreFilter::Genre(g) => g.clone(),
            };
            app.begin_prompt(Prompt::Genre, current);
        }
        KeyCode::Esc => {
            if session.filter().is_active() {
                session.clear_filter();
                app.selected = 0;
            }
        }
        KeyCode::Char('n') => app.begin_prompt(Prompt::NewPlaylist, ""),
        KeyCode::Char('i') => app.begin_prompt(Prompt::Import, ""),
        KeyCode::Char('a') => {
            if playlists == 0 {
                app.set_notice("Create a playlist first!");
            } else if let Some(&track) = session.active_sequence().get(app.selected) {
                app.pick_playlist(track);
            }
        }
        KeyCode::Char('d') => match app.focus {
            Focus::Tracks => {
                if let Some(&track) = session.active_sequence().get(app.selected) {
                    app.ask(Confirm::RemoveTrack(track));
                }
            }
            Focus::Playlists => {
                if let Some(playlist) = app
                    .playlist_row
                    .checked_sub(1)
                    .and_then(|i| session.playlists().get(i))
                {
                    app.ask(Confirm::DeletePlaylist(playlist.id));
                }
            }
        },
        KeyCode::Char('K') => app.toggle_metadata_window(),
        _ => {}
    }

    false
}
