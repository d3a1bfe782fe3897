//! Application model types: `App`, `Focus` and `InputMode`.

use crate::library::TrackId;
use crate::playlist::PlaylistId;

/// Which pane receives navigation keys.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Focus {
    Playlists,
    #[default]
    Tracks,
}

/// A line of text the user is typing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Prompt {
    Search,
    Genre,
    NewPlaylist,
    Import,
}

impl Prompt {
    pub fn title(self) -> &'static str {
        match self {
            Self::Search => " search ",
            Self::Genre => " genre (blank or \"all\" clears) ",
            Self::NewPlaylist => " new playlist name ",
            Self::Import => " import directory or file ",
        }
    }
}

/// A destructive action waiting for `y`/`n`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Confirm {
    RemoveTrack(TrackId),
    DeletePlaylist(PlaylistId),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum InputMode {
    #[default]
    Normal,
    Editing { prompt: Prompt, input: String },
    /// Choosing the playlist `track` goes into; `choice` indexes the store.
    PickPlaylist { track: TrackId, choice: usize },
    Confirm(Confirm),
}

/// The main application model.
#[derive(Debug)]
pub struct App {
    pub focus: Focus,
    /// Row in the visible track list.
    pub selected: usize,
    /// Row in the playlist pane; 0 is the library entry, `i + 1` playlist `i`.
    pub playlist_row: usize,
    pub mode: InputMode,
    /// One-line message shown in the status box until the next key press.
    pub notice: Option<String>,
    pub follow_playback: bool,
    pub metadata_window: bool,
}

impl App {
    pub fn new(follow_playback: bool) -> Self {
        Self {
            focus: Focus::Tracks,
            selected: 0,
            playlist_row: 0,
            mode: InputMode::Normal,
            notice: None,
            follow_playback,
            metadata_window: false,
        }
    }

    pub fn toggle_metadata_window(&mut self) {
        self.metadata_window = !self.metadata_window;
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Playlists => Focus::Tracks,
            Focus::Tracks => Focus::Playlists,
        };
    }

    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }

    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    pub fn set_notice(&mut self, msg: impl Into<String>) {
        self.notice = Some(msg.into());
    }

    pub fn clear_notice(&mut self) {
        self.notice = None;
    }

    /// Move the track selection down, wrapping to the top.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected.min(len - 1) + 1) % len;
    }

    /// Move the track selection up, wrapping to the bottom.
    pub fn select_prev(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected.min(len - 1) + len - 1) % len;
    }

    pub fn select_last(&mut self, len: usize) {
        self.selected = len.saturating_sub(1);
    }

    /// Keep the selection inside a list that may have shrunk.
    pub fn clamp_selection(&mut self, len: usize) {
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    /// `playlists` counts the store; the pane has one extra row for the library.
    pub fn playlist_row_next(&mut self, playlists: usize) {
        self.playlist_row = (self.playlist_row.min(playlists) + 1) % (playlists + 1);
    }

    pub fn playlist_row_prev(&mut self, playlists: usize) {
        let rows = playlists + 1;
        self.playlist_row = (self.playlist_row.min(playlists) + rows - 1) % rows;
    }

    pub fn begin_prompt(&mut self, prompt: Prompt, initial: impl Into<String>) {
        self.mode = InputMode::Editing {
            prompt,
            input: initial.into(),
        };
    }

    pub fn push_input_char(&mut self, c: char) {
        if let InputMode::Editing { input, .. } = &mut self.mode {
            input.push(c);
        }
    }

    pub fn pop_input_char(&mut self) {
        if let InputMode::Editing { input, .. } = &mut self.mode {
            input.pop();
        }
    }

    /// Close the prompt and hand back what was typed.
    pub fn take_input(&mut self) -> Option<(Prompt, String)> {
        match std::mem::take(&mut self.mode) {
            InputMode::Editing { prompt, input } => Some((prompt, input)),
            other => {
                self.mode = other;
                None
            }
        }
    }

    /// Open the playlist picker for `track`, defaulting to the first playlist.
    pub fn pick_playlist(&mut self, track: TrackId) {
        self.mode = InputMode::PickPlaylist { track, choice: 0 };
    }

    pub fn picker_next(&mut self, playlists: usize) {
        if let InputMode::PickPlaylist { choice, .. } = &mut self.mode {
            if playlists > 0 {
                *choice = (*choice + 1) % playlists;
            }
        }
    }

    pub fn picker_prev(&mut self, playlists: usize) {
        if let InputMode::PickPlaylist { choice, .. } = &mut self.mode {
            if playlists > 0 {
                *choice = (*choice + playlists - 1) % playlists;
            }
        }
    }

    pub fn ask(&mut self, confirm: Confirm) {
        self.mode = InputMode::Confirm(confirm);
    }

    /// Drop back to normal mode, discarding any prompt or pending question.
    pub fn cancel(&mut self) {
        self.mode = InputMode::Normal;
    }

    pub fn is_normal(&self) -> bool {
        self.mode == InputMode::Normal
    }
}
