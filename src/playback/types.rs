/// What happens when a track plays to its end.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RepeatMode {
    #[default]
    Off,
    RepeatAll,
    RepeatOne,
}

impl RepeatMode {
    /// `Off -> RepeatAll -> RepeatOne -> Off`.
    pub fn cycle(self) -> Self {
        match self {
            Self::Off => Self::RepeatAll,
            Self::RepeatAll => Self::RepeatOne,
            Self::RepeatOne => Self::Off,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::RepeatAll => "all",
            Self::RepeatOne => "one",
        }
    }
}

/// The playback state of the output element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// No source loaded.
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// What to do with the loaded track when it drops out of the active sequence.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum SequenceChangePolicy {
    /// Unload it and clear the cursor.
    #[default]
    Stop,
    /// Keep playing it untracked.
    Continue,
}
