use std::time::{Duration, Instant};

/// Wall-clock playback position: accumulated time plus the running segment.
#[derive(Debug, Clone, Default)]
pub(crate) struct PlayClock {
    accumulated: Duration,
    started_at: Option<Instant>,
}

impl PlayClock {
    /// A clock that starts counting from `at`, paused.
    pub(crate) fn paused_at(at: Duration) -> Self {
        Self {
            accumulated: at,
            started_at: None,
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }

    /// `elapsed`, never past `total` when the source length is known.
    pub(crate) fn position_within(&self, total: Option<Duration>) -> Duration {
        let elapsed = self.elapsed();
        total.map_or(elapsed, |t| elapsed.min(t))
    }

    pub(crate) fn resume(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub(crate) fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    /// Jump to `at`, keeping the running/paused state.
    pub(crate) fn reset_to(&mut self, at: Duration) {
        self.accumulated = at;
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }
}
