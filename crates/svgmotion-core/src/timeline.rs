//! The shared playback clock.
//!
//! One timeline serves every layer: a duration, the current position, and a
//! playing flag. The host scheduler calls [`Timeline::tick`] once per display
//! frame while playing; the position wraps to the start at the end of the
//! clip, so playback loops until paused.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Frame advance applied by each playback tick, roughly 60 fps.
pub const FRAME_STEP_MS: f64 = 16.67;

/// Duration used when the surrounding application does not override it.
pub const DEFAULT_DURATION_MS: f64 = 5000.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    /// Clip length in milliseconds, always positive.
    pub duration: f64,
    /// Playback position in milliseconds; the wrap in [`Timeline::tick_by`]
    /// keeps the live value inside `[0, duration)`.
    pub current_time: f64,
    pub playing: bool,
}

impl Default for Timeline {
    fn default() -> Self {
        Timeline {
            duration: DEFAULT_DURATION_MS,
            current_time: 0.0,
            playing: false,
        }
    }
}

impl Timeline {
    pub fn new(duration: f64) -> Self {
        Timeline {
            duration,
            ..Timeline::default()
        }
    }

    /// Advance one default-length frame. No-op while paused.
    pub fn tick(&mut self) {
        self.tick_by(FRAME_STEP_MS);
    }

    /// Advance by `step` milliseconds, wrapping (not clamping) to the start
    /// when the position would reach or pass the end.
    pub fn tick_by(&mut self, step: f64) {
        if !self.playing {
            return;
        }
        let next = self.current_time + step;
        self.current_time = if next >= self.duration { 0.0 } else { next };
    }

    /// Jump to a position, clamped into the clip.
    pub fn seek(&mut self, time: f64) {
        self.current_time = time.max(0.0).min(self.duration);
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    pub fn pause(&mut self) {
        self.playing = false;
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
    }

    /// Change the clip length. Rejects non-positive durations; the current
    /// position is re-clamped into the new clip.
    pub fn set_duration(&mut self, duration: f64) -> Result<(), ValidationError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(ValidationError::NonPositiveDuration(duration));
        }
        self.duration = duration;
        if self.current_time > duration {
            self.current_time = duration;
        }
        Ok(())
    }
}
