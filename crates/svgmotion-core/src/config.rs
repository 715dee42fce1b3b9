//! Core configuration for svgmotion-core.

use serde::{Deserialize, Serialize};

use crate::timeline::{DEFAULT_DURATION_MS, FRAME_STEP_MS};

/// Session defaults the surrounding application may override. Kept small;
/// extend without breaking the shape.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Timeline duration for freshly loaded documents (ms).
    pub default_duration_ms: f64,
    /// Advance applied by each playback tick (ms).
    pub frame_step_ms: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_duration_ms: DEFAULT_DURATION_MS,
            frame_step_ms: FRAME_STEP_MS,
        }
    }
}
