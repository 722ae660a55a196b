use std::time::Duration;

pub mod app_core;
pub mod config;
pub mod domain;
pub mod error;
pub mod key_handler;
pub mod logging;
pub mod player;
pub mod tui;
pub mod ui_state;

pub use config::Settings;
pub use domain::{Playlist, Track};
pub use error::{PlayerError, Result};
pub use player::PlaybackController;
pub use ui_state::UiState;

pub const CONFIG_DIRECTORY: &str = "songdeck";

// How long the input thread waits before re-checking for shutdown
pub const REFRESH_RATE: Duration = Duration::from_millis(33);

pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Formats a duration as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours, so a 75 minute track reads `75:00`.
pub fn clock_display(duration: Duration) -> String {
    let secs = duration.as_secs();
    let mins = secs / 60;
    let secs = secs % 60;

    format!("{mins:02}:{secs:02}")
}

/// Seek bar position in whole percent.
///
/// A zero-length track reports 0 instead of dividing by zero.
pub fn progress_percent(position: Duration, duration: Duration) -> u8 {
    let total = duration.as_millis();
    if total == 0 {
        return 0;
    }

    let pct = position.as_millis() * 100 / total;
    pct.min(100) as u8
}

/// Position reached by dragging the seek bar to `percent`.
pub fn position_at_percent(percent: u8, duration: Duration) -> Duration {
    let millis = u128::from(percent) * duration.as_millis() / 100;
    Duration::from_millis(millis as u64)
}
