mod backend_rodio;
mod controller;
#[cfg(test)]
pub(crate) mod fakes;
mod resolver;
mod timer;

pub use backend_rodio::{RodioEngine, RodioSession};
pub use controller::PlaybackController;
pub use resolver::DirectoryResolver;
pub use timer::TickerTimer;

use crate::Result;
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// No track has been loaded yet, or the player was torn down
    #[default]
    Idle,
    Playing,
    Paused,
    Stopped,
}

/// Locator for a playable resource, as handed out by a [`ResourceResolver`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceHandle {
    path: PathBuf,
}

impl ResourceHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ResourceHandle { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Identifies one scheduled refresh task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        TimerHandle(id)
    }

    pub fn id(&self) -> u64 {
        self.0
    }
}

pub trait AudioEngine {
    /// Opens a session for `resource`, prepared but not started.
    fn create(&mut self, resource: &ResourceHandle) -> Result<Box<dyn Session>>;
}

/// A live decode/output pipeline bound to one track.
pub trait Session {
    fn start(&mut self) -> Result<()>;
    fn pause(&mut self) -> Result<()>;
    fn stop(&mut self) -> Result<()>;
    /// Re-primes a stopped session so it can play again from the top
    fn prepare_for_replay(&mut self) -> Result<()>;
    fn seek_to(&mut self, position: Duration) -> Result<()>;
    fn current_position(&self) -> Duration;
    fn duration(&self) -> Duration;
    /// Frees the output resources. Safe to call more than once.
    fn release(&mut self);
}

pub trait ResourceResolver {
    fn resolve(&self, track_name: &str) -> Result<ResourceHandle>;
}

/// Schedules recurring ticks. Fired handles are delivered back to the owner's
/// event loop, never run on the timer's own thread.
pub trait TimerService {
    fn schedule(&mut self, period: Duration) -> TimerHandle;
    /// Cancelling an unknown or already cancelled handle is a no-op
    fn cancel(&mut self, handle: TimerHandle);
}

/// Display calls made by the controller.
pub trait UiSurface {
    fn set_seek_progress(&mut self, percent: u8);
    fn set_duration_text(&mut self, text: &str);
    fn set_list_visible(&mut self, visible: bool);
    fn render_playlist(&mut self, names: &[String]);
    fn set_now_playing(&mut self, index: Option<usize>);
    fn set_playback_state(&mut self, state: PlaybackState);
}
