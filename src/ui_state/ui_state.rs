use super::SeekGesture;
use crate::{
    PlayerError,
    key_handler::{Director, InputContext},
    player::{PlaybackState, UiSurface},
};
use ratatui::widgets::ListState;
use std::fmt::Display;

/// Everything the screen shows. The controller writes into it through
/// [`UiSurface`]; the key handler and renderer read it.
pub struct UiState {
    song_names: Vec<String>,
    pub(crate) list_pos: ListState,
    list_visible: bool,
    now_playing: Option<usize>,
    playback_state: PlaybackState,

    seek_progress: u8,
    duration_text: String,
    pub(crate) seek: SeekGesture,
    seek_step: u8,

    error: Option<ErrorNotice>,
    quit: bool,
}

/// The message behind the error popup.
pub struct ErrorNotice {
    pub headline: &'static str,
    pub message: String,
    pub hint: Option<&'static str>,
}

impl UiState {
    pub fn new(seek_step: u8) -> Self {
        UiState {
            song_names: Vec::new(),
            list_pos: ListState::default(),
            list_visible: false,
            now_playing: None,
            playback_state: PlaybackState::Idle,

            seek_progress: 0,
            duration_text: String::from("00:00"),
            seek: SeekGesture::default(),
            seek_step: seek_step.clamp(1, 100),

            error: None,
            quit: false,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        UiState::new(5)
    }
}

// ===============
//    ACCESSORS
// ===============
impl UiState {
    pub fn song_names(&self) -> &[String] {
        &self.song_names
    }

    pub fn is_list_visible(&self) -> bool {
        self.list_visible
    }

    pub fn now_playing(&self) -> Option<usize> {
        self.now_playing
    }

    pub fn now_playing_name(&self) -> Option<&str> {
        self.now_playing
            .and_then(|idx| self.song_names.get(idx))
            .map(String::as_str)
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback_state
    }

    /// Progress shown on the seek bar. While dragging, this is where the
    /// bar is held rather than where playback is.
    pub fn displayed_progress(&self) -> u8 {
        self.seek.pending().unwrap_or(self.seek_progress)
    }

    pub fn seek_progress(&self) -> u8 {
        self.seek_progress
    }

    pub fn duration_text(&self) -> &str {
        &self.duration_text
    }

    pub fn seek_step(&self) -> u8 {
        self.seek_step
    }

    pub fn selected_song(&self) -> Option<usize> {
        self.list_pos
            .selected()
            .filter(|&idx| idx < self.song_names.len())
    }

    pub fn get_input_context(&self) -> InputContext {
        match (self.error.is_some(), self.seek.is_active(), self.list_visible) {
            (true, _, _) => InputContext::Error,
            (_, true, _) => InputContext::Seeking,
            (_, _, true) => InputContext::SongList,
            _ => InputContext::Transport,
        }
    }
}

// ===============
//    MUTATORS
// ===============
impl UiState {
    pub fn scroll(&mut self, director: Director) {
        let len = self.song_names.len();
        if len == 0 {
            return;
        }

        let current = self.list_pos.selected().unwrap_or(0);
        let next = match director {
            Director::Up(n) => current.saturating_sub(n),
            Director::Down(n) => (current + n).min(len - 1),
            Director::Top => 0,
            Director::Bottom => len - 1,
        };

        self.list_pos.select(Some(next));
    }

    pub fn set_error(&mut self, err: impl Display) {
        self.error = Some(ErrorNotice {
            headline: "Error",
            message: err.to_string(),
            hint: None,
        });
    }

    /// Like [`Self::set_error`], titled after the kind of player failure.
    pub fn report(&mut self, err: &PlayerError) {
        self.error = Some(ErrorNotice {
            headline: err.headline(),
            message: err.to_string(),
            hint: err.hint(),
        });
    }

    pub fn get_error(&self) -> Option<&ErrorNotice> {
        self.error.as_ref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }
}

impl UiSurface for UiState {
    fn set_seek_progress(&mut self, percent: u8) {
        self.seek_progress = percent.min(100);
    }

    fn set_duration_text(&mut self, text: &str) {
        self.duration_text.clear();
        self.duration_text.push_str(text);
    }

    fn set_list_visible(&mut self, visible: bool) {
        self.list_visible = visible;
    }

    fn render_playlist(&mut self, names: &[String]) {
        self.song_names = names.to_vec();
        let selected = match self.song_names.is_empty() {
            true => None,
            false => Some(0),
        };
        self.list_pos.select(selected);
    }

    fn set_now_playing(&mut self, index: Option<usize>) {
        self.now_playing = index;
        if index.is_some() {
            self.list_pos.select(index);
        }
    }

    fn set_playback_state(&mut self, state: PlaybackState) {
        self.playback_state = state;
    }
}
