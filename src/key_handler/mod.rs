mod action;

pub use action::handle_key_event;
pub use action::next_event;

use ratatui::crossterm::event::KeyModifiers;

const X: KeyModifiers = KeyModifiers::NONE;
const S: KeyModifiers = KeyModifiers::SHIFT;
const C: KeyModifiers = KeyModifiers::CONTROL;

const SCROLL_MID: usize = 5;

#[derive(Debug, PartialEq, Eq)]
pub enum Action {
    // Transport
    Play,
    Pause,
    Stop,
    PlayNext,
    PlayPrev,

    // Song list
    ToggleList,
    Scroll(Director),
    PlaySelected,

    // Seek bar, in percent steps
    SeekNudge(i16),
    SeekCommit,
    SeekCancel,

    DismissError,
    QUIT,
}

/// Which keymap applies, picked from the current screen state
#[derive(Debug, PartialEq, Eq)]
pub enum InputContext {
    Transport,
    SongList,
    Seeking,
    Error,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Director {
    Up(usize),
    Down(usize),
    Top,
    Bottom,
}
