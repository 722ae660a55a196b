use crate::{
    REFRESH_RATE,
    key_handler::*,
    ui_state::UiState,
};
use anyhow::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent};

use KeyCode::*;

pub fn handle_key_event(key_event: KeyEvent, state: &UiState) -> Option<Action> {
    let step = i16::from(state.seek_step());

    match state.get_input_context() {
        InputContext::Error => Some(Action::DismissError),
        InputContext::Seeking => handle_seeking(&key_event, step),
        InputContext::SongList => {
            handle_song_list(&key_event).or_else(|| global_commands(&key_event, step))
        }
        InputContext::Transport => global_commands(&key_event, step),
    }
}

fn global_commands(key: &KeyEvent, step: i16) -> Option<Action> {
    match (key.modifiers, key.code) {
        (C, Char('c')) | (X, Char('q')) => Some(Action::QUIT),

        (X, Char('p')) => Some(Action::Play),
        (X, Char(' ')) => Some(Action::Pause),
        (X, Char('s')) => Some(Action::Stop),
        (X, Char('n')) => Some(Action::PlayNext),
        (X, Char('b')) => Some(Action::PlayPrev),
        (X, Char('l')) | (X, Tab) => Some(Action::ToggleList),

        (X, Right) => Some(Action::SeekNudge(step)),
        (X, Left) => Some(Action::SeekNudge(-step)),
        (S, Right) => Some(Action::SeekNudge(step * 4)),
        (S, Left) => Some(Action::SeekNudge(-step * 4)),

        _ => None,
    }
}

fn handle_song_list(key: &KeyEvent) -> Option<Action> {
    match (key.modifiers, key.code) {
        (X, Char('j')) | (X, Down) => Some(Action::Scroll(Director::Down(1))),
        (X, Char('k')) | (X, Up) => Some(Action::Scroll(Director::Up(1))),
        (X, Char('d')) => Some(Action::Scroll(Director::Down(SCROLL_MID))),
        (X, Char('u')) => Some(Action::Scroll(Director::Up(SCROLL_MID))),
        (X, Char('g')) => Some(Action::Scroll(Director::Top)),
        (S, Char('G')) => Some(Action::Scroll(Director::Bottom)),
        (X, Enter) => Some(Action::PlaySelected),
        (X, Esc) => Some(Action::ToggleList),
        _ => None,
    }
}

fn handle_seeking(key: &KeyEvent, step: i16) -> Option<Action> {
    match (key.modifiers, key.code) {
        (C, Char('c')) => Some(Action::QUIT),
        (X, Right) => Some(Action::SeekNudge(step)),
        (X, Left) => Some(Action::SeekNudge(-step)),
        (S, Right) => Some(Action::SeekNudge(step * 4)),
        (S, Left) => Some(Action::SeekNudge(-step * 4)),
        (X, Enter) => Some(Action::SeekCommit),
        (X, Esc) => Some(Action::SeekCancel),
        _ => None,
    }
}

pub fn next_event() -> Result<Option<Event>> {
    match event::poll(REFRESH_RATE)? {
        true => Ok(Some(event::read()?)),
        false => Ok(None),
    }
}
