use crate::ui_state::UiState;
use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub now_playing: Rect,
    pub song_list: Rect,
    pub progress_bar: Rect,
    pub buffer_line: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, state: &UiState) -> Self {
        // A hidden list hands its rows to the spacer
        let (list, spacer) = match state.is_list_visible() {
            true => (Constraint::Fill(1), Constraint::Length(0)),
            false => (Constraint::Length(0), Constraint::Fill(1)),
        };

        let [now_playing, song_list, _, progress_bar, buffer_line] = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                list,
                spacer,
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .areas(area);

        AppLayout {
            now_playing,
            song_list,
            progress_bar,
            buffer_line,
        }
    }
}
