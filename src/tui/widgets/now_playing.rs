use super::{PAUSE_ICON, PLAY_ICON, STOP_ICON};
use crate::{
    player::PlaybackState,
    tui::{DARK_WHITE, GOLD, MID_GRAY},
    ui_state::UiState,
};
use ratatui::{
    style::Stylize,
    text::{Line, Span},
    widgets::{Block, Padding, Paragraph, StatefulWidget, Widget},
};

pub struct NowPlaying;

impl StatefulWidget for NowPlaying {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let icon = match state.playback_state() {
            PlaybackState::Playing => PLAY_ICON,
            PlaybackState::Paused => PAUSE_ICON,
            PlaybackState::Stopped | PlaybackState::Idle => STOP_ICON,
        };

        let line = match state.now_playing_name() {
            Some(name) => Line::from_iter([
                Span::from(format!("{icon}  ")).fg(GOLD),
                Span::from(name.to_string()).fg(DARK_WHITE).bold(),
            ]),
            None => Line::from("Nothing loaded").fg(MID_GRAY).italic(),
        };

        Paragraph::new(line)
            .centered()
            .block(Block::new().padding(Padding::top(1)))
            .render(area, buf);
    }
}
