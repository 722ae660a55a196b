use crate::{
    tui::{DARK_GRAY, GOLD, GOOD_RED, MID_GRAY},
    ui_state::UiState,
};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Text,
    widgets::{Block, LineGauge, Padding, StatefulWidget, Widget},
};

const DUR_WIDTH: u16 = 7;

/// Seek bar with the remaining time on its right.
pub struct Progress;

impl StatefulWidget for Progress {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let [bar, timer] = Layout::horizontal([Constraint::Fill(1), Constraint::Length(DUR_WIDTH)])
            .areas(area);

        // A held seek bar is drawn in the accent color
        let filled = match state.seek.is_active() {
            true => Style::new().fg(GOLD),
            false => Style::new().fg(GOOD_RED),
        };

        let ratio = f64::from(state.displayed_progress()) / 100.0;

        LineGauge::default()
            .block(Block::new().bg(DARK_GRAY).padding(Padding {
                left: 2,
                right: 1,
                top: area.height / 2,
                bottom: 0,
            }))
            .filled_style(filled)
            .unfilled_style(Style::new().fg(MID_GRAY))
            .label("")
            .ratio(ratio)
            .render(bar, buf);

        let timer = Rect {
            y: timer.y + area.height / 2,
            height: 1,
            ..timer
        };

        Text::from(state.duration_text())
            .fg(MID_GRAY)
            .left_aligned()
            .render(timer, buf);
    }
}
