use crate::{tui::MID_GRAY, ui_state::UiState};
use ratatui::{
    style::Stylize,
    text::Line,
    widgets::{StatefulWidget, Widget},
};

/// Bottom line of key hints for whatever the keys currently do.
pub struct BufferLine;

impl StatefulWidget for BufferLine {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let hints = match state.seek.pending() {
            Some(pct) => format!(" seeking to {pct}% | [←/→] move | [⏎] jump | [esc] cancel "),
            None => String::from(
                " [p]lay | [space] pause | [s]top | [b]ack | [n]ext | [l]ist | [←/→] seek | [q]uit ",
            ),
        };

        Line::from(hints).centered().fg(MID_GRAY).render(area, buf);
    }
}
