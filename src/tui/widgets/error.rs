use crate::{
    tui::{DARK_GRAY, DARK_WHITE, GOOD_RED},
    ui_state::UiState,
};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Text},
    widgets::{Block, BorderType, Padding, Paragraph, StatefulWidget, Widget, Wrap},
};

/// Popup over the player while an error is waiting to be dismissed.
pub struct ErrorMsg;

impl StatefulWidget for ErrorMsg {
    type State = UiState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let Some(notice) = state.get_error() else {
            return;
        };

        let mut lines = vec![Line::from(notice.message.as_str()).fg(DARK_WHITE)];
        if let Some(hint) = notice.hint {
            lines.push(Line::default());
            lines.push(Line::from(hint).fg(GOOD_RED).italic());
        }

        let frame = Block::bordered()
            .border_type(BorderType::Thick)
            .border_style(Style::new().fg(GOOD_RED))
            .title(Line::from(format!(" {} ", notice.headline)).bold().centered())
            .title_bottom(Line::from(" any key to dismiss ").centered())
            .padding(Padding::uniform(1))
            .bg(DARK_GRAY);

        Paragraph::new(Text::from(lines))
            .wrap(Wrap { trim: true })
            .centered()
            .block(frame)
            .render(area, buf);
    }
}
