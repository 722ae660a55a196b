use crate::{
    tui::{DARK_WHITE, GOLD, GOLD_FADED, MID_GRAY},
    ui_state::UiState,
};
use ratatui::{
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, Padding, StatefulWidget},
};

pub struct SongList;

impl StatefulWidget for SongList {
    type State = UiState;

    fn render(
        self,
        area: ratatui::prelude::Rect,
        buf: &mut ratatui::prelude::Buffer,
        state: &mut Self::State,
    ) {
        let now_playing = state.now_playing();

        let list_items = state.song_names().iter().enumerate().map(|(idx, name)| {
            let marker = match Some(idx) == now_playing {
                true => Span::from("♪ ").fg(GOLD),
                false => Span::from("  "),
            };
            ListItem::new(Line::from_iter([
                marker,
                Span::from(name.clone()).fg(DARK_WHITE),
            ]))
        });

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::new().fg(GOLD_FADED))
            .title_top(
                Line::from(format!(" ⟪ {} Songs ⟫ ", state.song_names().len()))
                    .left_aligned()
                    .fg(GOLD),
            )
            .title_bottom(
                Line::from(" [⏎] play | [esc] hide ")
                    .centered()
                    .fg(MID_GRAY),
            )
            .padding(Padding {
                left: 2,
                right: 2,
                top: 1,
                bottom: 1,
            });

        let list = List::new(list_items)
            .block(block)
            .highlight_style(Style::new().fg(Color::Black).bg(GOLD).italic())
            .scroll_padding(2);

        list.render(area, buf, &mut state.list_pos);
    }
}
