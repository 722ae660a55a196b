mod layout;
mod renderer;
mod widgets;

use ratatui::style::Color;

pub use layout::AppLayout;
pub use renderer::render;
pub use widgets::{BufferLine, ErrorMsg, NowPlaying, Progress, SongList};

const DARK_WHITE: Color = Color::Rgb(210, 210, 210);
const MID_GRAY: Color = Color::Rgb(100, 100, 100);
const DARK_GRAY: Color = Color::Rgb(25, 25, 25);
const GOOD_RED: Color = Color::Rgb(255, 70, 70);
const GOLD: Color = Color::Rgb(220, 220, 100);
const GOLD_FADED: Color = Color::Rgb(130, 130, 60);
