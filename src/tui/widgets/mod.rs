mod buffer_line;
mod error;
mod now_playing;
mod progress;
mod song_list;

pub use buffer_line::BufferLine;
pub use error::ErrorMsg;
pub use now_playing::NowPlaying;
pub use progress::Progress;
pub use song_list::SongList;

const PAUSE_ICON: &str = "⏸";
const PLAY_ICON: &str = "▶";
const STOP_ICON: &str = "■";
