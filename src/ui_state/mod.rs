mod seek_gesture;
mod ui_state;

pub use seek_gesture::SeekGesture;
pub use ui_state::{ErrorNotice, UiState};
