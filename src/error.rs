use std::fmt::Display;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlayerError {
    /// The track name has no playable resource behind it
    #[error("No playable resource for track \"{0}\"")]
    ResourceNotFound(String),

    /// Decoder or output failure reported by the audio engine
    #[error("Playback engine error: {0}")]
    PlaybackEngine(String),

    #[error("No track is loaded")]
    NoActiveSession,

    #[error("Track index {index} is out of range for a playlist of {len}")]
    InvalidIndex { index: usize, len: usize },

    #[error("Seek position must be between 0 and 100 percent, got {0}")]
    InvalidPercent(u8),

    #[error("A playlist needs at least one track")]
    EmptyPlaylist,
}

impl PlayerError {
    pub fn engine(err: impl Display) -> Self {
        PlayerError::PlaybackEngine(err.to_string())
    }

    /// Short title for the error popup.
    pub fn headline(&self) -> &'static str {
        match self {
            PlayerError::ResourceNotFound(_) => "Track not found",
            PlayerError::PlaybackEngine(_) => "Playback failed",
            PlayerError::NoActiveSession => "Nothing loaded",
            PlayerError::InvalidIndex { .. } | PlayerError::InvalidPercent(_) => "Out of range",
            PlayerError::EmptyPlaylist => "Empty playlist",
        }
    }

    pub fn hint(&self) -> Option<&'static str> {
        match self {
            PlayerError::ResourceNotFound(_) => {
                Some("Check the playlist names against the music folder")
            }
            PlayerError::PlaybackEngine(_) => {
                Some("The file may be damaged or the output device busy")
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, PlayerError>;
