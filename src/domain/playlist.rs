use super::Track;
use crate::{PlayerError, Result};

/// Fixed, non-empty list of tracks. Navigation wraps at both ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub fn new<I, T>(tracks: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Track>,
    {
        let tracks: Vec<Track> = tracks.into_iter().map(Into::into).collect();

        match tracks.is_empty() {
            true => Err(PlayerError::EmptyPlaylist),
            false => Ok(Playlist { tracks }),
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Always false, construction rejects empty lists
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn names(&self) -> Vec<String> {
        self.tracks.iter().map(|t| t.name().to_string()).collect()
    }

    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.len()
    }

    pub fn previous_index(&self, index: usize) -> usize {
        (index + self.len() - 1) % self.len()
    }
}
