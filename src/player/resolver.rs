use super::{ResourceHandle, ResourceResolver};
use crate::{PlayerError, Result};
use std::{
    collections::{HashMap, HashSet},
    path::{Path, PathBuf},
    sync::LazyLock,
};
use tracing::{debug, warn};
use walkdir::WalkDir;

static LEGAL_EXTENSION: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| HashSet::from(["mp3", "m4a", "flac", "ogg", "wav"]));

/// Resolves track names against the audio files under a music directory.
///
/// A track named `Song1` matches `song1.mp3`, `Song1.flac` or any other
/// legal file whose stem is equal ignoring case. When two files share a
/// stem, the first in file-name order wins.
pub struct DirectoryResolver {
    root: PathBuf,
    index: HashMap<String, PathBuf>,
}

impl DirectoryResolver {
    /// Walks `root` once and indexes every playable file.
    ///
    /// A missing directory produces an empty index; every lookup then fails
    /// with `ResourceNotFound`.
    pub fn index(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        let mut index = HashMap::new();

        if !root.is_dir() {
            warn!(root = %root.display(), "music directory not found");
        }

        for path in collect_valid_files(&root) {
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            index.entry(stem.to_lowercase()).or_insert(path);
        }

        debug!(root = %root.display(), files = index.len(), "music directory indexed");

        DirectoryResolver { root, index }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

impl ResourceResolver for DirectoryResolver {
    fn resolve(&self, track_name: &str) -> Result<ResourceHandle> {
        self.index
            .get(&track_name.to_lowercase())
            .map(|path| ResourceHandle::new(path.clone()))
            .ok_or_else(|| {
                debug!(track = track_name, root = %self.root.display(), "no matching file");
                PlayerError::ResourceNotFound(track_name.to_string())
            })
    }
}

/// Folders with a `.nomedia` file are skipped
fn collect_valid_files(dir: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !e.path().join(".nomedia").exists())
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| LEGAL_EXTENSION.contains(ext.to_lowercase().as_str()))
                .unwrap_or(false)
        })
        .map(|entry| entry.into_path())
}
