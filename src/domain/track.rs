use std::fmt;

/// A playlist entry, known only by the name its resource is looked up with.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Track {
    name: String,
}

impl Track {
    pub fn new(name: impl Into<String>) -> Self {
        Track { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Track {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Track {
    fn from(name: &str) -> Self {
        Track::new(name)
    }
}

impl From<String> for Track {
    fn from(name: String) -> Self {
        Track::new(name)
    }
}
