//! Manifest held in a UTF-8 string

use std::io::{self, Cursor};

use super::{ManifestSource, ManifestStream};

/// A single in-memory manifest document
#[derive(Debug, Clone)]
pub struct StringSource {
    source: String,
}

impl StringSource {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
        }
    }
}

impl ManifestSource for StringSource {
    fn fetch(&self) -> io::Result<Vec<ManifestStream>> {
        Ok(vec![Box::new(Cursor::new(self.source.clone().into_bytes()))])
    }
}
