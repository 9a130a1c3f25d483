//! Manifests in caller-supplied readers

use std::io::{self, Read};

use parking_lot::Mutex;

use super::{ManifestSource, ManifestStream};

/// Readers handed over by the caller.
///
/// A reader can only be consumed once, so the first `fetch` takes them all and
/// later calls return nothing.
pub struct StreamsSource {
    streams: Mutex<Vec<ManifestStream>>,
}

impl StreamsSource {
    /// Wrap a single reader
    pub fn new(stream: impl Read + Send + 'static) -> Self {
        Self::from_streams(vec![Box::new(stream) as ManifestStream])
    }

    /// Wrap a list of readers
    pub fn from_streams(streams: Vec<ManifestStream>) -> Self {
        Self {
            streams: Mutex::new(streams),
        }
    }

    /// Readers not yet handed out
    pub fn pending(&self) -> usize {
        self.streams.lock().len()
    }
}

impl ManifestSource for StreamsSource {
    fn fetch(&self) -> io::Result<Vec<ManifestStream>> {
        Ok(std::mem::take(&mut *self.streams.lock()))
    }
}
