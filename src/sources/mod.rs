//! Manifest sources
//!
//! A source only knows how to produce raw manifest documents as byte streams.
//! Parsing and merging is the registry's job.

use std::io::{self, Read};
use std::sync::Arc;

pub mod context;
pub mod files;
pub mod search_path;
pub mod streams;
pub mod string;

pub use context::{ContextSource, DirectoryContext, ResourceContext};
pub use files::FilesSource;
pub use search_path::SearchPathSource;
pub use streams::StreamsSource;
pub use string::StringSource;

/// Resource path of the manifest inside an archive or deployment root
pub const MANIFEST_RESOURCE: &str = "META-INF/MANIFEST.MF";

/// One raw manifest document. Dropping it releases the underlying handle.
pub type ManifestStream = Box<dyn Read + Send>;

/// Anything able to produce zero or more manifest documents
pub trait ManifestSource {
    /// Open every document this source knows about, in order.
    ///
    /// An error here aborts the whole append before anything is merged.
    fn fetch(&self) -> io::Result<Vec<ManifestStream>>;
}

impl<S: ManifestSource + ?Sized> ManifestSource for &S {
    fn fetch(&self) -> io::Result<Vec<ManifestStream>> {
        (**self).fetch()
    }
}

impl<S: ManifestSource + ?Sized> ManifestSource for Box<S> {
    fn fetch(&self) -> io::Result<Vec<ManifestStream>> {
        (**self).fetch()
    }
}

impl<S: ManifestSource + ?Sized> ManifestSource for Arc<S> {
    fn fetch(&self) -> io::Result<Vec<ManifestStream>> {
        (**self).fetch()
    }
}

/// Chains sources into one batch, in order
impl ManifestSource for Vec<Box<dyn ManifestSource + Send + Sync>> {
    fn fetch(&self) -> io::Result<Vec<ManifestStream>> {
        let mut streams = Vec::new();
        for source in self {
            streams.extend(source.fetch()?);
        }
        Ok(streams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn read_all(stream: &mut ManifestStream) -> String {
        let mut out = String::new();
        stream.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_chained_sources_keep_order() {
        let chain: Vec<Box<dyn ManifestSource + Send + Sync>> = vec![
            Box::new(StringSource::new("A: 1\n")),
            Box::new(StringSource::new("B: 2\n")),
        ];
        let mut streams = chain.fetch().unwrap();
        assert_eq!(streams.len(), 2);
        assert_eq!(read_all(&mut streams[0]), "A: 1\n");
        assert_eq!(read_all(&mut streams[1]), "B: 2\n");
    }

    #[test]
    fn test_arc_source_delegates() {
        let source = Arc::new(StringSource::new("A: 1\n"));
        assert_eq!(source.fetch().unwrap().len(), 1);
        assert_eq!((&*source).fetch().unwrap().len(), 1);
    }
}
