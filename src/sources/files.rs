//! Manifests in files
//!
//! ```no_run
//! use manifests::{FilesSource, Manifests};
//!
//! let registry = Manifests::new();
//! registry.append(&FilesSource::new("MANIFEST.MF"))?;
//! # Ok::<(), manifests::ManifestError>(())
//! ```

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use super::{ManifestSource, ManifestStream};

/// One or more manifest files, opened in the given order
#[derive(Debug, Clone)]
pub struct FilesSource {
    files: Vec<PathBuf>,
}

impl FilesSource {
    pub fn new(file: impl AsRef<Path>) -> Self {
        Self::from_paths([file])
    }

    pub fn from_paths<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            files: files.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.files
    }
}

impl ManifestSource for FilesSource {
    fn fetch(&self) -> io::Result<Vec<ManifestStream>> {
        let mut streams: Vec<ManifestStream> = Vec::with_capacity(self.files.len());
        for path in &self.files {
            let file = File::open(path).map_err(|e| {
                io::Error::new(e.kind(), format!("failed to open {}: {}", path.display(), e))
            })?;
            streams.push(Box::new(BufReader::new(file)));
        }
        Ok(streams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_opens_every_file() {
        let dir = tempdir().unwrap();
        let a = dir.path().join("a.MF");
        let b = dir.path().join("b.MF");
        std::fs::write(&a, "A: 1\n").unwrap();
        std::fs::write(&b, "B: 2\n").unwrap();

        let source = FilesSource::from_paths([&a, &b]);
        assert_eq!(source.paths().len(), 2);
        assert_eq!(source.fetch().unwrap().len(), 2);
    }

    #[test]
    fn test_missing_file_fails_fetch() {
        let dir = tempdir().unwrap();
        let source = FilesSource::new(dir.path().join("absent.MF"));
        let err = source.fetch().err().expect("expected error");
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(err.to_string().contains("absent.MF"));
    }
}
