//! Manifests reachable from a search path
//!
//! Each root is either a manifest file, read as is, or a directory whose
//! `META-INF/MANIFEST.MF` is read. In recursive mode every
//! `META-INF/MANIFEST.MF` below a directory root is collected.
//!
//! The ambient search path is built from the `MANIFESTS_PATH` environment
//! variable, the directory of the running executable, the current directory
//! and any roots listed in the configuration.

use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{ManifestSource, ManifestStream, MANIFEST_RESOURCE};
use crate::config::ScanConfig;

/// Environment variable holding extra search roots
pub const SEARCH_PATH_ENV: &str = "MANIFESTS_PATH";

/// Scans a list of roots for manifest documents
#[derive(Debug, Clone)]
pub struct SearchPathSource {
    roots: Vec<PathBuf>,
    resource: PathBuf,
    recursive: bool,
    max_depth: usize,
}

impl SearchPathSource {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            resource: PathBuf::from(MANIFEST_RESOURCE),
            recursive: false,
            max_depth: 8,
        }
    }

    /// The process search path, configured by `scan`
    pub fn ambient(scan: &ScanConfig) -> Self {
        let mut roots = Vec::new();
        if let Some(paths) = std::env::var_os(SEARCH_PATH_ENV) {
            roots.extend(std::env::split_paths(&paths).filter(|p| !p.as_os_str().is_empty()));
        }
        if scan.include_exe_dir {
            if let Some(dir) = std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
            {
                roots.push(dir);
            }
        }
        if scan.include_current_dir {
            if let Ok(dir) = std::env::current_dir() {
                roots.push(dir);
            }
        }
        roots.extend(scan.roots.iter().cloned());

        Self::new(roots)
            .with_resource(&scan.resource)
            .recursive(scan.recursive)
            .max_depth(scan.max_depth)
    }

    /// Relative path of the manifest inside a directory root
    pub fn with_resource(mut self, resource: impl Into<PathBuf>) -> Self {
        self.resource = resource.into();
        self
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Manifest files found under the roots, in root order, without duplicates
    pub fn locate(&self) -> Vec<PathBuf> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        for root in &self.roots {
            for candidate in self.candidates(root) {
                let key = candidate.canonicalize().unwrap_or_else(|_| candidate.clone());
                if seen.insert(key) {
                    found.push(candidate);
                }
            }
        }
        found
    }

    fn candidates(&self, root: &Path) -> Vec<PathBuf> {
        if root.is_file() {
            return vec![root.to_path_buf()];
        }
        if !root.is_dir() {
            debug!(root = %root.display(), "search root does not exist");
            return Vec::new();
        }
        if !self.recursive {
            let path = root.join(&self.resource);
            return if path.is_file() { vec![path] } else { Vec::new() };
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(root)
            .max_depth(self.max_depth)
            .sort_by_file_name()
        {
            match entry {
                Ok(entry) => {
                    if entry.file_type().is_file() && entry.path().ends_with(&self.resource) {
                        found.push(entry.into_path());
                    }
                }
                Err(e) => warn!(root = %root.display(), error = %e, "skipping unreadable entry"),
            }
        }
        found
    }
}

impl ManifestSource for SearchPathSource {
    fn fetch(&self) -> io::Result<Vec<ManifestStream>> {
        let mut streams: Vec<ManifestStream> = Vec::new();
        for path in self.locate() {
            debug!(path = %path.display(), "opening manifest");
            let file = File::open(&path).map_err(|e| {
                io::Error::new(e.kind(), format!("failed to open {}: {}", path.display(), e))
            })?;
            streams.push(Box::new(BufReader::new(file)));
        }
        Ok(streams)
    }
}
