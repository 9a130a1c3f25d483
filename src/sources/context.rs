//! Manifest of a hosted application
//!
//! The host (an application server, a plugin loader, a deployment directory)
//! is reached through [`ResourceContext`]; the source asks it for
//! `/META-INF/MANIFEST.MF` and nothing else.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Component, Path, PathBuf};

use tracing::warn;

use super::{ManifestSource, ManifestStream, MANIFEST_RESOURCE};

/// Resource lookup offered by a hosting environment
pub trait ResourceContext {
    /// Open the resource at `path` (rooted, `/`-separated), or `None` when the
    /// host has no such resource
    fn resource(&self, path: &str) -> io::Result<Option<ManifestStream>>;
}

/// The application manifest of one host context
pub struct ContextSource<C> {
    context: C,
}

impl<C: ResourceContext> ContextSource<C> {
    pub fn new(context: C) -> Self {
        Self { context }
    }
}

impl<C: ResourceContext> ManifestSource for ContextSource<C> {
    fn fetch(&self) -> io::Result<Vec<ManifestStream>> {
        let path = format!("/{}", MANIFEST_RESOURCE);
        match self.context.resource(&path)? {
            Some(stream) => Ok(vec![stream]),
            None => {
                warn!(resource = %path, "MANIFEST.MF not found in host context");
                Ok(Vec::new())
            }
        }
    }
}

/// Host context backed by an exploded deployment directory
#[derive(Debug, Clone)]
pub struct DirectoryContext {
    root: PathBuf,
}

impl DirectoryContext {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a rooted resource path onto the directory, refusing `..` escapes
    fn locate(&self, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));
        let mut resolved = self.root.clone();
        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(resolved)
    }
}

impl ResourceContext for DirectoryContext {
    fn resource(&self, path: &str) -> io::Result<Option<ManifestStream>> {
        let Some(file_path) = self.locate(path) else {
            return Ok(None);
        };
        match File::open(&file_path) {
            Ok(file) => Ok(Some(Box::new(BufReader::new(file)))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}
