//! Manifest Attribute Registry
//!
//! Collects the main attributes of `META-INF/MANIFEST.MF` documents from
//! files, directories, in-memory strings, readers and hosting contexts, and
//! serves them from one thread-safe registry.
//!
//! ## Features
//!
//! - **First Value Wins**: `get`/`read` return the earliest value appended for a name
//! - **Full History**: `all_values` returns every value seen, oldest first
//! - **Failure Isolation**: a malformed document is logged and skipped, never fatal
//! - **Default Registry**: loaded once from the search path on first use
//!
//! ## Usage
//!
//! ```no_run
//! use manifests::{FilesSource, StringSource};
//!
//! // Default registry, bootstrapped from META-INF/MANIFEST.MF on the search path
//! let built_by = manifests::read("Built-By")?;
//!
//! // Add more manifests to it
//! manifests::singleton().append(&FilesSource::new("target/MANIFEST.MF"))?;
//! manifests::singleton().append(&StringSource::new("Foo-Version: 1.2\n"))?;
//! # Ok::<(), manifests::ManifestError>(())
//! ```

pub mod config;
pub mod error;
pub mod global;
pub mod parse;
pub mod registry;
pub mod sources;

pub use config::ManifestsConfig;
pub use error::{ManifestError, ParseError, ParseErrorKind, Result};
pub use global::{exists, read, singleton};
pub use parse::{parse_main_section, ParseLimits};
pub use registry::{AppendReport, Manifests};
pub use sources::{
    ContextSource, DirectoryContext, FilesSource, ManifestSource, ManifestStream,
    ResourceContext, SearchPathSource, StreamsSource, StringSource,
};
