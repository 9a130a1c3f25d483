//! Configuration management for the manifest registry
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (manifests.toml)
//! - Environment variables (MANIFESTS__*)
//!
//! ## Example config file (manifests.toml):
//! ```toml
//! [scan]
//! roots = ["/opt/app/lib", "/opt/app/plugins"]
//! resource = "META-INF/MANIFEST.MF"
//! recursive = true
//! max_depth = 4
//!
//! [parse]
//! max_line_bytes = 512
//! max_document_bytes = 1048576
//! ```

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::parse::ParseLimits;
use crate::sources::MANIFEST_RESOURCE;

/// Main configuration for the manifest registry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ManifestsConfig {
    /// Search path settings for the default registry
    #[serde(default)]
    pub scan: ScanConfig,

    /// Parser limits
    #[serde(default)]
    pub parse: ParseConfig,
}

/// Where the default registry looks for manifests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Extra roots, searched after the environment and process roots
    #[serde(default)]
    pub roots: Vec<PathBuf>,

    /// Manifest path relative to a directory root
    #[serde(default = "default_resource")]
    pub resource: PathBuf,

    /// Collect every matching resource below a root, not just the top one
    #[serde(default)]
    pub recursive: bool,

    /// Depth limit for recursive scans
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Search the directory of the running executable
    #[serde(default = "default_true")]
    pub include_exe_dir: bool,

    /// Search the current working directory
    #[serde(default = "default_true")]
    pub include_current_dir: bool,
}

/// Limits applied to every parsed document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseConfig {
    #[serde(default = "default_max_line_bytes")]
    pub max_line_bytes: usize,

    #[serde(default = "default_max_document_bytes")]
    pub max_document_bytes: usize,
}

// Default value functions
fn default_resource() -> PathBuf {
    PathBuf::from(MANIFEST_RESOURCE)
}

fn default_max_depth() -> usize {
    8
}

fn default_true() -> bool {
    true
}

fn default_max_line_bytes() -> usize {
    ParseLimits::default().max_line_bytes
}

fn default_max_document_bytes() -> usize {
    ParseLimits::default().max_document_bytes
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            roots: Vec::new(),
            resource: default_resource(),
            recursive: false,
            max_depth: default_max_depth(),
            include_exe_dir: true,
            include_current_dir: true,
        }
    }
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_line_bytes: default_max_line_bytes(),
            max_document_bytes: default_max_document_bytes(),
        }
    }
}

impl From<&ParseConfig> for ParseLimits {
    fn from(config: &ParseConfig) -> Self {
        Self {
            max_line_bytes: config.max_line_bytes,
            max_document_bytes: config.max_document_bytes,
        }
    }
}

impl ManifestsConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration from a specific file
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        // Load from default locations
        let config_locations = [
            "manifests.toml",
            ".manifests.toml",
            "config/manifests.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // Load from XDG config directory
        if let Some(config_dir) = directories::ProjectDirs::from("dev", "familiar", "manifests") {
            let xdg_config = config_dir.config_dir().join("manifests.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        // Load from specified path
        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Load from environment variables (MANIFESTS__*)
        builder = builder.add_source(
            Environment::with_prefix("MANIFESTS")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }

    /// Parser limits derived from `[parse]`
    pub fn parse_limits(&self) -> ParseLimits {
        ParseLimits::from(&self.parse)
    }
}
