//! Process-wide default registry
//!
//! The default registry is created on first use and immediately fed with every
//! manifest on the ambient search path (see [`SearchPathSource::ambient`]).
//! That bootstrap runs once per process. If it fails the error is logged and
//! the registry stays usable, possibly empty.

use once_cell::sync::Lazy;
use tracing::{error, warn};

use crate::config::ManifestsConfig;
use crate::error::Result;
use crate::registry::Manifests;
use crate::sources::SearchPathSource;

static DEFAULT: Lazy<Manifests> = Lazy::new(bootstrap);

fn bootstrap() -> Manifests {
    let config = ManifestsConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "failed to load manifests config, using defaults");
        ManifestsConfig::default()
    });
    let registry = Manifests::new().with_limits(config.parse_limits());
    if let Err(e) = registry.append(&SearchPathSource::ambient(&config.scan)) {
        error!(error = %e, "failed to load manifests from the search path");
    }
    registry
}

/// The default registry, bootstrapped on first call
pub fn singleton() -> &'static Manifests {
    &DEFAULT
}

/// Read an attribute from the default registry.
///
/// Fails with `NotFound` if no loaded manifest defines `name`; call
/// [`exists`] first when absence is expected.
///
/// ```no_run
/// let version = manifests::read("Implementation-Version")?;
/// # Ok::<(), manifests::ManifestError>(())
/// ```
pub fn read(name: &str) -> Result<String> {
    singleton().read(name)
}

/// Check whether the default registry has `name`
pub fn exists(name: &str) -> Result<bool> {
    singleton().exists(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::StringSource;

    #[test]
    fn test_singleton_is_shared() {
        assert!(std::ptr::eq(singleton(), singleton()));
    }

    #[test]
    fn test_append_to_singleton() {
        singleton()
            .append(&StringSource::new("Global-Unit-Test: bar\n"))
            .unwrap();
        assert_eq!(read("Global-Unit-Test").unwrap(), "bar");
        assert!(exists("Global-Unit-Test").unwrap());
    }

    #[test]
    fn test_invalid_and_missing_names() {
        assert!(read("").unwrap_err().is_invalid_argument());
        assert!(exists("").unwrap_err().is_invalid_argument());
        assert!(read("Global-Unit-Test-Absent").unwrap_err().is_not_found());
        assert!(!exists("Global-Unit-Test-Absent").unwrap());
    }
}
