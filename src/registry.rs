//! Manifest Registry
//!
//! Merges attributes from any number of manifest documents into one map.
//!
//! Two views are kept per attribute name:
//! - the point value, which is the first value ever seen for the name; later
//!   documents never overwrite it
//! - the history, every value seen for the name in append order
//!
//! Both views are updated together under one write lock per document, so a
//! reader never sees a name in one view and not the other.

use std::collections::{BTreeSet, HashMap};
use std::time::Instant;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ManifestError, Result};
use crate::parse::{parse_main_section, ParseLimits};
use crate::sources::ManifestSource;

/// Outcome of one `append` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AppendReport {
    /// Documents fetched from the source
    pub streams: usize,
    /// Documents rejected by the parser
    pub failed: usize,
    /// Attributes stored as new point values
    pub saved: usize,
    /// Attributes whose name was already present (history only)
    pub ignored: usize,
    /// Registry size after the append
    pub total: usize,
}

#[derive(Debug, Default)]
struct Store {
    attributes: HashMap<String, String>,
    history: HashMap<String, Vec<String>>,
}

impl Store {
    /// Record one value; returns true when it became the point value
    fn record(&mut self, name: String, value: String) -> bool {
        self.history
            .entry(name.clone())
            .or_default()
            .push(value.clone());
        if self.attributes.contains_key(&name) {
            false
        } else {
            self.attributes.insert(name, value);
            true
        }
    }
}

/// Thread-safe registry of manifest attributes
#[derive(Debug, Default)]
pub struct Manifests {
    store: RwLock<Store>,
    limits: ParseLimits,
}

impl Manifests {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry seeded with `attributes`.
    ///
    /// Each seeded value is also the first entry of its history.
    pub fn with_attributes<I, K, V>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut store = Store::default();
        for (name, value) in attributes {
            store.record(name.into(), value.into());
        }
        Self {
            store: RwLock::new(store),
            limits: ParseLimits::default(),
        }
    }

    /// Use `limits` for documents parsed by later appends
    pub fn with_limits(mut self, limits: ParseLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Number of attributes
    pub fn size(&self) -> usize {
        self.store.read().attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.read().attributes.is_empty()
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.store.read().attributes.contains_key(name)
    }

    /// True when some attribute's point value equals `value`
    pub fn contains_value(&self, value: &str) -> bool {
        self.store.read().attributes.values().any(|v| v == value)
    }

    /// First value seen for `name`
    pub fn get(&self, name: &str) -> Option<String> {
        self.store.read().attributes.get(name).cloned()
    }

    /// Every value seen for `name`, oldest first; empty if never seen.
    ///
    /// The returned vector is a copy and does not change with later appends.
    pub fn all_values(&self, name: &str) -> Vec<String> {
        self.store
            .read()
            .history
            .get(name)
            .cloned()
            .unwrap_or_default()
    }

    /// Copy of the point values
    pub fn as_map(&self) -> HashMap<String, String> {
        self.store.read().attributes.clone()
    }

    /// Copy of the attribute names, sorted
    pub fn key_set(&self) -> BTreeSet<String> {
        self.store.read().attributes.keys().cloned().collect()
    }

    /// Check whether `name` is present, rejecting an empty name
    pub fn exists(&self, name: &str) -> Result<bool> {
        validate_name(name)?;
        Ok(self.contains_key(name))
    }

    /// Value of `name`, failing with `NotFound` when it is absent
    pub fn read(&self, name: &str) -> Result<String> {
        validate_name(name)?;
        let store = self.store.read();
        match store.attributes.get(name) {
            Some(value) => Ok(value.clone()),
            None => {
                let mut known: Vec<String> = store.attributes.keys().cloned().collect();
                known.sort();
                Err(ManifestError::NotFound {
                    name: name.to_string(),
                    count: known.len(),
                    known,
                })
            }
        }
    }

    /// Merge every document produced by `source`.
    ///
    /// Only a failing `fetch` fails the call. A document that does not parse
    /// is logged and skipped; its siblings are still merged. Documents are
    /// merged one at a time, so concurrent readers may see part of a batch.
    pub fn append<S: ManifestSource + ?Sized>(&self, source: &S) -> Result<AppendReport> {
        let start = Instant::now();
        let streams = source.fetch()?;
        let mut report = AppendReport {
            streams: streams.len(),
            ..AppendReport::default()
        };
        let mut merged_total = None;

        for (index, mut stream) in streams.into_iter().enumerate() {
            let parsed = parse_main_section(&mut stream, &self.limits);
            // Release the handle before touching shared state
            drop(stream);

            let pairs = match parsed {
                Ok(pairs) => pairs,
                Err(e) => {
                    warn!(document = index, error = %e, "failed to load manifest document");
                    report.failed += 1;
                    continue;
                }
            };
            debug!(
                document = index,
                count = pairs.len(),
                names = ?pairs.iter().map(|(name, _)| name.as_str()).collect::<Vec<_>>(),
                "attribute(s) loaded"
            );

            let mut store = self.store.write();
            for (name, value) in pairs {
                if store.record(name, value) {
                    report.saved += 1;
                } else {
                    report.ignored += 1;
                }
            }
            merged_total = Some(store.attributes.len());
        }

        report.total = match merged_total {
            Some(total) => total,
            None => self.size(),
        };
        info!(
            total = report.total,
            streams = report.streams,
            failed = report.failed,
            saved = report.saved,
            ignored = report.ignored,
            elapsed_ms = start.elapsed().as_millis() as u64,
            keys = ?self.key_set(),
            "attributes loaded"
        );
        Ok(report)
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ManifestError::InvalidArgument(
            "attribute name can't be empty".to_string(),
        ));
    }
    Ok(())
}
