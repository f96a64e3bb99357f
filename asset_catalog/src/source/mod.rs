//! Catalog source boundary - fetching a full snapshot of asset metadata.
//!
//! The engine reads the catalog exactly once per run, as a single synchronous
//! call returning a complete in-memory snapshot. Host compatibility shims
//! (class names as free-form strings, registry dumps as JSON) live here and
//! nowhere else.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::{AssetRecord, TypeTag};

/// Errors from the catalog boundary. A fetch failure is fatal to a run.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog fetch failed under {root}: {reason}")]
    FetchFailed { root: String, reason: String },

    #[error("malformed registry dump: {0}")]
    MalformedDump(#[from] serde_json::Error),
}

/// A complete catalog snapshot, in the source's enumeration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    records: Vec<AssetRecord>,
}

impl CatalogSnapshot {
    /// Create a snapshot from records, keeping their order.
    pub fn new(records: Vec<AssetRecord>) -> Self {
        Self { records }
    }

    /// All records in enumeration order.
    pub fn records(&self) -> &[AssetRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records of a single type, in enumeration order.
    pub fn of_type(&self, tag: TypeTag) -> impl Iterator<Item = &AssetRecord> {
        self.records.iter().filter(move |r| r.type_tag == tag)
    }
}

/// Supplies the full set of records under a namespace root, recursively.
pub trait CatalogSource {
    /// Fetch one complete snapshot. Called exactly once per run.
    fn fetch(&self, root: &str) -> Result<CatalogSnapshot, CatalogError>;
}

/// One row of a host registry dump, before class-name shimming.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawAssetRecord {
    class: String,
    name: String,
    package: String,
}

/// An in-memory catalog, used for tests and for registry dumps exported by
/// the host editor.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    records: Vec<AssetRecord>,
}

impl MemoryCatalog {
    /// Create a catalog over the given records.
    pub fn new(records: Vec<AssetRecord>) -> Self {
        Self { records }
    }

    /// Load a catalog from a JSON registry dump: an array of
    /// `{"class": ..., "name": ..., "package": ...}` rows. Unrecognized
    /// class names become [`TypeTag::Unknown`].
    pub fn from_json_str(dump: &str) -> Result<Self, CatalogError> {
        let raw: Vec<RawAssetRecord> = serde_json::from_str(dump)?;
        let records = raw
            .into_iter()
            .map(|r| AssetRecord::new(TypeTag::from_class_name(&r.class), r.name, r.package))
            .collect();
        Ok(Self { records })
    }
}

impl CatalogSource for MemoryCatalog {
    fn fetch(&self, root: &str) -> Result<CatalogSnapshot, CatalogError> {
        let records = self
            .records
            .iter()
            .filter(|r| path_is_under(&r.container_path, root))
            .cloned()
            .collect();
        Ok(CatalogSnapshot::new(records))
    }
}

/// Path-segment-aware root check: `/Game` covers `/Game` and `/Game/...`
/// but not `/Gameplay/...`.
fn path_is_under(path: &str, root: &str) -> bool {
    let root = root.trim_end_matches('/');
    if root.is_empty() {
        return true;
    }
    match path.strip_prefix(root) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}
