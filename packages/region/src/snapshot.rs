//! Loading per-region statistical snapshots.
//!
//! A snapshot file is JSON, either an array of region records or an object
//! keyed by region code. Records that omit their group inherit it from the
//! [`registry`](crate::registry).

use std::collections::BTreeMap;
use std::path::Path;

use regionscope_region_models::Region;
use serde::Deserialize;

use crate::RegionError;
use crate::registry::group_of;

#[derive(Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    List(Vec<Region>),
    ByCode(BTreeMap<String, Region>),
}

/// An immutable set of region snapshots, indexed by code.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    regions: Vec<Region>,
    by_code: BTreeMap<String, usize>,
}

impl Snapshot {
    /// Builds a snapshot from region records.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::DuplicateRegion`] if two records share a code.
    pub fn from_regions(regions: Vec<Region>) -> Result<Self, RegionError> {
        let mut snapshot = Self::default();

        for mut region in regions {
            if snapshot.by_code.contains_key(&region.code) {
                return Err(RegionError::DuplicateRegion { code: region.code });
            }
            if region.group.is_empty() {
                if let Some(group) = group_of(&region.code) {
                    region.group = group.to_string();
                } else {
                    log::warn!("Region {} is not registered and has no group", region.code);
                }
            }
            snapshot
                .by_code
                .insert(region.code.clone(), snapshot.regions.len());
            snapshot.regions.push(region);
        }

        Ok(snapshot)
    }

    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// * [`RegionError::Json`] if the document is malformed
    /// * [`RegionError::DuplicateRegion`] if two records share a code
    pub fn from_json(json: &str) -> Result<Self, RegionError> {
        let regions = match serde_json::from_str::<SnapshotFile>(json)? {
            SnapshotFile::List(regions) => regions,
            SnapshotFile::ByCode(map) => map
                .into_iter()
                .map(|(code, mut region)| {
                    if region.code.is_empty() {
                        region.code = code;
                    }
                    region
                })
                .collect(),
        };
        Self::from_regions(regions)
    }

    /// Reads and parses a snapshot file.
    ///
    /// # Errors
    ///
    /// * [`RegionError::Io`] if the file cannot be read
    /// * [`RegionError::Json`] if the file is malformed
    /// * [`RegionError::DuplicateRegion`] if two records share a code
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegionError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&json)?;
        log::info!(
            "Loaded {} regions from {}",
            snapshot.len(),
            path.display()
        );
        Ok(snapshot)
    }

    /// Looks up one region by code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&Region> {
        self.by_code.get(code).map(|&idx| &self.regions[idx])
    }

    /// All regions, in file order.
    #[must_use]
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Clones the regions for `codes`, in the order given.
    ///
    /// Codes with no snapshot are skipped.
    pub fn select<S: AsRef<str>>(&self, codes: impl IntoIterator<Item = S>) -> Vec<Region> {
        codes
            .into_iter()
            .filter_map(|code| {
                let code = code.as_ref();
                let region = self.get(code).cloned();
                if region.is_none() {
                    log::debug!("No snapshot for region {code}");
                }
                region
            })
            .collect()
    }

    /// Number of regions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether the snapshot holds no regions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
