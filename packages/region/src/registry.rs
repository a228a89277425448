//! Region registry, loaded from embedded TOML configs.
//!
//! Each `.toml` file in `packages/region/regions/` is baked into the
//! binary at compile time via [`include_str!`] and lists the region codes
//! of one area together with the group each code belongs to.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::RegionError;

/// TOML configs embedded at compile time.
const REGION_TOMLS: &[(&str, &str)] = &[(
    "west_valley",
    include_str!("../regions/west_valley.toml"),
)];

static REGISTRY: LazyLock<Vec<RegionEntry>> = LazyLock::new(load_registry);

/// One selectable region code and its group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionEntry {
    /// Region code, e.g. `"85301"`.
    pub code: String,
    /// Group display name, e.g. `"Glendale"`.
    pub group: String,
}

/// One registry config: a named area and its region codes.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegionArea {
    /// Area display name, e.g. `"West Valley"`.
    pub name: String,
    /// Codes in file order.
    #[serde(default)]
    pub regions: Vec<RegionEntry>,
}

/// Parses one registry TOML document.
///
/// # Errors
///
/// Returns [`RegionError::Toml`] if the document is malformed or has no
/// `name`.
pub fn parse_region_toml(toml_str: &str) -> Result<RegionArea, RegionError> {
    Ok(toml::de::from_str(toml_str)?)
}

/// Parses every embedded config, keeping the first listing of each code.
///
/// # Panics
///
/// Panics if any embedded TOML config is malformed (this is a compile-time
/// guarantee since the configs are embedded).
fn load_registry() -> Vec<RegionEntry> {
    let mut seen = BTreeSet::new();
    let mut entries = Vec::new();

    for (name, toml) in REGION_TOMLS {
        let area = parse_region_toml(toml)
            .unwrap_or_else(|e| panic!("Failed to parse {name}.toml: {e}"));
        log::debug!("{name}.toml: {} lists {} regions", area.name, area.regions.len());
        for entry in area.regions {
            if !seen.insert(entry.code.clone()) {
                log::warn!(
                    "{name}.toml: region {} already registered, ignoring group {}",
                    entry.code,
                    entry.group
                );
                continue;
            }
            entries.push(entry);
        }
    }

    log::debug!("Loaded {} registered regions", entries.len());
    entries
}

/// All registered regions, in file order.
#[must_use]
pub fn all_regions() -> &'static [RegionEntry] {
    &REGISTRY
}

/// The group a registered region code belongs to.
#[must_use]
pub fn group_of(code: &str) -> Option<&'static str> {
    REGISTRY
        .iter()
        .find(|e| e.code == code)
        .map(|e| e.group.as_str())
}

/// Registered codes grouped by group name.
///
/// Groups are sorted by name and codes are sorted within each group.
#[must_use]
pub fn regions_by_group() -> BTreeMap<&'static str, Vec<&'static str>> {
    let mut groups: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for entry in all_regions() {
        groups
            .entry(entry.group.as_str())
            .or_default()
            .push(entry.code.as_str());
    }
    for codes in groups.values_mut() {
        codes.sort_unstable();
    }
    groups
}

/// Total number of registered regions (used in tests).
#[cfg(test)]
const EXPECTED_REGION_COUNT: usize = 40;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_all_regions() {
        assert_eq!(all_regions().len(), EXPECTED_REGION_COUNT);
    }

    #[test]
    fn embedded_configs_have_no_duplicates() {
        let mut codes = Vec::new();
        for (_, toml) in REGION_TOMLS {
            codes.extend(
                parse_region_toml(toml)
                    .unwrap()
                    .regions
                    .into_iter()
                    .map(|e| e.code),
            );
        }
        let total = codes.len();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), total);
    }

    #[test]
    fn all_regions_have_required_fields() {
        for entry in all_regions() {
            assert!(!entry.code.is_empty(), "region code is empty");
            assert!(!entry.group.is_empty(), "{}: group is empty", entry.code);
        }
    }

    #[test]
    fn straddling_codes_keep_first_group() {
        assert_eq!(group_of("85302"), Some("Glendale"));
        assert_eq!(group_of("85031"), Some("Phoenix"));
        assert_eq!(group_of("99999"), None);
    }

    #[test]
    fn groups_are_sorted() {
        let groups = regions_by_group();
        let names: Vec<&str> = groups.keys().copied().collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert_eq!(groups["Avondale"], vec!["85323", "85392"]);
        assert_eq!(groups["Glendale"].len(), 10);
    }

    #[test]
    fn parse_rejects_malformed_toml() {
        assert!(matches!(
            parse_region_toml("name = "),
            Err(RegionError::Toml(_))
        ));
    }

    #[test]
    fn parse_keeps_every_entry() {
        let parsed = parse_region_toml(
            r#"
            name = "Test"

            [[regions]]
            code = "1"
            group = "A"

            [[regions]]
            code = "1"
            group = "B"
            "#,
        )
        .unwrap();
        // Parsing keeps both; the registry loader is what dedupes.
        assert_eq!(parsed.name, "Test");
        assert_eq!(parsed.regions.len(), 2);
    }

    #[test]
    fn embedded_config_is_named() {
        let names: Vec<String> = REGION_TOMLS
            .iter()
            .map(|(_, toml)| parse_region_toml(toml).unwrap().name)
            .collect();
        assert_eq!(names, ["West Valley"]);
    }

    #[test]
    fn parse_requires_area_name() {
        assert!(matches!(
            parse_region_toml("[[regions]]\ncode = \"1\"\ngroup = \"A\"\n"),
            Err(RegionError::Toml(_))
        ));
    }
}
