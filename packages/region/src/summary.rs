//! Display summary of a region selection.

use std::collections::BTreeMap;

use crate::registry::{group_of, regions_by_group};

const UNKNOWN_GROUP: &str = "Unknown";

/// Summarizes the selected region codes grouped by group name.
///
/// Groups are sorted by name. A group renders as `"<Group> (All)"` when
/// every registered region of that group is selected, otherwise as
/// `"<Group> (c1, c2)"` with codes sorted. Codes missing from the
/// registry are grouped under `"Unknown"`.
#[must_use]
pub fn summarize_selection<S: AsRef<str>>(selected: &[S]) -> String {
    if selected.is_empty() {
        return "Select regions".to_string();
    }

    let registered = regions_by_group();
    let mut by_group: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for code in selected {
        let code = code.as_ref();
        by_group
            .entry(group_of(code).unwrap_or(UNKNOWN_GROUP))
            .or_default()
            .push(code);
    }

    by_group
        .into_iter()
        .map(|(group, mut codes)| {
            codes.sort_unstable();
            codes.dedup();
            let complete = registered
                .get(group)
                .is_some_and(|all| all.len() == codes.len());
            if complete {
                format!("{group} (All)")
            } else {
                format!("{group} ({})", codes.join(", "))
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}
