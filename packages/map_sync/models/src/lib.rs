#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Selection state shared between the host and the map.
//!
//! The host owns a [`SelectionState`]: the selected region codes, the
//! metrics being compared, the metric currently coloring the map, and two
//! [`ViewCommands`] counters. The map reports clicks upward as
//! [`SelectionIntent`]s, which the host applies to its state.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Modifier keys held during a click.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickModifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl ClickModifiers {
    /// Whether the click should add to or remove from the selection rather
    /// than replace it. Ctrl or Cmd/Meta toggles; Shift does not.
    #[must_use]
    pub const fn multi_select(self) -> bool {
        self.ctrl || self.meta
    }
}

/// A click on a region, reported to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionIntent {
    /// Code of the clicked region.
    pub code: String,
    /// Toggle membership instead of replacing the selection.
    pub multi_select: bool,
}

impl SelectionIntent {
    #[must_use]
    pub fn new(code: impl Into<String>, modifiers: ClickModifiers) -> Self {
        Self {
            code: code.into(),
            multi_select: modifiers.multi_select(),
        }
    }
}

/// Edge-triggered view commands.
///
/// Each counter only ever increases. The map acts when a counter differs
/// from the value it last observed, never on the absolute value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewCommands {
    /// Fit the viewport to the selected regions.
    pub fit_selection: u64,
    /// Restore the initial center and zoom.
    pub reset_view: u64,
}

/// Host-owned selection and metric state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    selected: BTreeSet<String>,
    metric_ids: Vec<String>,
    active_metric: Option<String>,
    commands: ViewCommands,
}

impl SelectionState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected region codes.
    #[must_use]
    pub const fn selected(&self) -> &BTreeSet<String> {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, code: &str) -> bool {
        self.selected.contains(code)
    }

    /// Replaces the selection wholesale, as a region picker would.
    pub fn set_selected<S: Into<String>>(&mut self, codes: impl IntoIterator<Item = S>) {
        self.selected = codes.into_iter().map(Into::into).collect();
    }

    /// Adds `code` if absent, removes it if present.
    pub fn toggle(&mut self, code: &str) {
        if !self.selected.remove(code) {
            self.selected.insert(code.to_string());
        }
    }

    /// Applies a map click.
    ///
    /// With a modifier held the clicked region's membership is toggled.
    /// Without one, clicking the sole selected region clears the
    /// selection and clicking anything else selects only that region.
    pub fn apply(&mut self, intent: &SelectionIntent) {
        if intent.multi_select {
            self.toggle(&intent.code);
            return;
        }

        let sole = self.selected.len() == 1 && self.selected.contains(&intent.code);
        self.selected.clear();
        if !sole {
            self.selected.insert(intent.code.clone());
        }
    }

    /// Metrics being compared, in the order the host chose them.
    #[must_use]
    pub fn metric_ids(&self) -> &[String] {
        &self.metric_ids
    }

    /// The metric currently coloring the map.
    #[must_use]
    pub fn active_metric(&self) -> Option<&str> {
        self.active_metric.as_deref()
    }

    /// Replaces the compared metrics.
    ///
    /// The active metric is kept if it is still listed; otherwise the last
    /// listed metric becomes active, or none if the list is empty.
    pub fn set_metric_ids(&mut self, ids: Vec<String>) {
        let keep = self
            .active_metric
            .as_ref()
            .is_some_and(|active| ids.contains(active));
        if !keep {
            self.active_metric = ids.last().cloned();
        }
        self.metric_ids = ids;
    }

    /// Makes `id` the active metric. Returns `false`, changing nothing, if
    /// `id` is not among the compared metrics.
    pub fn set_active_metric(&mut self, id: &str) -> bool {
        if !self.metric_ids.iter().any(|m| m == id) {
            return false;
        }
        self.active_metric = Some(id.to_string());
        true
    }

    #[must_use]
    pub const fn commands(&self) -> ViewCommands {
        self.commands
    }

    /// Asks the map to fit its viewport to the selection.
    pub const fn request_fit(&mut self) {
        self.commands.fit_selection += 1;
    }

    /// Clears the selection and metrics and asks the map to reset its
    /// view.
    pub fn clear(&mut self) {
        self.selected.clear();
        self.metric_ids.clear();
        self.active_metric = None;
        self.commands.reset_view += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(code: &str, multi_select: bool) -> SelectionIntent {
        SelectionIntent {
            code: code.to_string(),
            multi_select,
        }
    }

    fn selected(state: &SelectionState) -> Vec<&str> {
        state.selected().iter().map(String::as_str).collect()
    }

    #[test]
    fn plain_click_replaces_selection() {
        let mut state = SelectionState::new();
        state.set_selected(["85301", "85302"]);

        state.apply(&click("85303", false));
        assert_eq!(selected(&state), vec!["85303"]);
    }

    #[test]
    fn plain_click_on_sole_selection_clears() {
        let mut state = SelectionState::new();
        state.apply(&click("85301", false));
        state.apply(&click("85301", false));
        assert!(state.selected().is_empty());
    }

    #[test]
    fn plain_click_on_one_of_many_selects_only_it() {
        let mut state = SelectionState::new();
        state.set_selected(["85301", "85302"]);

        state.apply(&click("85301", false));
        assert_eq!(selected(&state), vec!["85301"]);
    }

    #[test]
    fn modifier_click_toggles() {
        let mut state = SelectionState::new();
        state.apply(&click("85301", true));
        state.apply(&click("85302", true));
        assert_eq!(selected(&state), vec!["85301", "85302"]);

        state.apply(&click("85301", true));
        assert_eq!(selected(&state), vec!["85302"]);
    }

    #[test]
    fn shift_alone_is_not_multi_select() {
        let shift = ClickModifiers {
            shift: true,
            ..ClickModifiers::default()
        };
        let meta = ClickModifiers {
            meta: true,
            ..ClickModifiers::default()
        };
        assert!(!SelectionIntent::new("85301", shift).multi_select);
        assert!(SelectionIntent::new("85301", meta).multi_select);
    }

    #[test]
    fn active_metric_survives_when_still_listed() {
        let mut state = SelectionState::new();
        state.set_metric_ids(vec!["population".into(), "poverty_rate".into()]);
        assert_eq!(state.active_metric(), Some("poverty_rate"));

        assert!(state.set_active_metric("population"));
        state.set_metric_ids(vec!["population".into(), "median_age".into()]);
        assert_eq!(state.active_metric(), Some("population"));
    }

    #[test]
    fn active_metric_falls_back_to_last() {
        let mut state = SelectionState::new();
        state.set_metric_ids(vec!["population".into()]);
        state.set_metric_ids(vec!["median_age".into(), "poverty_rate".into()]);
        assert_eq!(state.active_metric(), Some("poverty_rate"));

        state.set_metric_ids(Vec::new());
        assert_eq!(state.active_metric(), None);
    }

    #[test]
    fn unlisted_metric_cannot_be_activated() {
        let mut state = SelectionState::new();
        state.set_metric_ids(vec!["population".into()]);
        assert!(!state.set_active_metric("median_age"));
        assert_eq!(state.active_metric(), Some("population"));
    }

    #[test]
    fn clear_resets_everything_and_signals() {
        let mut state = SelectionState::new();
        state.set_selected(["85301"]);
        state.set_metric_ids(vec!["population".into()]);
        state.request_fit();

        state.clear();

        assert!(state.selected().is_empty());
        assert!(state.metric_ids().is_empty());
        assert_eq!(state.active_metric(), None);
        assert_eq!(
            state.commands(),
            ViewCommands {
                fit_selection: 1,
                reset_view: 1
            }
        );
    }

    #[test]
    fn serializes_camel_case() {
        let mut state = SelectionState::new();
        state.set_metric_ids(vec!["population".into()]);
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json["activeMetric"], "population");
        assert_eq!(json["commands"]["resetView"], 0);
    }
}
