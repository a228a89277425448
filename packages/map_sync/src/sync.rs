//! The selection/hover state machine.

use std::collections::{BTreeMap, BTreeSet};

use geo::Rect;
use regionscope_map_sync_models::{ClickModifiers, SelectionIntent, ViewCommands};
use regionscope_metrics_models::Domain;

use crate::config::MapViewConfig;
use crate::feature::{FeatureId, MapFeature, union_bounds};
use crate::style::{FeatureStyle, compute_style};
use crate::surface::RenderSurface;

/// Level-triggered inputs, re-applied wholesale on every change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapInputs {
    /// Selected region codes.
    pub selection: BTreeSet<String>,
    /// Metric coloring the map, if any. Without one every feature is
    /// filled as "no data".
    pub active_metric: Option<String>,
    /// The active metric's value per region code.
    pub values: BTreeMap<String, Option<f64>>,
    /// The active metric's domain.
    pub domain: Option<Domain>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HoverState {
    Idle,
    Hovering(FeatureId),
}

/// Drives a [`RenderSurface`] from selection, hover, and metric state.
#[derive(Debug, Clone)]
pub struct MapSync {
    config: MapViewConfig,
    features: Vec<MapFeature>,
    inputs: MapInputs,
    hover: HoverState,
    observed: ViewCommands,
}

impl MapSync {
    /// Starts with empty inputs and nothing hovered.
    #[must_use]
    pub fn new(features: Vec<MapFeature>, config: MapViewConfig) -> Self {
        Self {
            config,
            features,
            inputs: MapInputs::default(),
            hover: HoverState::Idle,
            observed: ViewCommands::default(),
        }
    }

    /// Bound features in layer order.
    #[must_use]
    pub fn features(&self) -> &[MapFeature] {
        &self.features
    }

    /// The view configuration the layer was built with.
    #[must_use]
    pub const fn config(&self) -> &MapViewConfig {
        &self.config
    }

    /// The inputs last applied.
    #[must_use]
    pub const fn inputs(&self) -> &MapInputs {
        &self.inputs
    }

    /// The feature under the pointer, if any.
    #[must_use]
    pub const fn hovered(&self) -> Option<FeatureId> {
        match self.hover {
            HoverState::Idle => None,
            HoverState::Hovering(id) => Some(id),
        }
    }

    /// The feature with `id`.
    #[must_use]
    pub fn feature(&self, id: FeatureId) -> Option<&MapFeature> {
        self.features.get(id.0).filter(|f| f.id == id)
    }

    /// The feature bound to `code`.
    #[must_use]
    pub fn feature_for_code(&self, code: &str) -> Option<&MapFeature> {
        self.features
            .iter()
            .find(|f| f.code.as_deref() == Some(code))
    }

    fn is_selected(&self, feature: &MapFeature) -> bool {
        feature
            .code
            .as_ref()
            .is_some_and(|code| self.inputs.selection.contains(code))
    }

    /// The active metric's value for a feature, if a metric is active.
    fn value_for(&self, feature: &MapFeature) -> Option<f64> {
        self.inputs.active_metric.as_ref()?;
        let code = feature.code.as_ref()?;
        self.inputs.values.get(code).copied().flatten()
    }

    /// The feature's resting style given the current inputs.
    #[must_use]
    pub fn resting_style(&self, feature: &MapFeature) -> FeatureStyle {
        compute_style(
            feature.code.as_deref(),
            &self.inputs.selection,
            self.value_for(feature),
            self.inputs.domain,
            &self.config,
        )
    }

    fn hover_style(&self, feature: &MapFeature) -> FeatureStyle {
        self.resting_style(feature).merged(&self.config.hover_style)
    }

    fn raise_selected(&self, surface: &mut impl RenderSurface) {
        for feature in self.features.iter().filter(|f| self.is_selected(f)) {
            surface.bring_to_front(feature.id);
        }
    }

    /// Frames the layer on first display.
    ///
    /// Fits the union of all feature bounds when configured to and any
    /// bounds exist, otherwise sets the configured center and zoom.
    pub fn initial_view(&self, surface: &mut impl RenderSurface) {
        if self.config.fit_initial_bounds
            && let Some(bounds) = union_of(self.features.iter())
        {
            surface.fit_bounds(bounds, self.config.fit_padding);
            return;
        }
        surface.set_view(self.config.center, self.config.zoom);
    }

    /// Replaces the level-triggered inputs and restyles every feature.
    ///
    /// Selected features are raised above the rest. A feature still under
    /// the pointer keeps its hover overlay and stays on top.
    pub fn apply_inputs(&mut self, inputs: MapInputs, surface: &mut impl RenderSurface) {
        self.inputs = inputs;

        for feature in &self.features {
            let style = if self.hovered() == Some(feature.id) {
                self.hover_style(feature)
            } else {
                self.resting_style(feature)
            };
            surface.set_style(feature.id, &style);
        }

        self.raise_selected(surface);
        if let Some(hovered) = self.hovered() {
            surface.bring_to_front(hovered);
        }

        log::trace!(
            "Restyled {} features, {} selected, metric {:?}",
            self.features.len(),
            self.inputs.selection.len(),
            self.inputs.active_metric
        );
    }

    /// The pointer entered a feature.
    ///
    /// Applies the hover overlay, raises the feature, and opens its
    /// tooltip. Inert features are ignored. If another feature is still
    /// marked hovered, it is left first.
    pub fn pointer_enter(&mut self, id: FeatureId, surface: &mut impl RenderSurface) {
        let Some(feature) = self.feature(id).filter(|f| f.is_interactive()) else {
            return;
        };
        let tooltip = feature.tooltip();
        let style = self.hover_style(feature);

        if let Some(previous) = self.hovered().filter(|&previous| previous != id) {
            self.pointer_leave(previous, surface);
        }

        surface.set_style(id, &style);
        surface.bring_to_front(id);
        if let Some(text) = tooltip {
            surface.open_tooltip(id, &text);
        }
        self.hover = HoverState::Hovering(id);
    }

    /// The pointer left a feature.
    ///
    /// Restores the resting style, closes the tooltip, then raises every
    /// selected feature so no selected border stays under the feature that
    /// was hovered.
    pub fn pointer_leave(&mut self, id: FeatureId, surface: &mut impl RenderSurface) {
        let Some(feature) = self.feature(id).filter(|f| f.is_interactive()) else {
            return;
        };
        let style = self.resting_style(feature);
        if self.hovered() == Some(id) {
            self.hover = HoverState::Idle;
        }

        surface.set_style(id, &style);
        surface.close_tooltip(id);
        self.raise_selected(surface);
    }

    /// A click on a feature, turned into an intent for the host.
    ///
    /// Inert features produce no intent.
    #[must_use]
    pub fn click(&self, id: FeatureId, modifiers: ClickModifiers) -> Option<SelectionIntent> {
        let code = self.feature(id)?.code.as_deref()?;
        Some(SelectionIntent::new(code, modifiers))
    }

    /// Reacts to view command counters that changed since last observed.
    pub fn observe_commands(&mut self, commands: ViewCommands, surface: &mut impl RenderSurface) {
        if commands.fit_selection != self.observed.fit_selection {
            self.fit_to_selection(surface);
        }
        if commands.reset_view != self.observed.reset_view {
            surface.set_view(self.config.center, self.config.zoom);
        }
        self.observed = commands;
    }

    /// Fits the viewport to the union of the selected features' bounds.
    ///
    /// Returns `false`, leaving the viewport alone, when no selected
    /// feature has bounds.
    pub fn fit_to_selection(&self, surface: &mut impl RenderSurface) -> bool {
        let selected = self.features.iter().filter(|f| self.is_selected(f));
        let Some(bounds) = union_of(selected) else {
            log::debug!("No selected feature has bounds, not fitting");
            return false;
        };
        surface.fit_bounds(bounds, self.config.fit_padding);
        true
    }
}

fn union_of<'a>(features: impl Iterator<Item = &'a MapFeature>) -> Option<Rect<f64>> {
    features.filter_map(|f| f.bounds).reduce(union_bounds)
}

#[cfg(test)]
mod tests {
    use geo::coord;

    use super::*;
    use crate::surface::{RecordingSurface, Viewport};

    fn feature(i: usize, code: Option<&str>, x: f64) -> MapFeature {
        MapFeature {
            id: FeatureId(i),
            code: code.map(ToString::to_string),
            display_name: Some("Glendale".to_string()),
            bounds: Some(Rect::new(
                coord! { x: x, y: 0.0 },
                coord! { x: x + 1.0, y: 1.0 },
            )),
        }
    }

    fn layer() -> (MapSync, RecordingSurface) {
        let features = vec![
            feature(0, Some("85301"), 0.0),
            feature(1, Some("85302"), 1.0),
            feature(2, Some("85303"), 2.0),
            feature(3, None, 3.0),
        ];
        let surface = RecordingSurface::with_features(features.len());
        (MapSync::new(features, MapViewConfig::default()), surface)
    }

    fn inputs(selected: &[&str]) -> MapInputs {
        MapInputs {
            selection: selected.iter().map(ToString::to_string).collect(),
            ..MapInputs::default()
        }
    }

    const A: FeatureId = FeatureId(0);
    const B: FeatureId = FeatureId(1);
    const C: FeatureId = FeatureId(2);
    const INERT: FeatureId = FeatureId(3);

    #[test]
    fn selected_border_stays_on_top_after_neighbor_hover() {
        let (mut sync, mut surface) = layer();
        sync.apply_inputs(inputs(&["85301"]), &mut surface);

        sync.pointer_enter(B, &mut surface);
        assert_eq!(surface.top(), Some(B));

        sync.pointer_leave(B, &mut surface);
        assert_eq!(surface.top(), Some(A));
        assert!(surface.is_above(A, B));
        assert_eq!(surface.style(A).unwrap().color, "#122426");
        assert_eq!(surface.style(B).unwrap().color, "white");
    }

    #[test]
    fn every_selected_feature_is_raised_after_leave() {
        let (mut sync, mut surface) = layer();
        sync.apply_inputs(inputs(&["85301", "85303"]), &mut surface);

        sync.pointer_enter(B, &mut surface);
        sync.pointer_leave(B, &mut surface);

        assert!(surface.is_above(A, B));
        assert!(surface.is_above(C, B));
    }

    #[test]
    fn hover_applies_overlay_and_tooltip() {
        let (mut sync, mut surface) = layer();
        sync.apply_inputs(inputs(&[]), &mut surface);

        sync.pointer_enter(A, &mut surface);

        let style = surface.style(A).unwrap();
        assert_eq!(style.color, "#1C4953");
        assert!((style.weight - 2.0).abs() < f64::EPSILON);
        assert_eq!(surface.tooltip(), Some((A, "Glendale: 85301")));
        assert_eq!(sync.hovered(), Some(A));

        sync.pointer_leave(A, &mut surface);
        assert_eq!(surface.tooltip(), None);
        assert_eq!(sync.hovered(), None);
        assert_eq!(surface.style(A).unwrap().color, "white");
    }

    #[test]
    fn hovering_a_selected_feature_overlays_selected_style() {
        let (mut sync, mut surface) = layer();
        sync.apply_inputs(inputs(&["85301"]), &mut surface);

        sync.pointer_enter(A, &mut surface);
        let style = surface.style(A).unwrap();
        assert_eq!(style.color, "#1C4953");
        assert!((style.fill_opacity - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn restyle_keeps_hover_overlay_and_stacking() {
        let (mut sync, mut surface) = layer();
        sync.pointer_enter(B, &mut surface);

        sync.apply_inputs(inputs(&["85301"]), &mut surface);

        assert_eq!(surface.style(B).unwrap().color, "#1C4953");
        assert_eq!(surface.top(), Some(B));
        assert!(surface.is_above(A, C));
    }

    #[test]
    fn entering_a_new_feature_leaves_the_old_one() {
        let (mut sync, mut surface) = layer();
        sync.apply_inputs(inputs(&["85303"]), &mut surface);

        sync.pointer_enter(A, &mut surface);
        sync.pointer_enter(B, &mut surface);

        assert_eq!(sync.hovered(), Some(B));
        assert_eq!(surface.style(A).unwrap().color, "white");
        assert_eq!(surface.top(), Some(B));
        assert!(surface.is_above(C, A));
    }

    #[test]
    fn inert_features_ignore_pointer_and_clicks() {
        let (mut sync, mut surface) = layer();
        sync.apply_inputs(inputs(&[]), &mut surface);
        let before = surface.z_order().to_vec();

        sync.pointer_enter(INERT, &mut surface);

        assert_eq!(sync.hovered(), None);
        assert_eq!(surface.z_order(), before.as_slice());
        assert_eq!(sync.click(INERT, ClickModifiers::default()), None);
    }

    #[test]
    fn click_reports_intent() {
        let (sync, _) = layer();
        let intent = sync
            .click(
                B,
                ClickModifiers {
                    ctrl: true,
                    ..ClickModifiers::default()
                },
            )
            .unwrap();

        assert_eq!(intent.code, "85302");
        assert!(intent.multi_select);
    }

    #[test]
    fn fill_follows_active_metric_only() {
        let (mut sync, mut surface) = layer();
        let mut with_values = inputs(&[]);
        with_values.values.insert("85301".to_string(), Some(100.0));
        with_values.values.insert("85302".to_string(), Some(50.0));
        with_values.domain = Some(Domain::new(50.0, 100.0));

        sync.apply_inputs(with_values.clone(), &mut surface);
        assert_eq!(surface.style(A).unwrap().fill_color, "#D0D0D0");

        with_values.active_metric = Some("median_household_income".to_string());
        sync.apply_inputs(with_values, &mut surface);
        assert_eq!(surface.style(A).unwrap().fill_color, "#27AE60");
        assert_eq!(surface.style(B).unwrap().fill_color, "#C0392B");
        assert_eq!(surface.style(C).unwrap().fill_color, "#D0D0D0");
    }

    #[test]
    fn commands_are_edge_triggered() {
        let (mut sync, mut surface) = layer();
        sync.apply_inputs(inputs(&["85302"]), &mut surface);

        let mut commands = ViewCommands::default();
        sync.observe_commands(commands, &mut surface);
        assert_eq!(surface.viewport_requests(), 0);

        commands.fit_selection += 1;
        sync.observe_commands(commands, &mut surface);
        sync.observe_commands(commands, &mut surface);
        assert_eq!(surface.viewport_requests(), 1);
        assert_eq!(
            surface.viewport(),
            Some(&Viewport::Fit {
                bounds: Rect::new(coord! { x: 1.0, y: 0.0 }, coord! { x: 2.0, y: 1.0 }),
                padding: [20, 20],
            })
        );

        commands.reset_view += 1;
        sync.observe_commands(commands, &mut surface);
        assert_eq!(surface.viewport_requests(), 2);
        assert!(matches!(surface.viewport(), Some(Viewport::View { .. })));
    }

    #[test]
    fn fit_with_no_selected_bounds_is_a_no_op() {
        let (mut sync, mut surface) = layer();
        sync.apply_inputs(inputs(&["99999"]), &mut surface);

        assert!(!sync.fit_to_selection(&mut surface));
        assert_eq!(surface.viewport(), None);
    }

    #[test]
    fn fit_covers_union_of_selection() {
        let (mut sync, mut surface) = layer();
        sync.apply_inputs(inputs(&["85301", "85303"]), &mut surface);

        assert!(sync.fit_to_selection(&mut surface));
        let Some(Viewport::Fit { bounds, .. }) = surface.viewport() else {
            panic!("expected a fit");
        };
        assert_eq!(bounds.min(), coord! { x: 0.0, y: 0.0 });
        assert_eq!(bounds.max(), coord! { x: 3.0, y: 1.0 });
    }

    #[test]
    fn initial_view_fits_all_or_uses_center() {
        let (sync, mut surface) = layer();
        sync.initial_view(&mut surface);
        assert!(matches!(surface.viewport(), Some(Viewport::Fit { .. })));

        let config = MapViewConfig {
            fit_initial_bounds: false,
            ..MapViewConfig::default()
        };
        let sync = MapSync::new(sync.features().to_vec(), config);
        let mut surface = RecordingSurface::default();
        sync.initial_view(&mut surface);
        assert!(matches!(
            surface.viewport(),
            Some(Viewport::View { zoom, .. }) if (*zoom - 9.0).abs() < f64::EPSILON
        ));
    }
}
