//! Per-feature style computation.

use std::collections::BTreeSet;

use regionscope_metrics_models::Domain;
use serde::{Deserialize, Serialize};

use crate::config::MapViewConfig;

/// Stroke and fill settings every feature starts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseStyle {
    pub weight: f64,
    pub opacity: f64,
    pub color: String,
    pub fill_opacity: f64,
}

/// A partial style layered on top of another (selected, hovered).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleOverlay {
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub opacity: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub fill_opacity: Option<f64>,
}

/// The complete style of one rendered feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureStyle {
    /// Palette color for the feature's choropleth class.
    pub fill_color: String,
    pub weight: f64,
    pub opacity: f64,
    pub color: String,
    pub fill_opacity: f64,
}

impl FeatureStyle {
    /// Returns this style with `overlay`'s fields taking precedence.
    #[must_use]
    pub fn merged(mut self, overlay: &StyleOverlay) -> Self {
        if let Some(weight) = overlay.weight {
            self.weight = weight;
        }
        if let Some(opacity) = overlay.opacity {
            self.opacity = opacity;
        }
        if let Some(color) = &overlay.color {
            self.color.clone_from(color);
        }
        if let Some(fill_opacity) = overlay.fill_opacity {
            self.fill_opacity = fill_opacity;
        }
        self
    }
}

/// Computes a feature's resting style (no hover).
///
/// The fill comes from the palette class of `value` against `domain`; a
/// feature whose region code is selected gets the selected overlay. A
/// feature with no region code is never selected.
#[must_use]
pub fn compute_style(
    code: Option<&str>,
    selection: &BTreeSet<String>,
    value: Option<f64>,
    domain: Option<Domain>,
    config: &MapViewConfig,
) -> FeatureStyle {
    let base = &config.base_style;
    let style = FeatureStyle {
        fill_color: config.palette.color_for(value, domain).to_string(),
        weight: base.weight,
        opacity: base.opacity,
        color: base.color.clone(),
        fill_opacity: base.fill_opacity,
    };

    if code.is_some_and(|code| selection.contains(code)) {
        style.merged(&config.selected_style)
    } else {
        style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selection(codes: &[&str]) -> BTreeSet<String> {
        codes.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn unselected_feature_uses_base_style() {
        let config = MapViewConfig::default();
        let style = compute_style(Some("85301"), &selection(&[]), None, None, &config);

        assert_eq!(style.fill_color, "#D0D0D0");
        assert_eq!(style.color, "white");
        assert!((style.weight - 1.0).abs() < f64::EPSILON);
        assert!((style.fill_opacity - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn selected_feature_gets_selected_overlay() {
        let config = MapViewConfig::default();
        let style = compute_style(
            Some("85301"),
            &selection(&["85301"]),
            Some(10.0),
            Some(Domain::new(0.0, 10.0)),
            &config,
        );

        assert_eq!(style.fill_color, "#27AE60");
        assert_eq!(style.color, "#122426");
        assert!((style.weight - 3.0).abs() < f64::EPSILON);
        assert!((style.opacity - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn codeless_feature_is_never_selected() {
        let config = MapViewConfig::default();
        let style = compute_style(None, &selection(&["85301"]), None, None, &config);
        assert_eq!(style.color, "white");
    }

    #[test]
    fn overlay_only_replaces_present_fields() {
        let config = MapViewConfig::default();
        let base = compute_style(Some("85301"), &selection(&[]), None, None, &config);
        let hovered = base.clone().merged(&config.hover_style);

        assert_eq!(hovered.fill_color, base.fill_color);
        assert!((hovered.opacity - base.opacity).abs() < f64::EPSILON);
        assert_eq!(hovered.color, "#1C4953");
        assert!((hovered.weight - 2.0).abs() < f64::EPSILON);
    }
}
