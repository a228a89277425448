//! The rendering seam.
//!
//! A [`RenderSurface`] is whatever actually draws the region layer. All
//! calls happen on the thread that owns the surface, one event at a time.

use std::collections::BTreeMap;

use geo::Rect;

use crate::config::LatLng;
use crate::feature::FeatureId;
use crate::style::FeatureStyle;

/// Operations [`MapSync`](crate::MapSync) needs from a map widget.
pub trait RenderSurface {
    /// Replaces a feature's style.
    fn set_style(&mut self, feature: FeatureId, style: &FeatureStyle);

    /// Draws a feature above every other feature.
    fn bring_to_front(&mut self, feature: FeatureId);

    /// Shows `text` as the feature's sticky tooltip.
    fn open_tooltip(&mut self, feature: FeatureId, text: &str);

    /// Hides the feature's tooltip.
    fn close_tooltip(&mut self, feature: FeatureId);

    /// Moves the viewport to show `bounds`, inset by `padding` pixels.
    fn fit_bounds(&mut self, bounds: Rect<f64>, padding: [u32; 2]);

    /// Moves the viewport to a center and zoom.
    fn set_view(&mut self, center: LatLng, zoom: f64);
}

/// The last viewport request a [`RecordingSurface`] received.
#[derive(Debug, Clone, PartialEq)]
pub enum Viewport {
    /// Fit to bounds with pixel padding.
    Fit { bounds: Rect<f64>, padding: [u32; 2] },
    /// Explicit center and zoom.
    View { center: LatLng, zoom: f64 },
}

/// An in-memory surface that records what it was asked to draw.
///
/// Useful for headless rendering and for asserting draw order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    styles: BTreeMap<FeatureId, FeatureStyle>,
    z_order: Vec<FeatureId>,
    tooltip: Option<(FeatureId, String)>,
    viewport: Option<Viewport>,
    viewport_requests: usize,
}

impl RecordingSurface {
    /// Creates a surface with features stacked in id order.
    #[must_use]
    pub fn with_features(count: usize) -> Self {
        Self {
            z_order: (0..count).map(FeatureId).collect(),
            ..Self::default()
        }
    }

    /// The last style set on a feature.
    #[must_use]
    pub fn style(&self, feature: FeatureId) -> Option<&FeatureStyle> {
        self.styles.get(&feature)
    }

    /// Features from bottom to top.
    #[must_use]
    pub fn z_order(&self) -> &[FeatureId] {
        &self.z_order
    }

    /// The topmost feature.
    #[must_use]
    pub fn top(&self) -> Option<FeatureId> {
        self.z_order.last().copied()
    }

    /// Whether `above` is drawn over `below`.
    #[must_use]
    pub fn is_above(&self, above: FeatureId, below: FeatureId) -> bool {
        let position = |id| self.z_order.iter().position(|&f| f == id);
        matches!((position(above), position(below)), (Some(a), Some(b)) if a > b)
    }

    /// The open tooltip, if any.
    #[must_use]
    pub fn tooltip(&self) -> Option<(FeatureId, &str)> {
        self.tooltip.as_ref().map(|(id, text)| (*id, text.as_str()))
    }

    /// The last viewport request.
    #[must_use]
    pub const fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// How many viewport changes were requested in total.
    #[must_use]
    pub const fn viewport_requests(&self) -> usize {
        self.viewport_requests
    }
}

impl RenderSurface for RecordingSurface {
    fn set_style(&mut self, feature: FeatureId, style: &FeatureStyle) {
        self.styles.insert(feature, style.clone());
    }

    fn bring_to_front(&mut self, feature: FeatureId) {
        self.z_order.retain(|&f| f != feature);
        self.z_order.push(feature);
    }

    fn open_tooltip(&mut self, feature: FeatureId, text: &str) {
        self.tooltip = Some((feature, text.to_string()));
    }

    fn close_tooltip(&mut self, feature: FeatureId) {
        if self.tooltip.as_ref().is_some_and(|(id, _)| *id == feature) {
            self.tooltip = None;
        }
    }

    fn fit_bounds(&mut self, bounds: Rect<f64>, padding: [u32; 2]) {
        self.viewport = Some(Viewport::Fit { bounds, padding });
        self.viewport_requests += 1;
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.viewport = Some(Viewport::View { center, zoom });
        self.viewport_requests += 1;
    }
}
