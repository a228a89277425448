//! Binding rendered `GeoJSON` features to region codes.

use geo::{BoundingRect, Rect};
use geojson::{Feature, FeatureCollection, GeoJson, JsonObject, JsonValue};

use crate::MapSyncError;
use crate::config::MapViewConfig;

/// Position of a feature within its layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FeatureId(pub usize);

/// One rendered polygon and the region it represents.
#[derive(Debug, Clone, PartialEq)]
pub struct MapFeature {
    /// Position within the layer.
    pub id: FeatureId,
    /// Region code, or `None` if no configured key was present. Features
    /// without a code are drawn but never styled as selected, hovered, or
    /// clicked.
    pub code: Option<String>,
    /// Human-readable name from the configured name key.
    pub display_name: Option<String>,
    /// Bounding box of the geometry, if it has one.
    pub bounds: Option<Rect<f64>>,
}

impl MapFeature {
    /// Binds a `GeoJSON` feature using the configured property keys.
    #[must_use]
    pub fn from_geojson(id: FeatureId, feature: &Feature, config: &MapViewConfig) -> Self {
        let properties = feature.properties.as_ref();
        let code = properties.and_then(|p| resolve_region_code(p, &config.code_keys));
        if code.is_none() {
            log::debug!("Feature {} has no region code, leaving it inert", id.0);
        }

        Self {
            id,
            code,
            display_name: properties
                .and_then(|p| p.get(&config.display_name_key))
                .and_then(property_text),
            bounds: feature.geometry.as_ref().and_then(geometry_bounds),
        }
    }

    /// Whether the feature reacts to hover and click.
    #[must_use]
    pub const fn is_interactive(&self) -> bool {
        self.code.is_some()
    }

    /// Tooltip text: `"<name>: <code>"`, or just the code without a name.
    #[must_use]
    pub fn tooltip(&self) -> Option<String> {
        let code = self.code.as_deref()?;
        Some(match &self.display_name {
            Some(name) => format!("{name}: {code}"),
            None => code.to_string(),
        })
    }
}

/// Reads the region code from the first configured key holding a usable
/// value.
///
/// Empty strings, zero, `null`, and non-scalar values are skipped, so a
/// later key is tried instead.
#[must_use]
pub fn resolve_region_code(properties: &JsonObject, keys: &[String]) -> Option<String> {
    keys.iter()
        .filter_map(|key| properties.get(key))
        .find_map(property_text)
}

fn property_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        JsonValue::Number(n) if n.as_f64().is_some_and(|v| v != 0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn geometry_bounds(geometry: &geojson::Geometry) -> Option<Rect<f64>> {
    let geometry: geo::Geometry<f64> = geometry.clone().try_into().ok()?;
    geometry.bounding_rect()
}

/// Binds every feature of a collection, numbering them in order.
#[must_use]
pub fn features_from_collection(
    collection: &FeatureCollection,
    config: &MapViewConfig,
) -> Vec<MapFeature> {
    let features: Vec<MapFeature> = collection
        .features
        .iter()
        .enumerate()
        .map(|(i, feature)| MapFeature::from_geojson(FeatureId(i), feature, config))
        .collect();

    log::debug!(
        "Bound {} of {} features to region codes",
        features.iter().filter(|f| f.is_interactive()).count(),
        features.len()
    );

    features
}

/// Parses a `GeoJSON` document and binds its features.
///
/// A bare feature is treated as a one-feature collection; a bare geometry
/// yields no features.
///
/// # Errors
///
/// Returns [`MapSyncError::GeoJson`] if the document is not valid `GeoJSON`.
pub fn parse_features(
    geojson_str: &str,
    config: &MapViewConfig,
) -> Result<Vec<MapFeature>, MapSyncError> {
    let collection = match geojson_str.parse::<GeoJson>()? {
        GeoJson::FeatureCollection(collection) => collection,
        GeoJson::Feature(feature) => FeatureCollection {
            bbox: None,
            features: vec![feature],
            foreign_members: None,
        },
        GeoJson::Geometry(_) => {
            log::warn!("GeoJSON document is a bare geometry, no features to bind");
            return Ok(Vec::new());
        }
    };
    Ok(features_from_collection(&collection, config))
}

/// Smallest rectangle containing both `a` and `b`.
#[must_use]
pub fn union_bounds(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        geo::coord! { x: a.min().x.min(b.min().x), y: a.min().y.min(b.min().y) },
        geo::coord! { x: a.max().x.max(b.max().x), y: a.max().y.max(b.max().y) },
    )
}
