#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Choropleth color bucketing.
//!
//! Maps a metric value and its normalization [`Domain`] to one of six
//! discrete [`ColorClass`]es: class 0 means "no data", classes 1 through 5
//! run from low to high. A value of exactly `0` is treated as no data.

use regionscope_metrics_models::Domain;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Number of non-empty classes a normalized value is bucketed into.
const BUCKETS: f64 = 5.0;

/// One of the six discrete fill classes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ColorClass {
    /// Absent, non-numeric, or zero value.
    NoData,
    /// Lowest fifth of the domain.
    VeryLow,
    Low,
    /// Middle fifth, also used for single-value domains.
    Medium,
    High,
    /// Highest fifth of the domain.
    VeryHigh,
}

impl ColorClass {
    /// All classes in index order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::NoData,
            Self::VeryLow,
            Self::Low,
            Self::Medium,
            Self::High,
            Self::VeryHigh,
        ]
    }

    /// Class index, 0 (no data) through 5 (highest).
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    const fn from_bucket(bucket: u8) -> Self {
        match bucket {
            0 => Self::NoData,
            1 => Self::VeryLow,
            2 => Self::Low,
            3 => Self::Medium,
            4 => Self::High,
            _ => Self::VeryHigh,
        }
    }
}

/// Buckets `value` against `domain`.
///
/// Rules, applied in order:
///
/// 1. no value, a `NaN` value, or no domain: [`ColorClass::NoData`]
/// 2. a value of exactly `0`: [`ColorClass::NoData`]
/// 3. a degenerate domain (`max <= min`): [`ColorClass::Medium`]
/// 4. otherwise `t = (value - min) / (max - min)` clamped to `[0, 1]`,
///    bucketed as `ceil(t * 5)` clamped to `[1, 5]`
///
/// A domain with a non-finite bound is treated as no domain.
#[must_use]
pub fn color_for(value: Option<f64>, domain: Option<Domain>) -> ColorClass {
    let Some(value) = value.filter(|v| !v.is_nan()) else {
        return ColorClass::NoData;
    };
    let Some(domain) = domain.filter(|d| d.min.is_finite() && d.max.is_finite()) else {
        return ColorClass::NoData;
    };

    if value == 0.0 {
        return ColorClass::NoData;
    }
    if domain.is_degenerate() {
        return ColorClass::Medium;
    }

    let t = normalized(value, domain).clamp(0.0, 1.0);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let bucket = (t * BUCKETS).ceil().clamp(1.0, BUCKETS) as u8;

    ColorClass::from_bucket(bucket)
}

/// Position of `value` within a non-degenerate, finite `domain`.
///
/// A span wider than `f64::MAX` is normalized on halved operands so it
/// stays finite.
fn normalized(value: f64, domain: Domain) -> f64 {
    let span = domain.max - domain.min;
    if span.is_finite() {
        (value - domain.min) / span
    } else {
        (value / 2.0 - domain.min / 2.0) / (domain.max / 2.0 - domain.min / 2.0)
    }
}

/// Fill colors for each [`ColorClass`], as CSS color strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Palette {
    colors: [String; 6],
}

impl Palette {
    /// Creates a palette from six colors in class order.
    #[must_use]
    pub const fn new(colors: [String; 6]) -> Self {
        Self { colors }
    }

    /// Fill color for `class`.
    #[must_use]
    pub fn color(&self, class: ColorClass) -> &str {
        &self.colors[class.index()]
    }

    /// Fill color for a value against a domain.
    #[must_use]
    pub fn color_for(&self, value: Option<f64>, domain: Option<Domain>) -> &str {
        self.color(color_for(value, domain))
    }
}

impl Default for Palette {
    /// Gray for no data, then red through green.
    fn default() -> Self {
        Self::new(
            ["#D0D0D0", "#C0392B", "#E67E22", "#F1C40F", "#82E0AA", "#27AE60"]
                .map(str::to_string),
        )
    }
}
