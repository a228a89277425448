#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Metric descriptor enumerations and per-region metric results.
//!
//! These are the plain data types shared between the metric catalog, the
//! choropleth bucketer, and the map synchronization layer. None of them
//! carry behavior beyond formatting and lookups.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Fixed grouping of metrics, used by metric pickers and selection
/// summaries.
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
pub enum MetricGroup {
    /// Population, age, and origin.
    #[strum(serialize = "Demographics")]
    Demographics,
    /// Income, poverty, labor force, and industries.
    #[strum(serialize = "Economics & Labor")]
    EconomicsLabor,
    /// Housing costs, tenure, and commuting.
    #[strum(serialize = "Housing & Commuting")]
    HousingCommuting,
    /// Attainment and enrollment.
    #[strum(serialize = "Education")]
    Education,
}

impl MetricGroup {
    /// Returns all variants in display order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Demographics,
            Self::EconomicsLabor,
            Self::HousingCommuting,
            Self::Education,
        ]
    }
}

/// How a metric value is rendered for display.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MetricFormat {
    /// Dollar amounts, rounded to whole dollars.
    Currency,
    /// Percentages with one decimal place.
    Percent,
    /// Plain counts or levels with at most one decimal place.
    Count,
}

impl MetricFormat {
    /// Formats a metric value for display.
    ///
    /// Absent and non-finite values render as `"N/A"`.
    #[must_use]
    pub fn format_value(self, value: Option<f64>) -> String {
        let Some(value) = value.filter(|v| v.is_finite()) else {
            return "N/A".to_string();
        };

        match self {
            Self::Currency => format!("${}", with_thousands(value, 0)),
            Self::Percent => format!("{value:.1}%"),
            Self::Count => with_thousands(value, 1),
        }
    }
}

/// Renders `value` with `,` thousands separators and at most `decimals`
/// fractional digits (trailing zeros dropped).
fn with_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + 4);
    let negative = value < 0.0 && (int_part.bytes().any(|b| b != b'0') || !frac_part.is_empty());
    if negative {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Normalization range for one metric across a region set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    /// Smallest numeric value observed.
    pub min: f64,
    /// Largest numeric value observed.
    pub max: f64,
}

impl Domain {
    /// Creates a domain from explicit bounds.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether the domain collapses to a single value (or is inverted).
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }
}

/// Values of one metric across a region set, plus their domain.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricResult {
    /// Region code -> numeric value, or `None` when not computable.
    pub values_by_region: BTreeMap<String, Option<f64>>,
    /// `[min, max]` over the numeric values; `None` if there are none.
    pub domain: Option<Domain>,
}

impl MetricResult {
    /// Value for a region, `None` when absent or not computable.
    #[must_use]
    pub fn value_for(&self, code: &str) -> Option<f64> {
        self.values_by_region.get(code).copied().flatten()
    }
}
