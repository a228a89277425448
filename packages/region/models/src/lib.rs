#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Regional statistical snapshot types.
//!
//! A [`Region`] is an immutable snapshot of one geographic unit's
//! statistics (demographics, education, economics, labor force, housing,
//! commuting). Scalar statistics are `Option<f64>` because upstream
//! estimates are frequently suppressed; a `NaN` value is treated exactly
//! like absence everywhere in the workspace (see [`numeric`]).
//!
//! Categorical breakdowns are ordered `(label, value)` lists. Every
//! breakdown is a percentage of the region's population except
//! [`Education::school_enrollment`], which holds absolute head counts.

use serde::{Deserialize, Serialize};

/// Region code carried by a composite built from several regions.
pub const COMPOSITE_CODE: &str = "Multiple";

/// Group name carried by a composite built from several regions.
pub const COMPOSITE_GROUP: &str = "Multiple Regions";

/// Returns the value only if it is present and finite.
///
/// `NaN` and the infinities are "not plottable" and collapse to `None`.
#[must_use]
pub fn numeric(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// One labeled share within a categorical breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryShare {
    /// Category label (e.g. "Construction", "20-39").
    pub name: String,
    /// Percentage of the region's population, or an absolute count for
    /// school enrollment.
    pub value: f64,
}

impl CategoryShare {
    /// Creates a new share.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Looks up the value for `name` in a breakdown.
#[must_use]
pub fn find_share(shares: &[CategoryShare], name: &str) -> Option<f64> {
    shares.iter().find(|s| s.name == name).map(|s| s.value)
}

/// Population and composition statistics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Demographics {
    /// Total population. A region with population 0 carries no weight.
    #[serde(default)]
    pub population: u64,
    /// Percent change against the previous five-year estimate.
    pub population_growth: Option<f64>,
    /// Median age in years.
    pub median_age: Option<f64>,
    /// Share of population by gender.
    #[serde(default)]
    pub gender_distribution: Vec<CategoryShare>,
    /// Share of population by age band.
    #[serde(default)]
    pub age_distribution: Vec<CategoryShare>,
    /// Share of population by race/ethnicity.
    #[serde(default)]
    pub race_ethnicity: Vec<CategoryShare>,
    /// Percent of population born outside the country.
    pub foreign_born_share: Option<f64>,
}

/// Educational attainment and enrollment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    /// Percent with a high school diploma or higher.
    pub hs_graduation_rate: Option<f64>,
    /// Percent with a bachelor's degree or higher.
    pub college_graduation_rate: Option<f64>,
    /// Enrolled students per school level. Absolute counts, not percentages.
    #[serde(default)]
    pub school_enrollment: Vec<CategoryShare>,
}

/// Income and poverty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Economics {
    /// Median household income in dollars.
    pub median_household_income: Option<f64>,
    /// Per-capita income in dollars.
    pub per_capita_income: Option<f64>,
    /// Percent of people below the poverty level.
    pub poverty_rate: Option<f64>,
}

/// Labor force participation and occupations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborForce {
    /// Percent of the working-age population in the labor force.
    pub labor_force_participation_rate: Option<f64>,
    /// Percent of the labor force unemployed.
    pub unemployment_rate: Option<f64>,
    /// Share of employed population by occupation.
    #[serde(default)]
    pub occupation_mix: Vec<CategoryShare>,
}

/// Housing stock and costs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Housing {
    /// Median owner-occupied home value in dollars.
    pub median_home_value: Option<f64>,
    /// Percent of occupied units that are owner-occupied.
    pub owner_occupied_rate: Option<f64>,
    /// Median gross rent in dollars.
    pub median_gross_rent: Option<f64>,
    /// Percent of renters paying more than 35% of income on rent.
    pub rent_cost_burden_rate: Option<f64>,
    /// Median home value divided by median household income.
    pub price_to_income_ratio: Option<f64>,
    /// Share of housing units by construction era.
    #[serde(default)]
    pub year_structure_built: Vec<CategoryShare>,
}

/// Commuting behavior.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Commuting {
    /// Mean one-way travel time to work in minutes.
    pub mean_travel_time_to_work: Option<f64>,
    /// Share of workers by commute mode.
    #[serde(default)]
    pub mode_share: Vec<CategoryShare>,
}

/// Full statistical snapshot of one region, or a composite of several.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    /// Unique region code (e.g. a ZIP code tabulation area).
    #[serde(default)]
    pub code: String,
    /// Human-readable group name (e.g. the city the region belongs to).
    #[serde(default)]
    pub group: String,
    /// Population and composition.
    #[serde(default)]
    pub demographics: Demographics,
    /// Attainment and enrollment.
    #[serde(default)]
    pub education: Education,
    /// Income and poverty.
    #[serde(default)]
    pub economics: Economics,
    /// Labor force.
    #[serde(default)]
    pub labor_force: LaborForce,
    /// Share of employed population by industry.
    #[serde(default)]
    pub employment_by_industry: Vec<CategoryShare>,
    /// Housing.
    #[serde(default)]
    pub housing: Housing,
    /// Commuting.
    #[serde(default)]
    pub commuting: Commuting,
}

impl Region {
    /// Creates an otherwise empty region with the given identity.
    #[must_use]
    pub fn new(code: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            group: group.into(),
            ..Self::default()
        }
    }

    /// Total population of this region.
    #[must_use]
    pub const fn population(&self) -> u64 {
        self.demographics.population
    }

    /// Population as a floating-point weight for weighted statistics.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn population_weight(&self) -> f64 {
        self.demographics.population as f64
    }

    /// Whether this region is a synthesized composite rather than a
    /// source record.
    #[must_use]
    pub fn is_composite(&self) -> bool {
        self.code == COMPOSITE_CODE && self.group == COMPOSITE_GROUP
    }
}
