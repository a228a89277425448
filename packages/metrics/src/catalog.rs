//! The process-wide metric catalog.
//!
//! Descriptors are declared once, in display order, and never change.
//! Family members (one descriptor per industry, one per school level) are
//! generated from the fixed category lists in [`crate::extract`].

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regionscope_metrics_models::{MetricFormat, MetricGroup};
use regionscope_region_models::Region;

use crate::MetricError;
use crate::extract::{
    ENROLLMENT_FAMILY, ENROLLMENT_LEVELS, Extractor, INDUSTRIES, INDUSTRY_FAMILY,
    family_metric_id,
};

static STANDARD: LazyLock<MetricCatalog> = LazyLock::new(MetricCatalog::standard);

/// A single registered metric.
#[derive(Debug, Clone)]
pub struct MetricDescriptor {
    /// Unique, stable metric id.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Group used by metric pickers.
    pub group: MetricGroup,
    /// Display formatting.
    pub format: MetricFormat,
    /// Value extraction.
    pub extractor: Extractor,
}

impl MetricDescriptor {
    /// Reads this metric's value from `region`.
    #[must_use]
    pub fn extract(&self, region: &Region) -> Option<f64> {
        self.extractor.extract(region)
    }

    /// Formats a value of this metric for display.
    #[must_use]
    pub fn format_value(&self, value: Option<f64>) -> String {
        self.format.format_value(value)
    }
}

/// Ordered, immutable table of metric descriptors.
#[derive(Debug, Clone)]
pub struct MetricCatalog {
    descriptors: Vec<MetricDescriptor>,
    by_id: BTreeMap<String, usize>,
}

impl MetricCatalog {
    /// Builds a catalog from descriptors in declaration order.
    ///
    /// Later duplicates of an id are dropped with a warning.
    #[must_use]
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = MetricDescriptor>) -> Self {
        let mut catalog = Self {
            descriptors: Vec::new(),
            by_id: BTreeMap::new(),
        };

        for descriptor in descriptors {
            if catalog.by_id.contains_key(&descriptor.id) {
                log::warn!("Ignoring duplicate metric id {}", descriptor.id);
                continue;
            }
            catalog
                .by_id
                .insert(descriptor.id.clone(), catalog.descriptors.len());
            catalog.descriptors.push(descriptor);
        }

        catalog
    }

    /// Builds the standard catalog of regional indicators.
    #[must_use]
    pub fn standard() -> Self {
        let catalog = Self::from_descriptors(
            base_descriptors()
                .into_iter()
                .chain(enrollment_descriptors())
                .chain(industry_descriptors()),
        );
        log::debug!("Built metric catalog with {} metrics", catalog.len());
        catalog
    }

    /// The shared standard catalog, built on first use.
    #[must_use]
    pub fn global() -> &'static Self {
        &STANDARD
    }

    /// Looks up a descriptor by id.
    ///
    /// # Errors
    ///
    /// Returns [`MetricError::NotFound`] if no metric with `id` is
    /// registered.
    pub fn describe(&self, id: &str) -> Result<&MetricDescriptor, MetricError> {
        self.get(id).ok_or_else(|| MetricError::NotFound { id: id.to_string() })
    }

    /// Looks up a descriptor by id, `None` if unregistered.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&MetricDescriptor> {
        self.by_id.get(id).map(|&idx| &self.descriptors[idx])
    }

    /// Whether `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// All descriptors in declaration order.
    #[must_use]
    pub fn all(&self) -> &[MetricDescriptor] {
        &self.descriptors
    }

    /// Descriptors belonging to `group`, in declaration order.
    pub fn in_group(&self, group: MetricGroup) -> impl Iterator<Item = &MetricDescriptor> {
        self.descriptors.iter().filter(move |d| d.group == group)
    }

    /// Number of registered metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

fn field(
    id: &str,
    label: &str,
    group: MetricGroup,
    format: MetricFormat,
    read: fn(&Region) -> Option<f64>,
) -> MetricDescriptor {
    MetricDescriptor {
        id: id.to_string(),
        label: label.to_string(),
        group,
        format,
        extractor: Extractor::Field(read),
    }
}

#[allow(clippy::too_many_lines)]
fn base_descriptors() -> Vec<MetricDescriptor> {
    use MetricFormat::{Count, Currency, Percent};
    use MetricGroup::{Demographics, EconomicsLabor, Education, HousingCommuting};

    vec![
        field("population", "Population", Demographics, Count, |r| {
            Some(r.population_weight())
        }),
        field(
            "population_growth",
            "Population Growth (%)",
            Demographics,
            Percent,
            |r| r.demographics.population_growth,
        ),
        field("median_age", "Median Age", Demographics, Count, |r| {
            r.demographics.median_age
        }),
        field(
            "foreign_born_share",
            "Foreign-Born Share (%)",
            Demographics,
            Percent,
            |r| r.demographics.foreign_born_share,
        ),
        field(
            "median_household_income",
            "Median Household Income",
            EconomicsLabor,
            Currency,
            |r| r.economics.median_household_income,
        ),
        field(
            "per_capita_income",
            "Per Capita Income",
            EconomicsLabor,
            Currency,
            |r| r.economics.per_capita_income,
        ),
        field(
            "poverty_rate",
            "Poverty Rate (%)",
            EconomicsLabor,
            Percent,
            |r| r.economics.poverty_rate,
        ),
        field(
            "labor_force_participation_rate",
            "Labor Force Participation (%)",
            EconomicsLabor,
            Percent,
            |r| r.labor_force.labor_force_participation_rate,
        ),
        field(
            "unemployment_rate",
            "Unemployment Rate (%)",
            EconomicsLabor,
            Percent,
            |r| r.labor_force.unemployment_rate,
        ),
        field(
            "median_home_value",
            "Median Home Value",
            HousingCommuting,
            Currency,
            |r| r.housing.median_home_value,
        ),
        field(
            "owner_occupied_rate",
            "Owner-Occupied Housing Rate (%)",
            HousingCommuting,
            Percent,
            |r| r.housing.owner_occupied_rate,
        ),
        field(
            "median_gross_rent",
            "Median Gross Rent",
            HousingCommuting,
            Currency,
            |r| r.housing.median_gross_rent,
        ),
        field(
            "rent_cost_burden_rate",
            "Rent Cost Burden (>35%)",
            HousingCommuting,
            Percent,
            |r| r.housing.rent_cost_burden_rate,
        ),
        field(
            "price_to_income_ratio",
            "Price-to-Income Ratio",
            HousingCommuting,
            Count,
            |r| r.housing.price_to_income_ratio,
        ),
        field(
            "mean_travel_time_to_work",
            "Mean Travel Time to Work (min)",
            HousingCommuting,
            Count,
            |r| r.commuting.mean_travel_time_to_work,
        ),
        field(
            "hs_graduation_rate",
            "High School Graduation Rate (%)",
            Education,
            Percent,
            |r| r.education.hs_graduation_rate,
        ),
        field(
            "college_graduation_rate",
            "Bachelor's Degree or Higher (%)",
            Education,
            Percent,
            |r| r.education.college_graduation_rate,
        ),
    ]
}

fn enrollment_descriptors() -> impl Iterator<Item = MetricDescriptor> {
    ENROLLMENT_LEVELS.iter().map(|&level| MetricDescriptor {
        id: family_metric_id(ENROLLMENT_FAMILY, level),
        label: format!("Enrolled: {level} (% of Pop)"),
        group: MetricGroup::Education,
        format: MetricFormat::Percent,
        extractor: Extractor::EnrollmentShare(level),
    })
}

fn industry_descriptors() -> impl Iterator<Item = MetricDescriptor> {
    INDUSTRIES.iter().map(|&industry| MetricDescriptor {
        id: family_metric_id(INDUSTRY_FAMILY, industry),
        label: format!("Employment: {industry} (%)"),
        group: MetricGroup::EconomicsLabor,
        format: MetricFormat::Percent,
        extractor: Extractor::IndustryShare(industry),
    })
}
