//! Pure extraction functions from a [`Region`] to a single number.
//!
//! Every extractor is total over a well-formed region: missing data
//! yields `None`, and undefined arithmetic (a zero denominator) yields
//! `Some(0.0)`. Callers treat `NaN` exactly like `None`.

use regionscope_region_models::{Region, find_share};

/// Family name for the per-industry employment share metrics.
pub const INDUSTRY_FAMILY: &str = "employment_by_industry";

/// Family name for the per-level school enrollment metrics.
pub const ENROLLMENT_FAMILY: &str = "school_enrollment";

/// Industry categories reported in `employment_by_industry`.
pub const INDUSTRIES: &[&str] = &[
    "Agri/Mining",
    "Construction",
    "Manufacturing",
    "Wholesale Trade",
    "Retail Trade",
    "Transport/Warehouse",
    "Information",
    "Finance/Ins/RE",
    "Prof/Sci/Mgmt",
    "Edu/Health/Social",
    "Arts/Ent/Food",
    "Other Services",
    "Public Admin",
];

/// School levels reported in `school_enrollment`.
pub const ENROLLMENT_LEVELS: &[&str] = &[
    "Preschool",
    "Kindergarten",
    "Grade 1-8",
    "High School",
    "College/Grad",
];

/// Builds the id of a parameterized family member.
///
/// The same `(family, category)` pair always yields the same id.
#[must_use]
pub fn family_metric_id(family: &str, category: &str) -> String {
    format!("{family}:{category}")
}

/// How a metric's value is read from a region.
#[derive(Debug, Clone, Copy)]
pub enum Extractor {
    /// A field read directly from the region.
    Field(fn(&Region) -> Option<f64>),
    /// Percent share of the named industry. A region that does not report
    /// the industry has a share of 0.
    IndustryShare(&'static str),
    /// Enrollment count of the named school level as a percent of total
    /// population. 0 when the population is 0.
    EnrollmentShare(&'static str),
}

impl Extractor {
    /// Reads this metric's value from `region`.
    #[must_use]
    pub fn extract(&self, region: &Region) -> Option<f64> {
        match self {
            Self::Field(read) => read(region),
            Self::IndustryShare(industry) => Some(
                find_share(&region.employment_by_industry, industry).unwrap_or(0.0),
            ),
            Self::EnrollmentShare(level) => {
                if region.population() == 0 {
                    return Some(0.0);
                }
                let enrolled = find_share(&region.education.school_enrollment, level)
                    .unwrap_or(0.0);
                Some(enrolled / region.population_weight() * 100.0)
            }
        }
    }

    /// The `(family, category)` this extractor belongs to, if it is a
    /// family member.
    #[must_use]
    pub const fn family(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Self::Field(_) => None,
            Self::IndustryShare(industry) => Some((INDUSTRY_FAMILY, *industry)),
            Self::EnrollmentShare(level) => Some((ENROLLMENT_FAMILY, *level)),
        }
    }
}
