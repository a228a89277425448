#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Composite region construction.
//!
//! [`combine`] merges a list of regions into one synthetic region:
//!
//! * scalar rates and levels become population-weighted averages over the
//!   regions that report them
//! * percentage breakdowns are converted back to head counts, summed per
//!   label, and re-expressed against the combined population
//! * school enrollment, which is already a head count, is summed per label
//! * ratios are recomputed from the aggregated numerator and denominator

use std::collections::BTreeMap;

use regionscope_region_models::{
    COMPOSITE_CODE, COMPOSITE_GROUP, CategoryShare, Commuting, Demographics, Economics, Education,
    Housing, LaborForce, Region, numeric,
};

/// Combines `regions` into a single composite region.
///
/// Returns `None` for an empty list. A single region is returned as-is.
/// When every region reports zero population there is nothing to weight
/// by, and the first region is returned unchanged.
#[must_use]
pub fn combine(regions: &[Region]) -> Option<Region> {
    let (first, rest) = regions.split_first()?;
    if rest.is_empty() {
        return Some(first.clone());
    }

    let total_population: u64 = regions.iter().map(Region::population).sum();
    if total_population == 0 {
        log::debug!(
            "All {} regions report zero population, using {} as the composite",
            regions.len(),
            first.code
        );
        return Some(first.clone());
    }

    log::trace!(
        "Combining {} regions with total population {total_population}",
        regions.len()
    );

    Some(Combiner {
        regions,
        total_population,
    }
    .composite())
}

struct Combiner<'a> {
    regions: &'a [Region],
    total_population: u64,
}

impl Combiner<'_> {
    #[allow(clippy::cast_precision_loss)]
    const fn total_weight(&self) -> f64 {
        self.total_population as f64
    }

    /// Population-weighted mean over the regions with a numeric value.
    ///
    /// Yields `0` when no region with nonzero population reports the field.
    fn weighted(&self, read: impl Fn(&Region) -> Option<f64>) -> Option<f64> {
        let (sum, weight) = self
            .regions
            .iter()
            .filter_map(|r| numeric(read(r)).map(|v| (v, r.population_weight())))
            .fold((0.0, 0.0), |(sum, weight), (v, w)| (v.mul_add(w, sum), weight + w));

        Some(if weight > 0.0 { sum / weight } else { 0.0 })
    }

    /// Recombines a percentage-of-population breakdown.
    fn categorical(&self, read: impl Fn(&Region) -> &[CategoryShare]) -> Vec<CategoryShare> {
        let total = self.total_weight();
        let counts = accumulate(
            self.regions
                .iter()
                .filter(|r| r.population() > 0)
                .flat_map(|r| {
                    let weight = r.population_weight();
                    read(r)
                        .iter()
                        .filter(|s| s.value.is_finite())
                        .map(move |s| (s.name.as_str(), s.value / 100.0 * weight))
                }),
        );

        counts
            .into_iter()
            .map(|(name, count)| CategoryShare::new(name, count / total * 100.0))
            .collect()
    }

    /// Recombines a head-count breakdown by summing per label.
    fn summed(&self, read: impl Fn(&Region) -> &[CategoryShare]) -> Vec<CategoryShare> {
        accumulate(self.regions.iter().flat_map(|r| {
            read(r)
                .iter()
                .filter(|s| s.value.is_finite())
                .map(|s| (s.name.as_str(), s.value))
        }))
        .into_iter()
        .map(|(name, count)| CategoryShare::new(name, count))
        .collect()
    }

    fn composite(&self) -> Region {
        let economics = Economics {
            median_household_income: self.weighted(|r| r.economics.median_household_income),
            per_capita_income: self.weighted(|r| r.economics.per_capita_income),
            poverty_rate: self.weighted(|r| r.economics.poverty_rate),
        };

        let median_home_value = self.weighted(|r| r.housing.median_home_value);
        let price_to_income_ratio = match (median_home_value, economics.median_household_income) {
            (Some(home), Some(income)) if income > 0.0 => Some(home / income),
            _ => Some(0.0),
        };

        Region {
            code: COMPOSITE_CODE.to_string(),
            group: COMPOSITE_GROUP.to_string(),
            demographics: Demographics {
                population: self.total_population,
                population_growth: self.weighted(|r| r.demographics.population_growth),
                median_age: self.weighted(|r| r.demographics.median_age),
                gender_distribution: self
                    .categorical(|r| r.demographics.gender_distribution.as_slice()),
                age_distribution: self.categorical(|r| r.demographics.age_distribution.as_slice()),
                race_ethnicity: self.categorical(|r| r.demographics.race_ethnicity.as_slice()),
                foreign_born_share: self.weighted(|r| r.demographics.foreign_born_share),
            },
            education: Education {
                hs_graduation_rate: self.weighted(|r| r.education.hs_graduation_rate),
                college_graduation_rate: self.weighted(|r| r.education.college_graduation_rate),
                school_enrollment: self.summed(|r| r.education.school_enrollment.as_slice()),
            },
            economics,
            labor_force: LaborForce {
                labor_force_participation_rate: self
                    .weighted(|r| r.labor_force.labor_force_participation_rate),
                unemployment_rate: self.weighted(|r| r.labor_force.unemployment_rate),
                occupation_mix: self.categorical(|r| r.labor_force.occupation_mix.as_slice()),
            },
            employment_by_industry: self.categorical(|r| r.employment_by_industry.as_slice()),
            housing: Housing {
                median_home_value,
                owner_occupied_rate: self.weighted(|r| r.housing.owner_occupied_rate),
                median_gross_rent: self.weighted(|r| r.housing.median_gross_rent),
                rent_cost_burden_rate: self.weighted(|r| r.housing.rent_cost_burden_rate),
                price_to_income_ratio,
                year_structure_built: self
                    .categorical(|r| r.housing.year_structure_built.as_slice()),
            },
            commuting: Commuting {
                mean_travel_time_to_work: self.weighted(|r| r.commuting.mean_travel_time_to_work),
                mode_share: self.categorical(|r| r.commuting.mode_share.as_slice()),
            },
        }
    }
}

/// Sums values per label, keeping labels in first-seen order.
fn accumulate<'a>(items: impl Iterator<Item = (&'a str, f64)>) -> Vec<(&'a str, f64)> {
    let mut index: BTreeMap<&str, usize> = BTreeMap::new();
    let mut totals: Vec<(&str, f64)> = Vec::new();

    for (name, value) in items {
        if let Some(&i) = index.get(name) {
            totals[i].1 += value;
        } else {
            index.insert(name, totals.len());
            totals.push((name, value));
        }
    }

    totals
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use regionscope_region_models::find_share;

    use super::*;

    fn region(code: &str, population: u64) -> Region {
        let mut region = Region::new(code, "Glendale");
        region.demographics.population = population;
        region
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("value should be present");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn empty_input_has_no_composite() {
        assert_eq!(combine(&[]), None);
    }

    #[test]
    fn single_region_is_returned_unchanged() {
        let mut only = region("85301", 1234);
        only.economics.median_household_income = Some(51_234.5);
        only.housing.price_to_income_ratio = Some(9.99);

        let expected = only.clone();
        assert_eq!(combine(&[only]), Some(expected));
    }

    #[test]
    fn income_is_population_weighted() {
        let mut a = region("85301", 100);
        a.economics.median_household_income = Some(50_000.0);
        let mut b = region("85302", 300);
        b.economics.median_household_income = Some(70_000.0);

        let composite = combine(&[a, b]).unwrap();
        assert_close(composite.economics.median_household_income, 65_000.0);
        assert_eq!(composite.population(), 400);
    }

    #[test]
    fn composite_carries_sentinel_identity() {
        let composite = combine(&[region("85301", 10), region("85302", 20)]).unwrap();
        assert_eq!(composite.code, COMPOSITE_CODE);
        assert_eq!(composite.group, COMPOSITE_GROUP);
        assert!(composite.is_composite());
    }

    #[test]
    fn missing_field_does_not_dilute_weight() {
        let mut a = region("85301", 100);
        a.economics.poverty_rate = Some(12.0);
        let mut b = region("85302", 300);
        b.economics.poverty_rate = None;
        let mut c = region("85303", 200);
        c.economics.poverty_rate = Some(f64::NAN);

        let composite = combine(&[a, b, c]).unwrap();
        assert_close(composite.economics.poverty_rate, 12.0);
    }

    #[test]
    fn field_absent_everywhere_is_zero() {
        let composite = combine(&[region("85301", 100), region("85302", 300)]).unwrap();
        assert_eq!(composite.demographics.median_age, Some(0.0));
        assert_eq!(composite.commuting.mean_travel_time_to_work, Some(0.0));
    }

    #[test]
    fn zero_total_population_returns_first_region() {
        let mut a = region("85301", 0);
        a.economics.poverty_rate = Some(3.0);
        let b = region("85302", 0);

        assert_eq!(combine(&[a.clone(), b]), Some(a));
    }

    #[test]
    fn zero_population_region_contributes_nothing() {
        let mut empty = region("85390", 0);
        empty.economics.median_household_income = Some(10.0);
        empty.demographics.race_ethnicity = vec![CategoryShare::new("Other", 100.0)];

        let mut full = region("85301", 500);
        full.economics.median_household_income = Some(48_000.0);
        full.housing.median_home_value = Some(240_000.0);
        full.demographics.race_ethnicity = vec![
            CategoryShare::new("Hispanic", 60.0),
            CategoryShare::new("White", 40.0),
        ];

        let composite = combine(&[empty, full.clone()]).unwrap();

        assert_close(composite.economics.median_household_income, 48_000.0);
        assert_close(composite.housing.median_home_value, 240_000.0);
        assert_eq!(composite.population(), full.population());
        assert_eq!(composite.demographics.race_ethnicity.len(), 2);
        assert_close(
            find_share(&composite.demographics.race_ethnicity, "Hispanic"),
            60.0,
        );
        assert_close(
            find_share(&composite.demographics.race_ethnicity, "White"),
            40.0,
        );
    }

    #[test]
    fn categorical_reweights_by_population() {
        let mut a = region("85301", 100);
        a.employment_by_industry = vec![
            CategoryShare::new("Construction", 10.0),
            CategoryShare::new("Retail Trade", 20.0),
        ];
        let mut b = region("85302", 300);
        b.employment_by_industry = vec![CategoryShare::new("Construction", 30.0)];

        let composite = combine(&[a, b]).unwrap();
        let names: Vec<&str> = composite
            .employment_by_industry
            .iter()
            .map(|s| s.name.as_str())
            .collect();

        assert_eq!(names, vec!["Construction", "Retail Trade"]);
        // (10 + 90) / 400
        assert_close(
            find_share(&composite.employment_by_industry, "Construction"),
            25.0,
        );
        // 20 / 400
        assert_close(
            find_share(&composite.employment_by_industry, "Retail Trade"),
            5.0,
        );
    }

    #[test]
    fn enrollment_counts_are_summed_not_reweighted() {
        let mut a = region("85301", 1_000);
        a.education.school_enrollment = vec![
            CategoryShare::new("Preschool", 40.0),
            CategoryShare::new("High School", 120.0),
        ];
        let mut b = region("85302", 9_000);
        b.education.school_enrollment = vec![
            CategoryShare::new("High School", 600.0),
            CategoryShare::new("College/Grad", 350.0),
        ];

        let composite = combine(&[a, b]).unwrap();
        let enrollment = &composite.education.school_enrollment;

        assert_eq!(find_share(enrollment, "Preschool"), Some(40.0));
        assert_eq!(find_share(enrollment, "High School"), Some(720.0));
        assert_eq!(find_share(enrollment, "College/Grad"), Some(350.0));
    }

    #[test]
    fn price_to_income_is_recomputed_from_aggregates() {
        let mut a = region("85301", 100);
        a.housing.median_home_value = Some(200_000.0);
        a.economics.median_household_income = Some(50_000.0);
        a.housing.price_to_income_ratio = Some(4.0);
        let mut b = region("85302", 300);
        b.housing.median_home_value = Some(400_000.0);
        b.economics.median_household_income = Some(70_000.0);
        b.housing.price_to_income_ratio = Some(400_000.0 / 70_000.0);

        let composite = combine(&[a, b]).unwrap();

        // 350000 / 65000, not the weighted mean of the two ratios
        assert_close(composite.housing.price_to_income_ratio, 350_000.0 / 65_000.0);
    }

    #[test]
    fn price_to_income_without_income_is_zero() {
        let mut a = region("85301", 100);
        a.housing.median_home_value = Some(200_000.0);
        let b = region("85302", 300);

        let composite = combine(&[a, b]).unwrap();
        assert_eq!(composite.housing.price_to_income_ratio, Some(0.0));
    }

    fn shares_by_name(shares: &[CategoryShare]) -> BTreeMap<String, f64> {
        shares.iter().map(|s| (s.name.clone(), s.value)).collect()
    }

    fn region_strategy() -> impl Strategy<Value = Region> {
        let labels = prop::sample::subsequence(vec!["A", "B", "C", "D"], 0..=4);
        (1u64..100_000, labels, prop::collection::vec(0.0f64..100.0, 4)).prop_map(
            |(population, labels, values)| {
                let mut region = Region::new("00000", "Test");
                region.demographics.population = population;
                region.demographics.age_distribution = labels
                    .into_iter()
                    .zip(values)
                    .map(|(name, value)| CategoryShare::new(name, value))
                    .collect();
                region
            },
        )
    }

    proptest! {
        #[test]
        fn categorical_is_order_independent(
            (regions, shuffled) in prop::collection::vec(region_strategy(), 2..6)
                .prop_flat_map(|regions| (Just(regions.clone()), Just(regions).prop_shuffle()))
        ) {
            let original = shares_by_name(&combine(&regions).unwrap().demographics.age_distribution);
            let reordered = shares_by_name(&combine(&shuffled).unwrap().demographics.age_distribution);

            prop_assert_eq!(original.keys().collect::<Vec<_>>(), reordered.keys().collect::<Vec<_>>());
            for (name, value) in &original {
                prop_assert!((value - reordered[name]).abs() < 1e-6);
            }
        }

        #[test]
        fn equal_population_weighting_is_plain_mean(
            population in 1u64..1_000_000,
            ages in prop::collection::vec(0.0f64..100.0, 2..8),
        ) {
            let regions: Vec<Region> = ages
                .iter()
                .map(|&age| {
                    let mut r = region("00000", population);
                    r.demographics.median_age = Some(age);
                    r
                })
                .collect();

            #[allow(clippy::cast_precision_loss)]
            let mean = ages.iter().sum::<f64>() / ages.len() as f64;
            let combined = combine(&regions).unwrap().demographics.median_age.unwrap();
            prop_assert!((combined - mean).abs() < 1e-6);
        }

        #[test]
        fn enrollment_is_summed_per_label(a in region_strategy(), b in region_strategy()) {
            let mut a = a;
            let mut b = b;
            a.education.school_enrollment = a.demographics.age_distribution.clone();
            b.education.school_enrollment = b.demographics.age_distribution.clone();

            let combined = combine(&[a.clone(), b.clone()]).unwrap();
            for label in ["A", "B", "C", "D"] {
                let expected = find_share(&a.education.school_enrollment, label).unwrap_or(0.0)
                    + find_share(&b.education.school_enrollment, label).unwrap_or(0.0);
                let actual = find_share(&combined.education.school_enrollment, label).unwrap_or(0.0);
                prop_assert!((expected - actual).abs() < 1e-9);
            }
        }
    }
}
