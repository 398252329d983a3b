//! Climate-science scaling: warming trajectories, hazard intensification,
//! and sea-level rise.
//!
//! Maps (scenario, year) onto global mean warming via the scenario's SSP
//! pathway, then onto hazard frequency/intensity multipliers and cumulative
//! sea-level rise.
//!
//! References:
//! - IPCC AR6 WG1 Table SPM.1 for warming projections.
//! - IPCC AR6 WG1 Ch. 11 (Table 11.1) and Fischer and Knutti (2015) for
//!   hazard intensification per degree.
//! - Clausius-Clapeyron relation (~7% more atmospheric moisture per deg C)
//!   for precipitation intensity.
//! - IPCC AR6 WG1 Ch. 9 for sea-level rise rates.

use crate::config::scenario_spec;
use crate::core::Scenario;
use crate::math::PiecewiseLinear;

/// Warming at the 2020 observation baseline, deg C above pre-industrial.
pub const BASELINE_WARMING: f64 = 1.1;

/// Observed baseline sea-level rise rate, mm/yr (2006-2018, IPCC AR6).
const SLR_BASE_RATE_MM_PER_YEAR: f64 = 3.7;

/// Additional sea-level rise rate per deg C of incremental warming,
/// mm/yr/deg C.
const SLR_RATE_MM_PER_YEAR_PER_DEGREE: f64 = 3.0;

/// Hazard classes subject to warming-driven intensification.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    Flood,
    Typhoon,
    Heatwave,
    Drought,
    SeaLevelRise,
}

impl HazardKind {
    /// Canonical evaluation order for deterministic output.
    pub const CANONICAL_ORDER: [HazardKind; 5] = [
        HazardKind::Flood,
        HazardKind::Typhoon,
        HazardKind::Heatwave,
        HazardKind::Drought,
        HazardKind::SeaLevelRise,
    ];

    /// Fractional frequency increase per deg C of incremental warming.
    fn frequency_rate(self) -> f64 {
        match self {
            Self::Flood => 0.30,
            Self::Typhoon => 0.05,
            Self::Heatwave => 1.30,
            Self::Drought => 0.15,
            Self::SeaLevelRise => 0.0,
        }
    }

    /// Fractional intensity increase per deg C of incremental warming.
    fn intensity_rate(self) -> f64 {
        match self {
            Self::Flood => 0.07,
            Self::Typhoon => 0.05,
            Self::Heatwave => 1.0,
            Self::Drought => 0.10,
            Self::SeaLevelRise => 0.0,
        }
    }
}

/// Projected global mean warming (deg C above pre-industrial) for a
/// scenario and year, interpolated along the scenario's SSP pathway and
/// clamped at the 2020/2100 endpoints.
pub fn warming_at(scenario: Scenario, year: i32) -> f64 {
    let spec = scenario_spec(scenario);
    let curve = PiecewiseLinear::from_year_points(&spec.warming_path)
        .expect("warming path is a valid static table");
    curve.value(f64::from(year))
}

/// Incremental warming above the 2020 baseline; this drives hazard
/// intensification.
pub fn warming_delta(scenario: Scenario, year: i32) -> f64 {
    (warming_at(scenario, year) - BASELINE_WARMING).max(0.0)
}

/// Multiplicative factor (>= 1) on hazard event frequency.
pub fn frequency_multiplier(hazard: HazardKind, scenario: Scenario, year: i32) -> f64 {
    1.0 + hazard.frequency_rate() * warming_delta(scenario, year)
}

/// Multiplicative factor (>= 1) on hazard intensity.
pub fn intensity_multiplier(hazard: HazardKind, scenario: Scenario, year: i32) -> f64 {
    1.0 + hazard.intensity_rate() * warming_delta(scenario, year)
}

/// Return period shortened by a frequency multiplier: a 100-year event
/// that becomes 1.5x more frequent recurs every ~67 years.
pub fn adjusted_return_period(base_return_period: f64, freq_multiplier: f64) -> f64 {
    if freq_multiplier <= 0.0 {
        return base_return_period;
    }
    base_return_period / freq_multiplier
}

/// Cumulative sea-level rise in mm from 2020 to `year`, integrating the
/// warming-dependent annual rate.
pub fn sea_level_rise_mm(scenario: Scenario, year: i32) -> f64 {
    const SLR_BASE_YEAR: i32 = 2020;
    if year <= SLR_BASE_YEAR {
        return 0.0;
    }
    let mut total = 0.0;
    for y in (SLR_BASE_YEAR + 1)..=year {
        let delta = warming_delta(scenario, y);
        total += SLR_BASE_RATE_MM_PER_YEAR + SLR_RATE_MM_PER_YEAR_PER_DEGREE * delta;
    }
    total
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn warming_matches_ssp_table_points() {
        assert_relative_eq!(
            warming_at(Scenario::CurrentPolicies, 2050),
            2.5,
            epsilon = 1e-12
        );
        assert_relative_eq!(warming_at(Scenario::Below2C, 2040), 1.7, epsilon = 1e-12);
    }

    #[test]
    fn warming_clamps_outside_projection_range() {
        assert_relative_eq!(
            warming_at(Scenario::CurrentPolicies, 2150),
            3.6,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            warming_at(Scenario::CurrentPolicies, 1990),
            1.1,
            epsilon = 1e-12
        );
    }

    #[test]
    fn delta_is_non_negative() {
        // Net zero warming dips back below 1.1 late century.
        assert_eq!(warming_delta(Scenario::NetZero2050, 2100), 0.0);
        assert!(warming_delta(Scenario::CurrentPolicies, 2050) > 1.0);
    }

    #[test]
    fn multipliers_are_at_least_one_and_ordered_by_ambition() {
        for hazard in [
            HazardKind::Flood,
            HazardKind::Typhoon,
            HazardKind::Heatwave,
            HazardKind::Drought,
        ] {
            let cp = frequency_multiplier(hazard, Scenario::CurrentPolicies, 2050);
            let nz = frequency_multiplier(hazard, Scenario::NetZero2050, 2050);
            assert!(nz >= 1.0);
            assert!(cp >= nz);
        }
    }

    #[test]
    fn return_period_shortens_with_frequency() {
        assert_relative_eq!(adjusted_return_period(100.0, 1.5), 100.0 / 1.5, epsilon = 1e-12);
        assert_relative_eq!(adjusted_return_period(100.0, 0.0), 100.0, epsilon = 1e-12);
    }

    #[test]
    fn sea_level_rise_accumulates_and_orders_by_scenario() {
        assert_eq!(sea_level_rise_mm(Scenario::CurrentPolicies, 2020), 0.0);
        let cp_2050 = sea_level_rise_mm(Scenario::CurrentPolicies, 2050);
        let nz_2050 = sea_level_rise_mm(Scenario::NetZero2050, 2050);
        assert!(cp_2050 > nz_2050);
        // 30 years at >= 3.7 mm/yr.
        assert!(nz_2050 > 30.0 * SLR_BASE_RATE_MM_PER_YEAR - 1.0);
    }
}
