//! Carbon pricing: scenario price paths and K-ETS free allocation.
//!
//! Produces a year -> price mapping for the selected regime by
//! piecewise-linear interpolation between the scenario's eight calibration
//! points; outside the calibrated range prices clamp to the nearest
//! endpoint (no extrapolation). K-ETS prices are interpolated on the Korean
//! allowance market's own KRW calibration points and converted at a fixed
//! exchange rate; the free-allocation fraction tightens annually and clamps
//! at zero (no bankable credits).
//!
//! References:
//! - NGFS Phase IV Scenarios (2023) for the global paths.
//! - KRX historical allowance prices and Ministry of Environment 4th
//!   planning-period projections for K-ETS.

use crate::config::{
    scenario_spec, sector_params, BASE_YEAR, KETS_KRW_TO_USD, MAX_YEAR,
};
use crate::core::{PricingRegime, RiskError, Scenario, Sector};
use crate::math::PiecewiseLinear;

/// A carbon price tagged with its regime; always expressed in USD/tCO2e,
/// with the native KRW quote retained for K-ETS.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CarbonPrice {
    pub regime: PricingRegime,
    pub year: i32,
    pub usd_per_tco2e: f64,
    /// Native KRW/tCO2e quote; present only for the K-ETS regime.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub krw_per_tco2e: Option<f64>,
}

/// Interpolated carbon price for any year.
///
/// Years before [`BASE_YEAR`] or after [`MAX_YEAR`] clamp to the horizon
/// and emit a warning.
pub fn price_at(
    scenario: Scenario,
    regime: PricingRegime,
    year: i32,
) -> Result<CarbonPrice, RiskError> {
    let clamped_year = clamp_year(year);
    let spec = scenario_spec(scenario);
    match regime {
        PricingRegime::Global => {
            let curve = PiecewiseLinear::from_year_points(&spec.price_path_usd)?;
            let usd = curve.value(f64::from(clamped_year)).max(0.0);
            Ok(CarbonPrice {
                regime,
                year: clamped_year,
                usd_per_tco2e: usd,
                krw_per_tco2e: None,
            })
        }
        PricingRegime::Kets => {
            let curve = PiecewiseLinear::from_year_points(&spec.kets_path_krw)?;
            let krw = curve.value(f64::from(clamped_year)).max(0.0);
            Ok(CarbonPrice {
                regime,
                year: clamped_year,
                usd_per_tco2e: krw * KETS_KRW_TO_USD,
                krw_per_tco2e: Some(krw),
            })
        }
    }
}

/// Full interpolated (year, USD price) path over an inclusive year range.
pub fn build_path(
    scenario: Scenario,
    regime: PricingRegime,
    year_start: i32,
    year_end: i32,
) -> Result<Vec<(i32, CarbonPrice)>, RiskError> {
    if year_end < year_start {
        return Err(RiskError::InvalidInput(format!(
            "year_end {year_end} precedes year_start {year_start}"
        )));
    }
    (year_start..=year_end)
        .map(|year| price_at(scenario, regime, year).map(|p| (year, p)))
        .collect()
}

/// K-ETS free-allocation fraction for a sector and year:
/// `max(0, base - tightening * (year - 2024))`, clamped into [0, 1] and
/// monotone non-increasing in year.
pub fn allocation_fraction(sector: &Sector, year: i32) -> f64 {
    let params = sector_params(sector);
    let years_elapsed = f64::from((year - BASE_YEAR).max(0));
    (params.kets_base_allocation - params.kets_tightening * years_elapsed).clamp(0.0, 1.0)
}

fn clamp_year(year: i32) -> i32 {
    if year < BASE_YEAR {
        log::warn!("carbon price queried for {year}; clamping to {BASE_YEAR}");
        BASE_YEAR
    } else if year > MAX_YEAR {
        log::warn!("carbon price queried for {year}; clamping to {MAX_YEAR}");
        MAX_YEAR
    } else {
        year
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn global_prices_match_calibration_points() {
        let p = price_at(Scenario::NetZero2050, PricingRegime::Global, 2030).unwrap();
        assert_relative_eq!(p.usd_per_tco2e, 130.0, epsilon = 1e-12);
        assert!(p.krw_per_tco2e.is_none());
    }

    #[test]
    fn global_prices_interpolate_between_points() {
        // Midpoint of (2025, 75) and (2027, 100).
        let p = price_at(Scenario::NetZero2050, PricingRegime::Global, 2026).unwrap();
        assert_relative_eq!(p.usd_per_tco2e, 87.5, epsilon = 1e-12);
    }

    #[test]
    fn prices_clamp_beyond_the_calibration_range() {
        let p = price_at(Scenario::Below2C, PricingRegime::Global, 2090).unwrap();
        assert_relative_eq!(p.usd_per_tco2e, 200.0, epsilon = 1e-12);
        let p = price_at(Scenario::Below2C, PricingRegime::Global, 2010).unwrap();
        assert_relative_eq!(p.usd_per_tco2e, 50.0, epsilon = 1e-12);
        assert_eq!(p.year, 2024);
    }

    #[test]
    fn prices_are_non_negative_and_monotone_for_ambitious_scenarios() {
        for scenario in [Scenario::NetZero2050, Scenario::Below2C] {
            let path = build_path(scenario, PricingRegime::Global, 2024, 2050).unwrap();
            let mut prev = 0.0;
            for (_, price) in path {
                assert!(price.usd_per_tco2e >= 0.0);
                assert!(price.usd_per_tco2e >= prev);
                prev = price.usd_per_tco2e;
            }
        }
    }

    #[test]
    fn kets_prices_convert_from_krw() {
        let p = price_at(Scenario::NetZero2050, PricingRegime::Kets, 2030).unwrap();
        assert_relative_eq!(p.krw_per_tco2e.unwrap(), 55_000.0, epsilon = 1e-9);
        assert_relative_eq!(p.usd_per_tco2e, 55_000.0 * KETS_KRW_TO_USD, epsilon = 1e-9);
    }

    #[test]
    fn allocation_fraction_tightens_and_clamps_at_zero() {
        let steel = Sector::Steel;
        let mut prev = 1.0;
        for year in 2024..=2150 {
            let fraction = allocation_fraction(&steel, year);
            assert!((0.0..=1.0).contains(&fraction));
            assert!(fraction <= prev);
            prev = fraction;
        }
        // 0.97 - 0.010 * 97 = 0 at 2121 and beyond.
        assert_eq!(allocation_fraction(&steel, 2150), 0.0);
        assert_relative_eq!(allocation_fraction(&steel, 2030), 0.91, epsilon = 1e-12);
    }

    #[test]
    fn allocation_before_base_year_holds_the_base_ratio() {
        assert_relative_eq!(
            allocation_fraction(&Sector::Utilities, 2020),
            0.90,
            epsilon = 1e-12
        );
    }

    #[test]
    fn build_path_rejects_inverted_ranges() {
        assert!(build_path(Scenario::NetZero2050, PricingRegime::Global, 2040, 2030).is_err());
    }
}
