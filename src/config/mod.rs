//! Configuration registry: scenario definitions, sector parameter sets,
//! hazard tables, and the seed facility dataset.
//!
//! Everything here is data, not code branches: immutable tables loaded into
//! the binary, parameterising the engines. Each table carries its
//! literature source in the module or item docs.

pub mod facilities;
pub mod hazards;
pub mod scenarios;
pub mod sectors;

pub use facilities::seed_facilities;
pub use hazards::{classify_region, Region};
pub use scenarios::{scenario_spec, ScenarioSpec};
pub use sectors::{sector_params, SectorParams};

/// Reference year for carbon pricing, allocation tightening, and the
/// emission baseline.
pub const BASE_YEAR: i32 = 2024;

/// Default analysis horizon.
pub const DEFAULT_YEAR_START: i32 = 2025;
pub const DEFAULT_YEAR_END: i32 = 2050;

/// Latest year any engine accepts; queries beyond clamp with a warning.
pub const MAX_YEAR: i32 = 2100;

/// Baseline weighted average cost of capital before scenario spreads.
pub const BASE_WACC: f64 = 0.08;

/// Fixed KRW to USD conversion for K-ETS allowance prices (1 USD ~ 1,330
/// KRW).
pub const KETS_KRW_TO_USD: f64 = 0.00075;

/// Transition CAPEX intensity: `assets * CAPEX_ALPHA * (1 + 10 r)`.
pub const CAPEX_ALPHA: f64 = 0.012;

/// Transition OPEX intensity: `assets * OPEX_ALPHA * (1 + 10 r)`.
pub const OPEX_ALPHA: f64 = 0.004;

/// Initial clean-energy cost premium over the incumbent energy mix; decays
/// at the sector technology learning rate.
pub const GREEN_PREMIUM_BASE: f64 = 0.50;

/// Floor on the decayed green premium.
pub const GREEN_PREMIUM_FLOOR: f64 = 0.05;

/// Share of un-passed-through carbon cost that erodes operating margin.
pub const MARGIN_BURDEN_FACTOR: f64 = 0.15;

/// Revenue-impact cap as a fraction of revenue (bankruptcy threshold).
pub const REVENUE_IMPACT_CAP: f64 = 0.50;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizon_constants_are_ordered() {
        assert!(BASE_YEAR < DEFAULT_YEAR_START);
        assert!(DEFAULT_YEAR_START < DEFAULT_YEAR_END);
        assert!(DEFAULT_YEAR_END <= MAX_YEAR);
    }
}
