//! NGFS scenario definitions: carbon-price calibration points, reduction
//! trajectories, warming pathways, and financing spreads.
//!
//! Sources:
//! - NGFS Phase IV Scenarios (2023); carbon-price ranges from the NGFS
//!   Scenario Explorer (IIASA).
//! - K-ETS paths: KRX historical prices plus Ministry of Environment 4th
//!   planning-period projections, KRW/tCO2e.
//! - SSP warming projections: IPCC AR6 WG1 Table SPM.1 best estimates,
//!   deg C above the 1850-1900 baseline.
//! - S-curve shape parameters: Bass (1969) diffusion calibrated to NGFS
//!   pathway endpoints.
//! - WACC spreads: calibrated assumptions informed by Bolton and
//!   Kacperczyk (2021) and Battiston et al. (2017); not published figures.

use crate::core::Scenario;

/// Full parameter set for one NGFS scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioSpec {
    /// Display name.
    pub name: &'static str,
    /// IPCC SSP pathway the warming trajectory follows.
    pub ssp: &'static str,
    /// Eight (year, USD/tCO2e) calibration points, ascending, 2024-2050.
    pub price_path_usd: [(i32, f64); 8],
    /// Eight (year, KRW/tCO2e) K-ETS calibration points.
    pub kets_path_krw: [(i32, f64); 8],
    /// Emission-reduction fraction the trajectory reaches at the target
    /// year (2050).
    pub reduction_target: f64,
    /// Logistic steepness `k`.
    pub scurve_k: f64,
    /// Logistic midpoint year `t0`.
    pub scurve_t0: f64,
    /// Credit spread added to base WACC, decimal.
    pub credit_spread: f64,
    /// SSP warming projection (year, deg C above pre-industrial).
    pub warming_path: [(i32, f64); 11],
}

const NET_ZERO_2050: ScenarioSpec = ScenarioSpec {
    name: "Net Zero 2050",
    ssp: "SSP1-1.9",
    price_path_usd: [
        (2024, 65.0),
        (2025, 75.0),
        (2027, 100.0),
        (2030, 130.0),
        (2035, 170.0),
        (2040, 210.0),
        (2045, 235.0),
        (2050, 250.0),
    ],
    kets_path_krw: [
        (2024, 15_000.0),
        (2025, 22_000.0),
        (2027, 35_000.0),
        (2030, 55_000.0),
        (2035, 80_000.0),
        (2040, 110_000.0),
        (2045, 130_000.0),
        (2050, 150_000.0),
    ],
    reduction_target: 0.50,
    scurve_k: 0.25,
    scurve_t0: 2032.0,
    credit_spread: 0.005,
    warming_path: [
        (2020, 1.1),
        (2025, 1.2),
        (2030, 1.4),
        (2035, 1.5),
        (2040, 1.5),
        (2045, 1.5),
        (2050, 1.4),
        (2060, 1.3),
        (2070, 1.3),
        (2080, 1.3),
        (2100, 1.0),
    ],
};

const BELOW_2C: ScenarioSpec = ScenarioSpec {
    name: "Below 2°C",
    ssp: "SSP1-2.6",
    price_path_usd: [
        (2024, 50.0),
        (2025, 60.0),
        (2027, 78.0),
        (2030, 100.0),
        (2035, 135.0),
        (2040, 165.0),
        (2045, 185.0),
        (2050, 200.0),
    ],
    kets_path_krw: [
        (2024, 15_000.0),
        (2025, 20_000.0),
        (2027, 28_000.0),
        (2030, 42_000.0),
        (2035, 60_000.0),
        (2040, 80_000.0),
        (2045, 95_000.0),
        (2050, 110_000.0),
    ],
    reduction_target: 0.40,
    scurve_k: 0.22,
    scurve_t0: 2035.0,
    credit_spread: 0.0075,
    warming_path: [
        (2020, 1.1),
        (2025, 1.2),
        (2030, 1.4),
        (2035, 1.6),
        (2040, 1.7),
        (2045, 1.8),
        (2050, 1.8),
        (2060, 1.8),
        (2070, 1.8),
        (2080, 1.8),
        (2100, 1.8),
    ],
};

const DELAYED_TRANSITION: ScenarioSpec = ScenarioSpec {
    name: "Delayed Transition",
    ssp: "SSP2-4.5",
    price_path_usd: [
        (2024, 40.0),
        (2025, 50.0),
        (2027, 60.0),
        (2030, 90.0),
        (2035, 130.0),
        (2040, 160.0),
        (2045, 175.0),
        (2050, 180.0),
    ],
    kets_path_krw: [
        (2024, 15_000.0),
        (2025, 18_000.0),
        (2027, 22_000.0),
        (2030, 35_000.0),
        (2035, 55_000.0),
        (2040, 75_000.0),
        (2045, 85_000.0),
        (2050, 90_000.0),
    ],
    reduction_target: 0.30,
    scurve_k: 0.40,
    scurve_t0: 2038.0,
    credit_spread: 0.015,
    warming_path: [
        (2020, 1.1),
        (2025, 1.3),
        (2030, 1.5),
        (2035, 1.7),
        (2040, 1.9),
        (2045, 2.0),
        (2050, 2.1),
        (2060, 2.3),
        (2070, 2.5),
        (2080, 2.6),
        (2100, 2.7),
    ],
};

const CURRENT_POLICIES: ScenarioSpec = ScenarioSpec {
    name: "Current Policies",
    ssp: "SSP3-7.0",
    price_path_usd: [
        (2024, 20.0),
        (2025, 25.0),
        (2027, 30.0),
        (2030, 40.0),
        (2035, 52.0),
        (2040, 62.0),
        (2045, 72.0),
        (2050, 80.0),
    ],
    kets_path_krw: [
        (2024, 15_000.0),
        (2025, 16_000.0),
        (2027, 18_000.0),
        (2030, 22_000.0),
        (2035, 28_000.0),
        (2040, 35_000.0),
        (2045, 40_000.0),
        (2050, 45_000.0),
    ],
    reduction_target: 0.15,
    scurve_k: 0.12,
    scurve_t0: 2040.0,
    credit_spread: 0.020,
    warming_path: [
        (2020, 1.1),
        (2025, 1.3),
        (2030, 1.5),
        (2035, 1.8),
        (2040, 2.1),
        (2045, 2.3),
        (2050, 2.5),
        (2060, 2.9),
        (2070, 3.3),
        (2080, 3.6),
        (2100, 3.6),
    ],
};

/// Parameter set for a scenario.
pub fn scenario_spec(scenario: Scenario) -> &'static ScenarioSpec {
    match scenario {
        Scenario::NetZero2050 => &NET_ZERO_2050,
        Scenario::Below2C => &BELOW_2C,
        Scenario::DelayedTransition => &DELAYED_TRANSITION,
        Scenario::CurrentPolicies => &CURRENT_POLICIES,
    }
}
