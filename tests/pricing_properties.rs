//! Carbon-pricing invariants: non-negative monotone paths, endpoint
//! clamping, K-ETS conversion, and allocation tightening.

use approx::assert_relative_eq;

use climrisk::core::{PricingRegime, Scenario, Sector};
use climrisk::pricing::{allocation_fraction, build_path, price_at};

#[test]
fn prices_are_non_negative_for_every_scenario_and_year() {
    for scenario in Scenario::ALL {
        for regime in [PricingRegime::Global, PricingRegime::Kets] {
            for year in 2024..=2050 {
                let price = price_at(scenario, regime, year).unwrap();
                assert!(
                    price.usd_per_tco2e >= 0.0,
                    "{scenario}/{regime}/{year}: {}",
                    price.usd_per_tco2e
                );
            }
        }
    }
}

#[test]
fn ambitious_scenarios_have_monotone_non_decreasing_paths() {
    for scenario in [Scenario::NetZero2050, Scenario::Below2C] {
        let path = build_path(scenario, PricingRegime::Global, 2024, 2050).unwrap();
        for window in path.windows(2) {
            assert!(
                window[1].1.usd_per_tco2e >= window[0].1.usd_per_tco2e,
                "{scenario}: price fell between {} and {}",
                window[0].0,
                window[1].0
            );
        }
    }
}

#[test]
fn years_outside_the_horizon_clamp_to_endpoints() {
    let early = price_at(Scenario::DelayedTransition, PricingRegime::Global, 1999).unwrap();
    assert_relative_eq!(early.usd_per_tco2e, 40.0, epsilon = 1e-12);

    let late = price_at(Scenario::DelayedTransition, PricingRegime::Global, 2099).unwrap();
    assert_relative_eq!(late.usd_per_tco2e, 180.0, epsilon = 1e-12);
}

#[test]
fn kets_prices_carry_the_native_krw_quote() {
    let price = price_at(Scenario::Below2C, PricingRegime::Kets, 2035).unwrap();
    let krw = price.krw_per_tco2e.unwrap();
    assert_relative_eq!(krw, 60_000.0, epsilon = 1e-9);
    assert_relative_eq!(price.usd_per_tco2e, krw * 0.00075, epsilon = 1e-9);
}

#[test]
fn allocation_fraction_is_bounded_and_non_increasing_for_every_sector() {
    for sector in Sector::CANONICAL {
        let mut previous = f64::INFINITY;
        for year in 2024..=2124 {
            let fraction = allocation_fraction(&sector, year);
            assert!((0.0..=1.0).contains(&fraction), "{sector}/{year}: {fraction}");
            assert!(fraction <= previous, "{sector}/{year} rose");
            previous = fraction;
        }
    }
}

#[test]
fn allocation_eventually_clamps_to_zero_rather_than_going_negative() {
    // financial: 0.80 - 0.020 * 40 = 0 at 2064.
    assert_eq!(allocation_fraction(&Sector::Financial, 2064), 0.0);
    assert_eq!(allocation_fraction(&Sector::Financial, 2100), 0.0);
}

#[test]
fn unknown_scenario_tags_fail_at_the_parse_boundary() {
    let err = "net_zero_2060".parse::<Scenario>().unwrap_err();
    assert!(err.to_string().contains("net_zero_2060"));
    assert!("eu_ets".parse::<PricingRegime>().is_err());
}
