//! Transition-risk engine: per-facility yearly impact composition and NPV.
//!
//! For each facility and year the engine composes carbon cost, energy-cost
//! uplift, revenue impact, transition CAPEX/OPEX, Scope 3 cost, and
//! stranded-asset write-down along a logistic emission-reduction
//! trajectory, then discounts the EBITDA deltas at a scenario-adjusted
//! WACC. Pure over its inputs plus the configuration registry; the carbon
//! price path is memoised per call.
//!
//! Methodology references:
//! - Bass (1969) for the logistic reduction trajectory, calibrated so the
//!   end-year reduction equals the scenario target exactly.
//! - Carbon Tracker Initiative (2023) for stranded-asset write-downs.
//! - CDP Supply Chain Report (2023) for Scope 3 exposure.
//! - Demailly and Quirion (2008) for pass-through and demand response.
//! - NGFS Technical Documentation (2023) for scenario WACC spreads.

use std::collections::BTreeMap;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::{
    scenario_spec, sector_params, BASE_WACC, BASE_YEAR, CAPEX_ALPHA, DEFAULT_YEAR_END,
    DEFAULT_YEAR_START, GREEN_PREMIUM_BASE, GREEN_PREMIUM_FLOOR, MARGIN_BURDEN_FACTOR, OPEX_ALPHA,
    REVENUE_IMPACT_CAP,
};
use crate::core::{
    validate_facilities, CancelToken, Facility, PricingRegime, RiskError, RiskLevel, Scenario,
};
use crate::math::{calibrated_supremum, logistic, npv, wacc};
use crate::pricing::{allocation_fraction, build_path, CarbonPrice};

/// |dNPV| / assets threshold for the High bucket.
const HIGH_NPV_FRACTION: f64 = 0.10;

/// |dNPV| / assets threshold for the Medium bucket.
const MEDIUM_NPV_FRACTION: f64 = 0.03;

/// Analysis horizon and knobs; defaults cover 2025-2050.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisOptions {
    pub year_start: i32,
    pub year_end: i32,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            year_start: DEFAULT_YEAR_START,
            year_end: DEFAULT_YEAR_END,
        }
    }
}

/// One point of a facility's emission pathway.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EmissionPathwayPoint {
    pub year: i32,
    pub scope1_emissions: f64,
    pub scope2_emissions: f64,
    pub total_emissions: f64,
    pub reduction_factor: f64,
}

/// Yearly impact decomposition. The three K-ETS fields are present only
/// under the K-ETS regime.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnnualImpact {
    pub year: i32,
    pub carbon_cost: f64,
    pub energy_cost_increase: f64,
    pub revenue_impact: f64,
    pub transition_capex: f64,
    pub transition_opex: f64,
    pub scope3_impact: f64,
    pub stranded_asset_writedown: f64,
    pub delta_ebitda: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kets_free_allocation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kets_excess_emissions: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kets_price_krw: Option<f64>,
}

/// Per-facility transition-risk result.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FacilityTransitionResult {
    pub facility_id: String,
    pub facility_name: String,
    pub sector: String,
    pub scenario: Scenario,
    pub risk_level: RiskLevel,
    pub emission_pathway: Vec<EmissionPathwayPoint>,
    pub annual_impacts: Vec<AnnualImpact>,
    /// Sum of discounted EBITDA deltas; <= 0 whenever emissions and prices
    /// are positive.
    pub delta_npv: f64,
    /// dNPV as a fraction of asset value.
    pub npv_fraction_of_assets: f64,
    pub discount_rate: f64,
}

/// Portfolio-level transition analysis output.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionAnalysis {
    pub scenario: Scenario,
    pub scenario_name: String,
    pub pricing_regime: PricingRegime,
    pub facilities: Vec<FacilityTransitionResult>,
    pub total_npv: f64,
    pub total_baseline_emissions: f64,
    pub avg_risk_level: RiskLevel,
    pub warnings: Vec<String>,
}

/// Compact portfolio summary.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TransitionSummary {
    pub scenario: Scenario,
    pub scenario_name: String,
    pub pricing_regime: PricingRegime,
    pub total_facilities: usize,
    pub total_baseline_emissions: f64,
    pub total_npv: f64,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
    pub top_risk_facilities: Vec<TopRiskFacility>,
    pub cost_breakdown: CostBreakdown,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TopRiskFacility {
    pub facility_id: String,
    pub name: String,
    pub sector: String,
    pub delta_npv: f64,
    pub risk_level: RiskLevel,
}

/// End-year cost components summed across the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct CostBreakdown {
    pub carbon_cost: f64,
    pub energy_cost_increase: f64,
    pub revenue_impact: f64,
    pub transition_opex: f64,
}

/// Four-scenario comparison bundle.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScenarioComparison {
    pub pricing_regime: PricingRegime,
    pub npv_comparison: Vec<NpvComparisonRow>,
    pub emission_pathways: BTreeMap<Scenario, Vec<(i32, f64)>>,
    pub risk_distribution: BTreeMap<Scenario, RiskCounts>,
    pub cost_trends: BTreeMap<Scenario, Vec<(i32, f64)>>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NpvComparisonRow {
    pub scenario: Scenario,
    pub scenario_name: String,
    pub total_npv: f64,
    pub avg_risk_level: RiskLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct RiskCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

/// Logistic reduction factor for a scenario and year, zero at and before
/// the base year. The supremum is calibrated so the factor equals the
/// scenario's reduction target exactly at `year_end`.
pub fn reduction_factor(scenario: Scenario, year: i32, year_end: i32) -> f64 {
    if year <= BASE_YEAR {
        return 0.0;
    }
    let spec = scenario_spec(scenario);
    let supremum = calibrated_supremum(
        spec.reduction_target,
        spec.scurve_k,
        spec.scurve_t0,
        f64::from(year_end),
    );
    logistic(f64::from(year), supremum, spec.scurve_k, spec.scurve_t0)
}

/// Runs the transition analysis over a facility set.
///
/// Output order matches input order regardless of fan-out. The cancel
/// token is checked between facilities; a fired token aborts the whole
/// analysis without partial results.
pub fn analyse(
    facilities: &[Facility],
    scenario: Scenario,
    regime: PricingRegime,
    options: &AnalysisOptions,
    token: &CancelToken,
) -> Result<TransitionAnalysis, RiskError> {
    if options.year_end < options.year_start {
        return Err(RiskError::InvalidInput(format!(
            "year_end {} precedes year_start {}",
            options.year_end, options.year_start
        )));
    }
    let warnings = validate_facilities(facilities)?;

    // Memoised per request: one interpolated path shared by every facility.
    let price_path: Vec<CarbonPrice> =
        build_path(scenario, regime, options.year_start, options.year_end)?
            .into_iter()
            .map(|(_, price)| price)
            .collect();

    let results = run_facilities(facilities, scenario, regime, options, &price_path, token)?;

    let total_npv = results.iter().map(|r| r.delta_npv).sum();
    let total_baseline_emissions = facilities.iter().map(Facility::baseline_emissions).sum();
    let avg_risk_level = dominant_level(&results);

    Ok(TransitionAnalysis {
        scenario,
        scenario_name: scenario_spec(scenario).name.to_string(),
        pricing_regime: regime,
        facilities: results,
        total_npv,
        total_baseline_emissions,
        avg_risk_level,
        warnings,
    })
}

#[cfg(feature = "parallel")]
fn run_facilities(
    facilities: &[Facility],
    scenario: Scenario,
    regime: PricingRegime,
    options: &AnalysisOptions,
    price_path: &[CarbonPrice],
    token: &CancelToken,
) -> Result<Vec<FacilityTransitionResult>, RiskError> {
    facilities
        .par_iter()
        .map(|facility| {
            token.checkpoint()?;
            Ok(analyse_facility(
                facility, scenario, regime, options, price_path,
            ))
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_facilities(
    facilities: &[Facility],
    scenario: Scenario,
    regime: PricingRegime,
    options: &AnalysisOptions,
    price_path: &[CarbonPrice],
    token: &CancelToken,
) -> Result<Vec<FacilityTransitionResult>, RiskError> {
    facilities
        .iter()
        .map(|facility| {
            token.checkpoint()?;
            Ok(analyse_facility(
                facility, scenario, regime, options, price_path,
            ))
        })
        .collect()
}

fn analyse_facility(
    facility: &Facility,
    scenario: Scenario,
    regime: PricingRegime,
    options: &AnalysisOptions,
    price_path: &[CarbonPrice],
) -> FacilityTransitionResult {
    let spec = scenario_spec(scenario);
    let params = sector_params(&facility.sector);
    let discount_rate = wacc(BASE_WACC, spec.credit_spread);

    let baseline_total = facility.baseline_emissions();
    let mut pathway = Vec::with_capacity(price_path.len());
    let mut impacts = Vec::with_capacity(price_path.len());
    let mut cash_flows = Vec::with_capacity(price_path.len());

    for (offset, price) in price_path.iter().enumerate() {
        let year = options.year_start + offset as i32;
        let r = reduction_factor(scenario, year, options.year_end);

        let scope1 = facility.scope1_emissions * (1.0 - r);
        let scope2 = facility.scope2_emissions * (1.0 - r);
        let total = scope1 + scope2;
        pathway.push(EmissionPathwayPoint {
            year,
            scope1_emissions: scope1,
            scope2_emissions: scope2,
            total_emissions: total,
            reduction_factor: r,
        });

        let (carbon_cost, kets_free_allocation, kets_excess_emissions) = match regime {
            PricingRegime::Global => (total * price.usd_per_tco2e, None, None),
            PricingRegime::Kets => {
                let fraction = allocation_fraction(&facility.sector, year);
                let free = fraction * baseline_total;
                let excess = (total - free).max(0.0);
                (excess * price.usd_per_tco2e, Some(free), Some(excess))
            }
        };

        // Clean-energy premium decays at the sector learning rate; the
        // efficiency term partially offsets the uplift as reduction deepens.
        let premium = (GREEN_PREMIUM_BASE
            * (1.0 - params.learning_rate).powi(year - BASE_YEAR))
        .max(GREEN_PREMIUM_FLOOR);
        let energy_cost_increase =
            facility.annual_revenue * params.energy_cost_share * premium * r * (1.0 - 0.5 * r);

        let revenue_impact = revenue_impact(facility, params, scenario, carbon_cost, r);

        let stranded_asset_writedown = facility.assets_value * params.stranded_rate;
        let transition_capex =
            facility.assets_value * CAPEX_ALPHA * (1.0 + 10.0 * r) + stranded_asset_writedown;
        let transition_opex = facility.assets_value * OPEX_ALPHA * (1.0 + 10.0 * r);

        let scope3_impact =
            facility.scope3_emissions * price.usd_per_tco2e * params.scope3_exposure;

        let delta_ebitda = -(carbon_cost
            + energy_cost_increase
            + revenue_impact
            + transition_capex
            + transition_opex
            + scope3_impact);

        impacts.push(AnnualImpact {
            year,
            carbon_cost,
            energy_cost_increase,
            revenue_impact,
            transition_capex,
            transition_opex,
            scope3_impact,
            stranded_asset_writedown,
            delta_ebitda,
            kets_free_allocation,
            kets_excess_emissions,
            kets_price_krw: price.krw_per_tco2e,
        });
        cash_flows.push(delta_ebitda);
    }

    let delta_npv = npv(&cash_flows, discount_rate);
    let npv_fraction_of_assets = if facility.assets_value > 0.0 {
        delta_npv / facility.assets_value
    } else {
        0.0
    };

    FacilityTransitionResult {
        facility_id: facility.facility_id.clone(),
        facility_name: facility.name.clone(),
        sector: facility.sector.tag().to_string(),
        scenario,
        risk_level: risk_level(npv_fraction_of_assets),
        emission_pathway: pathway,
        annual_impacts: impacts,
        delta_npv,
        npv_fraction_of_assets,
        discount_rate,
    }
}

/// Pass-through demand loss plus residual margin burden plus the structural
/// demand shift hitting fossil-heavy sectors under ambitious scenarios,
/// capped at half of revenue.
fn revenue_impact(
    facility: &Facility,
    params: &crate::config::SectorParams,
    scenario: Scenario,
    carbon_cost: f64,
    r: f64,
) -> f64 {
    if facility.annual_revenue <= 0.0 {
        return 0.0;
    }
    let price_effect = carbon_cost * params.cost_passthrough * params.demand_elasticity;
    let margin_burden = carbon_cost * (1.0 - params.cost_passthrough) * MARGIN_BURDEN_FACTOR;
    let structural = match scenario {
        Scenario::NetZero2050 | Scenario::Below2C => {
            facility.annual_revenue * params.structural_shift * r
        }
        _ => 0.0,
    };
    (price_effect + margin_burden + structural)
        .min(facility.annual_revenue * REVENUE_IMPACT_CAP)
}

/// High when |dNPV| reaches 10% of assets, Medium at 3%; equality takes
/// the stricter bucket.
fn risk_level(npv_fraction: f64) -> RiskLevel {
    let magnitude = npv_fraction.abs();
    if magnitude >= HIGH_NPV_FRACTION {
        RiskLevel::High
    } else if magnitude >= MEDIUM_NPV_FRACTION {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn dominant_level(results: &[FacilityTransitionResult]) -> RiskLevel {
    let counts = count_levels(results);
    if counts.high > counts.medium && counts.high > counts.low {
        RiskLevel::High
    } else if counts.medium >= counts.low {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

fn count_levels(results: &[FacilityTransitionResult]) -> RiskCounts {
    let mut counts = RiskCounts::default();
    for result in results {
        match result.risk_level {
            RiskLevel::High => counts.high += 1,
            RiskLevel::Medium => counts.medium += 1,
            RiskLevel::Low => counts.low += 1,
        }
    }
    counts
}

/// Portfolio summary: risk counts, end-year cost breakdown, and the five
/// facilities with the most negative dNPV.
pub fn summary(
    facilities: &[Facility],
    scenario: Scenario,
    regime: PricingRegime,
    options: &AnalysisOptions,
    token: &CancelToken,
) -> Result<TransitionSummary, RiskError> {
    let analysis = analyse(facilities, scenario, regime, options, token)?;
    let counts = count_levels(&analysis.facilities);

    let mut breakdown = CostBreakdown::default();
    for result in &analysis.facilities {
        if let Some(last) = result.annual_impacts.last() {
            breakdown.carbon_cost += last.carbon_cost;
            breakdown.energy_cost_increase += last.energy_cost_increase;
            breakdown.revenue_impact += last.revenue_impact;
            breakdown.transition_opex += last.transition_opex;
        }
    }

    let mut ranked: Vec<&FacilityTransitionResult> = analysis.facilities.iter().collect();
    ranked.sort_by(|a, b| {
        a.delta_npv
            .partial_cmp(&b.delta_npv)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    let top_risk_facilities = ranked
        .into_iter()
        .take(5)
        .map(|r| TopRiskFacility {
            facility_id: r.facility_id.clone(),
            name: r.facility_name.clone(),
            sector: r.sector.clone(),
            delta_npv: r.delta_npv,
            risk_level: r.risk_level,
        })
        .collect();

    Ok(TransitionSummary {
        scenario,
        scenario_name: analysis.scenario_name,
        pricing_regime: regime,
        total_facilities: analysis.facilities.len(),
        total_baseline_emissions: analysis.total_baseline_emissions,
        total_npv: analysis.total_npv,
        high_risk_count: counts.high,
        medium_risk_count: counts.medium,
        low_risk_count: counts.low,
        top_risk_facilities,
        cost_breakdown: breakdown,
    })
}

/// Side-by-side comparison of all four scenarios over the same portfolio.
pub fn compare_scenarios(
    facilities: &[Facility],
    regime: PricingRegime,
    options: &AnalysisOptions,
    token: &CancelToken,
) -> Result<ScenarioComparison, RiskError> {
    let mut npv_comparison = Vec::with_capacity(Scenario::ALL.len());
    let mut emission_pathways = BTreeMap::new();
    let mut risk_distribution = BTreeMap::new();
    let mut cost_trends = BTreeMap::new();

    for scenario in Scenario::ALL {
        let analysis = analyse(facilities, scenario, regime, options, token)?;

        npv_comparison.push(NpvComparisonRow {
            scenario,
            scenario_name: analysis.scenario_name.clone(),
            total_npv: analysis.total_npv,
            avg_risk_level: analysis.avg_risk_level,
        });

        let mut yearly_emissions: BTreeMap<i32, f64> = BTreeMap::new();
        let mut yearly_costs: BTreeMap<i32, f64> = BTreeMap::new();
        for result in &analysis.facilities {
            for point in &result.emission_pathway {
                *yearly_emissions.entry(point.year).or_default() += point.total_emissions;
            }
            for impact in &result.annual_impacts {
                *yearly_costs.entry(impact.year).or_default() += impact.delta_ebitda.abs();
            }
        }
        emission_pathways.insert(scenario, yearly_emissions.into_iter().collect());
        cost_trends.insert(scenario, yearly_costs.into_iter().collect());
        risk_distribution.insert(scenario, count_levels(&analysis.facilities));
    }

    Ok(ScenarioComparison {
        pricing_regime: regime,
        npv_comparison,
        emission_pathways,
        risk_distribution,
        cost_trends,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::core::Sector;

    use super::*;

    fn steel_facility() -> Facility {
        Facility {
            facility_id: "KR-STL-T01".to_string(),
            name: "Test Steelworks".to_string(),
            company: "Test Corp".to_string(),
            sector: Sector::Steel,
            location: "Pohang".to_string(),
            latitude: 36.02,
            longitude: 129.34,
            scope1_emissions: 5.0e6,
            scope2_emissions: 1.0e6,
            scope3_emissions: 0.0,
            annual_revenue: 1.0e10,
            ebitda: 1.5e9,
            assets_value: 1.2e10,
            coastal: None,
        }
    }

    #[test]
    fn reduction_hits_target_exactly_at_end_year() {
        for scenario in Scenario::ALL {
            let target = scenario_spec(scenario).reduction_target;
            assert_relative_eq!(
                reduction_factor(scenario, 2050, 2050),
                target,
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn reduction_is_zero_at_base_year_and_monotone() {
        assert_eq!(reduction_factor(Scenario::NetZero2050, 2024, 2050), 0.0);
        let mut prev = 0.0;
        for year in 2025..=2050 {
            let r = reduction_factor(Scenario::NetZero2050, year, 2050);
            assert!(r > prev);
            prev = r;
        }
    }

    #[test]
    fn pathway_is_monotone_non_increasing() {
        let analysis = analyse(
            &[steel_facility()],
            Scenario::Below2C,
            PricingRegime::Global,
            &AnalysisOptions::default(),
            &CancelToken::none(),
        )
        .unwrap();
        let pathway = &analysis.facilities[0].emission_pathway;
        assert!(
            pathway
                .windows(2)
                .all(|w| w[1].total_emissions <= w[0].total_emissions)
        );
    }

    #[test]
    fn npv_is_non_positive_with_positive_emissions() {
        for scenario in Scenario::ALL {
            let analysis = analyse(
                &[steel_facility()],
                scenario,
                PricingRegime::Global,
                &AnalysisOptions::default(),
                &CancelToken::none(),
            )
            .unwrap();
            assert!(analysis.facilities[0].delta_npv <= 0.0);
        }
    }

    #[test]
    fn kets_fields_only_present_under_kets() {
        let global = analyse(
            &[steel_facility()],
            Scenario::NetZero2050,
            PricingRegime::Global,
            &AnalysisOptions::default(),
            &CancelToken::none(),
        )
        .unwrap();
        assert!(
            global.facilities[0]
                .annual_impacts
                .iter()
                .all(|i| i.kets_free_allocation.is_none() && i.kets_price_krw.is_none())
        );

        let kets = analyse(
            &[steel_facility()],
            Scenario::NetZero2050,
            PricingRegime::Kets,
            &AnalysisOptions::default(),
            &CancelToken::none(),
        )
        .unwrap();
        assert!(
            kets.facilities[0]
                .annual_impacts
                .iter()
                .all(|i| i.kets_free_allocation.is_some() && i.kets_excess_emissions.is_some())
        );
    }

    #[test]
    fn risk_level_tie_break_uses_stricter_bucket() {
        assert_eq!(risk_level(-0.10), RiskLevel::High);
        assert_eq!(risk_level(-0.03), RiskLevel::Medium);
        assert_eq!(risk_level(-0.0299), RiskLevel::Low);
        assert_eq!(risk_level(0.12), RiskLevel::High);
    }

    #[test]
    fn cancelled_token_aborts_without_partial_results() {
        let token = CancelToken::none();
        token.cancel();
        let err = analyse(
            &[steel_facility()],
            Scenario::NetZero2050,
            PricingRegime::Global,
            &AnalysisOptions::default(),
            &token,
        )
        .unwrap_err();
        assert_eq!(err, RiskError::Cancelled);
    }

    #[test]
    fn summary_ranks_most_negative_npv_first() {
        let mut small = steel_facility();
        small.facility_id = "KR-STL-T02".to_string();
        small.scope1_emissions = 1.0e5;
        small.scope2_emissions = 1.0e4;
        small.annual_revenue = 1.0e8;
        small.assets_value = 1.0e8;

        let result = summary(
            &[small, steel_facility()],
            Scenario::NetZero2050,
            PricingRegime::Global,
            &AnalysisOptions::default(),
            &CancelToken::none(),
        )
        .unwrap();
        assert_eq!(result.top_risk_facilities[0].facility_id, "KR-STL-T01");
        assert_eq!(result.total_facilities, 2);
    }

    #[test]
    fn comparison_covers_all_four_scenarios() {
        let comparison = compare_scenarios(
            &[steel_facility()],
            PricingRegime::Global,
            &AnalysisOptions::default(),
            &CancelToken::none(),
        )
        .unwrap();
        assert_eq!(comparison.npv_comparison.len(), 4);
        assert_eq!(comparison.emission_pathways.len(), 4);
        assert_eq!(comparison.risk_distribution.len(), 4);
    }
}
