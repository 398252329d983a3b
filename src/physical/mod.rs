//! Physical-risk engine: per-facility, per-hazard expected annual loss.
//!
//! Hazards are evaluated in a fixed canonical order (flood, typhoon,
//! heatwave, drought, sea-level rise) so output is deterministic; with no
//! live weather the assessment is bit-identical across runs. Each hazard
//! produces its return period, annual exceedance probability, expected
//! annual loss, business-interruption component, climate multiplier, and a
//! risk level; the facility's overall level is the maximum across hazards.
//!
//! Methodology references:
//! - Flood: Gumbel Type I (Coles 2001) with USACE depth-damage curves and
//!   Clausius-Clapeyron intensity scaling.
//! - Typhoon: Poisson strike counts (KMA NTC) with HAZUS-MH category
//!   damage and the IPCC AR6 Cat 4-5 share shift.
//! - Heatwave: ILO (2019) productivity-loss model.
//! - Drought: K-water water-stress impact model.
//! - Sea-level rise: IPCC AR6 WG1 Ch. 9 cumulative projection.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

pub use crate::climate::HazardKind;
use crate::climate::{
    frequency_multiplier, intensity_multiplier, sea_level_rise_mm, warming_at, warming_delta,
};
use crate::config::hazards::{
    drought_baseline_days, drought_interruption_days, flood_gumbel_defaults,
    flood_interruption_days, heatwave_baseline_days, typhoon_annual_frequency, WindCategory,
    CAT45_SHARE_PER_DEGREE, DEPTH_DAMAGE_CEILING, DEPTH_DAMAGE_CURVE, DROUGHT_ASSET_FACTOR,
    FLOOD_RETURN_PERIODS, HEATWAVE_DAYS_PER_DEGREE, HEATWAVE_INDOOR_LOSS_PER_DAY,
    HEATWAVE_OUTDOOR_LOSS_PER_DAY, HEATWAVE_REVENUE_FACTOR, RAINFALL_MM_TO_DEPTH_CM,
    RUNOFF_COEFFICIENT_INDUSTRIAL, SLR_ADAPTATION_FACTOR, SLR_AMORTISATION_YEARS, SLR_DAMAGE_CAP,
    TYPHOON_BI_REVENUE_FRACTION, TYPHOON_REFERENCE_WIND_MS, TYPHOON_SITE_EXPOSURE,
};
use crate::config::{classify_region, sector_params, Region};
use crate::core::{
    validate_facilities, CancelToken, DataSource, Facility, RiskError, RiskLevel, Scenario,
};
use crate::math::{
    annual_exceedance_probability, gumbel_quantile, poisson_at_least_one, GumbelParams,
    PiecewiseLinear,
};
use crate::weather::{WeatherProvider, WeatherStats};

/// EAL / assets threshold for the High bucket.
const HIGH_EAL_FRACTION: f64 = 0.01;

/// EAL / assets threshold for the Medium bucket.
const MEDIUM_EAL_FRACTION: f64 = 0.001;

/// One hazard's assessment for one facility.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HazardAssessment {
    pub hazard_type: HazardKind,
    pub risk_level: RiskLevel,
    /// Annual exceedance probability of the reference event.
    pub probability: f64,
    /// Expected annual loss in currency units, business interruption
    /// included.
    pub potential_loss: f64,
    pub business_interruption_loss: f64,
    pub return_period_years: f64,
    /// Combined climate-change scaling applied; >= 1 by construction.
    pub climate_change_multiplier: f64,
}

/// Per-facility physical-risk result.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FacilityPhysicalResult {
    pub facility_id: String,
    pub facility_name: String,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    pub region: Region,
    pub overall_risk_level: RiskLevel,
    pub hazards: Vec<HazardAssessment>,
    pub total_expected_annual_loss: f64,
    pub data_source: DataSource,
}

/// Portfolio-level physical-risk output.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PhysicalAssessment {
    pub scenario: Scenario,
    pub assessment_year: i32,
    pub warming_above_preindustrial: f64,
    pub total_facilities: usize,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
    pub facilities: Vec<FacilityPhysicalResult>,
    pub warnings: Vec<String>,
}

/// Runs the physical assessment over a facility set.
///
/// When `weather` is `Some`, climate baselines come from the provider
/// (live fetch with fallback); otherwise regional defaults apply and the
/// result is fully deterministic. Facility order in the output matches the
/// input regardless of fan-out.
pub fn assess(
    facilities: &[Facility],
    scenario: Scenario,
    year: i32,
    weather: Option<&dyn WeatherProvider>,
    token: &CancelToken,
) -> Result<PhysicalAssessment, RiskError> {
    if !(2020..=2100).contains(&year) {
        return Err(RiskError::InvalidInput(format!(
            "assessment year {year} outside [2020, 2100]"
        )));
    }
    let mut warnings = validate_facilities(facilities)?;

    let results = run_facilities(facilities, scenario, year, weather, token)?;

    for result in &results {
        if weather.is_some() && result.data_source == DataSource::HardcodedConfig {
            warnings.push(format!(
                "live weather unavailable for ({:.2}, {:.2}); facility `{}` assessed from \
                 regional defaults",
                result.latitude, result.longitude, result.facility_id
            ));
        }
    }

    let mut high_risk_count = 0;
    let mut medium_risk_count = 0;
    let mut low_risk_count = 0;
    for result in &results {
        match result.overall_risk_level {
            RiskLevel::High => high_risk_count += 1,
            RiskLevel::Medium => medium_risk_count += 1,
            RiskLevel::Low => low_risk_count += 1,
        }
    }

    Ok(PhysicalAssessment {
        scenario,
        assessment_year: year,
        warming_above_preindustrial: warming_at(scenario, year),
        total_facilities: results.len(),
        high_risk_count,
        medium_risk_count,
        low_risk_count,
        facilities: results,
        warnings,
    })
}

#[cfg(feature = "parallel")]
fn run_facilities(
    facilities: &[Facility],
    scenario: Scenario,
    year: i32,
    weather: Option<&dyn WeatherProvider>,
    token: &CancelToken,
) -> Result<Vec<FacilityPhysicalResult>, RiskError> {
    facilities
        .par_iter()
        .map(|facility| {
            token.checkpoint()?;
            Ok(assess_facility(facility, scenario, year, weather))
        })
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn run_facilities(
    facilities: &[Facility],
    scenario: Scenario,
    year: i32,
    weather: Option<&dyn WeatherProvider>,
    token: &CancelToken,
) -> Result<Vec<FacilityPhysicalResult>, RiskError> {
    facilities
        .iter()
        .map(|facility| {
            token.checkpoint()?;
            Ok(assess_facility(facility, scenario, year, weather))
        })
        .collect()
}

fn assess_facility(
    facility: &Facility,
    scenario: Scenario,
    year: i32,
    weather: Option<&dyn WeatherProvider>,
) -> FacilityPhysicalResult {
    let region = classify_region(facility.latitude, facility.longitude);
    let stats = weather
        .map(|provider| provider.fetch_stats(facility.latitude, facility.longitude))
        .unwrap_or_else(|| WeatherStats::fallback(region));

    let hazards = vec![
        flood_model(facility, region, scenario, year, &stats),
        typhoon_model(facility, region, scenario, year, &stats),
        heatwave_model(facility, region, scenario, year, &stats),
        drought_model(facility, region, scenario, year, &stats),
        sea_level_rise_model(facility, region, scenario, year),
    ];

    let total_expected_annual_loss = hazards.iter().map(|h| h.potential_loss).sum();
    let overall_risk_level = hazards
        .iter()
        .map(|h| h.risk_level)
        .max()
        .unwrap_or(RiskLevel::Low);

    FacilityPhysicalResult {
        facility_id: facility.facility_id.clone(),
        facility_name: facility.name.clone(),
        location: facility.location.clone(),
        latitude: facility.latitude,
        longitude: facility.longitude,
        region,
        overall_risk_level,
        hazards,
        total_expected_annual_loss,
        data_source: stats.source,
    }
}

fn eal_risk_level(eal: f64, assets: f64) -> RiskLevel {
    if assets <= 0.0 {
        return RiskLevel::Low;
    }
    let ratio = eal / assets;
    if ratio > HIGH_EAL_FRACTION {
        RiskLevel::High
    } else if ratio > MEDIUM_EAL_FRACTION {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Damage fraction for a ponded depth, from the USACE-style curve with its
/// flat ceiling.
fn depth_damage_fraction(depth_cm: f64) -> f64 {
    let curve = PiecewiseLinear::from_points(&DEPTH_DAMAGE_CURVE)
        .expect("depth-damage curve is a valid static table");
    curve.value(depth_cm).clamp(0.0, DEPTH_DAMAGE_CEILING)
}

/// Gumbel rainfall extremes, runoff-converted ponding depth, depth-damage
/// loss, probability-band EAL integration over the return-period ladder.
fn flood_model(
    facility: &Facility,
    region: Region,
    scenario: Scenario,
    year: i32,
    stats: &WeatherStats,
) -> HazardAssessment {
    let gumbel = if stats.source == DataSource::OpenMeteoApi {
        stats.gumbel
    } else {
        let (location, scale) = flood_gumbel_defaults(region);
        GumbelParams { location, scale }
    };

    let freq_mult = frequency_multiplier(HazardKind::Flood, scenario, year);
    let intensity_mult = intensity_multiplier(HazardKind::Flood, scenario, year);

    let mut eal = 0.0;
    let mut bi_eal = 0.0;
    for (i, base_period) in FLOOD_RETURN_PERIODS.iter().enumerate() {
        let next_period = FLOOD_RETURN_PERIODS
            .get(i + 1)
            .copied()
            .unwrap_or(base_period * 3.0);
        let adjusted_period = base_period / freq_mult;

        let rainfall_mm = gumbel_quantile(gumbel, adjusted_period)
            .map(|q| q * intensity_mult)
            .unwrap_or(gumbel.location);
        let depth_cm = rainfall_mm * RUNOFF_COEFFICIENT_INDUSTRIAL * RAINFALL_MM_TO_DEPTH_CM;

        let direct_loss = facility.assets_value * depth_damage_fraction(depth_cm);
        let bi_loss = facility.daily_revenue() * flood_interruption_days(depth_cm);

        let band_probability = 1.0 / base_period - 1.0 / next_period;
        eal += (direct_loss + bi_loss) * band_probability;
        bi_eal += bi_loss * band_probability;
    }

    let reference_period = FLOOD_RETURN_PERIODS[2] / freq_mult;
    HazardAssessment {
        hazard_type: HazardKind::Flood,
        risk_level: eal_risk_level(eal, facility.assets_value),
        probability: annual_exceedance_probability(FLOOD_RETURN_PERIODS[0] / freq_mult),
        potential_loss: eal,
        business_interruption_loss: bi_eal,
        return_period_years: reference_period,
        climate_change_multiplier: freq_mult * intensity_mult,
    }
}

/// Poisson strike frequency with a warming-shifted HAZUS category mix.
fn typhoon_model(
    facility: &Facility,
    region: Region,
    scenario: Scenario,
    year: i32,
    stats: &WeatherStats,
) -> HazardAssessment {
    let mut base_frequency = typhoon_annual_frequency(region);
    if let Some(wind) = stats.wind_annual_max_ms {
        // Live wind baseline nudges the strike frequency by at most 20%.
        let adjustment = (wind / TYPHOON_REFERENCE_WIND_MS).clamp(0.8, 1.2);
        base_frequency *= adjustment;
    }

    let freq_mult = frequency_multiplier(HazardKind::Typhoon, scenario, year);
    let lambda = base_frequency * freq_mult;
    let delta_t = warming_delta(scenario, year);

    // Shift landfall probability mass toward Cat 4-5 as the climate warms.
    let mut dist: Vec<(WindCategory, f64)> = WindCategory::ALL
        .into_iter()
        .map(|c| (c, c.landfall_probability()))
        .collect();
    let low_total = dist[0].1 + dist[1].1;
    let high_total = dist[2].1 + dist[3].1 + dist[4].1;
    let shift = (CAT45_SHARE_PER_DEGREE * delta_t * high_total).min(low_total * 0.3);
    dist[0].1 -= shift * 0.6;
    dist[1].1 -= shift * 0.4;
    dist[3].1 += shift * 0.6;
    dist[4].1 += shift * 0.4;

    let mean_damage_rate: f64 = dist.iter().map(|(c, p)| p * c.damage_rate()).sum();

    let direct_eal = lambda * mean_damage_rate * TYPHOON_SITE_EXPOSURE * facility.assets_value;
    let bi_eal = lambda * TYPHOON_BI_REVENUE_FRACTION * facility.annual_revenue;
    let eal = direct_eal + bi_eal;

    let return_period = if lambda > 0.0 { 1.0 / lambda } else { 999.0 };
    HazardAssessment {
        hazard_type: HazardKind::Typhoon,
        risk_level: eal_risk_level(eal, facility.assets_value),
        probability: poisson_at_least_one(lambda),
        potential_loss: eal,
        business_interruption_loss: bi_eal,
        return_period_years: return_period,
        climate_change_multiplier: freq_mult,
    }
}

/// Chronic productivity loss from heatwave days.
fn heatwave_model(
    facility: &Facility,
    region: Region,
    scenario: Scenario,
    year: i32,
    stats: &WeatherStats,
) -> HazardAssessment {
    let base_days = stats
        .heatwave_days
        .unwrap_or_else(|| heatwave_baseline_days(region));
    let delta_t = warming_delta(scenario, year);
    let days = base_days + HEATWAVE_DAYS_PER_DEGREE * delta_t;

    let params = sector_params(&facility.sector);
    let productivity_factor = params.outdoor_share * HEATWAVE_OUTDOOR_LOSS_PER_DAY
        + (1.0 - params.outdoor_share) * HEATWAVE_INDOOR_LOSS_PER_DAY;

    let loss = days * productivity_factor * facility.annual_revenue * HEATWAVE_REVENUE_FACTOR;

    HazardAssessment {
        hazard_type: HazardKind::Heatwave,
        risk_level: eal_risk_level(loss, facility.assets_value),
        probability: (days / 365.0).min(1.0),
        potential_loss: loss,
        business_interruption_loss: loss,
        // Chronic, recurs annually.
        return_period_years: 1.0,
        climate_change_multiplier: (days / base_days.max(1.0)).max(1.0),
    }
}

/// Water-stress production curtailment.
fn drought_model(
    facility: &Facility,
    region: Region,
    scenario: Scenario,
    year: i32,
    stats: &WeatherStats,
) -> HazardAssessment {
    let base_days = stats
        .drought_index_days
        .unwrap_or_else(|| drought_baseline_days(region));
    let freq_mult = frequency_multiplier(HazardKind::Drought, scenario, year);
    let stress_days = base_days * freq_mult;

    let params = sector_params(&facility.sector);
    let asset_loss =
        facility.assets_value * DROUGHT_ASSET_FACTOR * params.water_intensity * freq_mult;
    let bi_loss =
        drought_interruption_days(stress_days) * facility.daily_revenue() * params.water_intensity;
    let eal = asset_loss + bi_loss;

    let return_period = 365.0 / stress_days.max(1.0);
    HazardAssessment {
        hazard_type: HazardKind::Drought,
        risk_level: eal_risk_level(eal, facility.assets_value),
        probability: (stress_days / 365.0).min(1.0),
        potential_loss: eal,
        business_interruption_loss: bi_loss,
        return_period_years: return_period,
        climate_change_multiplier: freq_mult,
    }
}

/// Chronic coastal inundation from cumulative sea-level rise. Inland
/// facilities carry a zero-loss assessment.
fn sea_level_rise_model(
    facility: &Facility,
    region: Region,
    scenario: Scenario,
    year: i32,
) -> HazardAssessment {
    let slr_mm = sea_level_rise_mm(scenario, year);
    let coastal = facility.coastal.unwrap_or_else(|| region.is_coastal());

    if !coastal {
        return HazardAssessment {
            hazard_type: HazardKind::SeaLevelRise,
            risk_level: RiskLevel::Low,
            probability: (slr_mm / 10_000.0).min(1.0),
            potential_loss: 0.0,
            business_interruption_loss: 0.0,
            return_period_years: 999.0,
            climate_change_multiplier: 1.0,
        };
    }

    let slr_cm = slr_mm / 10.0;
    let damage_fraction =
        (depth_damage_fraction(slr_cm) * SLR_ADAPTATION_FACTOR).min(SLR_DAMAGE_CAP);
    let annual_loss = facility.assets_value * damage_fraction / SLR_AMORTISATION_YEARS;

    let reference = sea_level_rise_mm(Scenario::CurrentPolicies, year);
    let multiplier = if reference > 0.0 {
        (slr_mm / reference).max(1.0)
    } else {
        1.0
    };

    HazardAssessment {
        hazard_type: HazardKind::SeaLevelRise,
        risk_level: eal_risk_level(annual_loss, facility.assets_value),
        probability: (slr_cm / 100.0).min(1.0),
        potential_loss: annual_loss,
        business_interruption_loss: 0.0,
        return_period_years: 1.0,
        climate_change_multiplier: multiplier,
    }
}
