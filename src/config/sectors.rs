//! Sector parameter sets for the ten canonical sectors plus the default
//! fallback applied to unrecognised tags.
//!
//! Sources:
//! - Energy cost shares: IEA Energy Efficiency Indicators (2023);
//!   WorldSteel (2022); GCCA (2023).
//! - Cost pass-through and demand elasticities: Demailly and Quirion
//!   (2008); Reinaud (2008), IEA.
//! - Scope 3 exposure: CDP Supply Chain Report (2023).
//! - Technology learning rates: IEA ETP 2023; IRENA (2023).
//! - Stranded-asset write-down rates: Carbon Tracker Initiative (2023),
//!   "Unburnable Carbon"; nonzero only for carbon-intensive sectors.
//! - K-ETS allocation: Ministry of Environment, 3rd/4th planning-period
//!   allocation plans (EITE sectors 97%, power 90%).
//! - Outdoor work shares: ILO (2019), "Working on a Warmer Planet".
//! - Water intensities: K-water National Water Resources Plan (2021).

use crate::core::Sector;

use super::hazards::Region;

/// Per-sector calibration consumed by the engines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SectorParams {
    /// Energy spend as a fraction of revenue.
    pub energy_cost_share: f64,
    /// Fraction of a cost increase passed through to customers.
    pub cost_passthrough: f64,
    /// Demand response to passed-through price increases.
    pub demand_elasticity: f64,
    /// Fraction of scope-3 carbon cost that lands on the company.
    pub scope3_exposure: f64,
    /// Annual clean-technology cost decline rate.
    pub learning_rate: f64,
    /// Annual stranded-asset write-down as a fraction of asset value;
    /// zero outside carbon-intensive sectors.
    pub stranded_rate: f64,
    /// K-ETS base-year free-allocation fraction.
    pub kets_base_allocation: f64,
    /// Annual tightening of the free-allocation fraction.
    pub kets_tightening: f64,
    /// Share of work performed outdoors (heatwave sensitivity).
    pub outdoor_share: f64,
    /// Production sensitivity to water stress (drought sensitivity).
    pub water_intensity: f64,
    /// Annual structural demand-shift rate under ambitious scenarios.
    pub structural_shift: f64,
    /// Region assumed when coordinates are absent or implausible.
    pub default_region: Region,
}

const STEEL: SectorParams = SectorParams {
    energy_cost_share: 0.25,
    cost_passthrough: 0.40,
    demand_elasticity: 0.10,
    scope3_exposure: 0.08,
    learning_rate: 0.03,
    stranded_rate: 0.005,
    kets_base_allocation: 0.97,
    kets_tightening: 0.010,
    outdoor_share: 0.30,
    water_intensity: 0.15,
    structural_shift: 0.005,
    default_region: Region::CoastalEast,
};

const PETROCHEMICAL: SectorParams = SectorParams {
    energy_cost_share: 0.20,
    cost_passthrough: 0.45,
    demand_elasticity: 0.08,
    scope3_exposure: 0.15,
    learning_rate: 0.02,
    stranded_rate: 0.0,
    kets_base_allocation: 0.95,
    kets_tightening: 0.012,
    outdoor_share: 0.25,
    water_intensity: 0.12,
    structural_shift: 0.008,
    default_region: Region::CoastalSouth,
};

const CEMENT: SectorParams = SectorParams {
    energy_cost_share: 0.30,
    cost_passthrough: 0.60,
    demand_elasticity: 0.12,
    scope3_exposure: 0.06,
    learning_rate: 0.02,
    stranded_rate: 0.004,
    kets_base_allocation: 0.97,
    kets_tightening: 0.010,
    outdoor_share: 0.35,
    water_intensity: 0.05,
    structural_shift: 0.0,
    default_region: Region::Mountain,
};

const UTILITIES: SectorParams = SectorParams {
    energy_cost_share: 0.40,
    cost_passthrough: 0.80,
    demand_elasticity: 0.20,
    scope3_exposure: 0.05,
    learning_rate: 0.02,
    stranded_rate: 0.010,
    kets_base_allocation: 0.90,
    kets_tightening: 0.015,
    outdoor_share: 0.40,
    water_intensity: 0.20,
    structural_shift: 0.015,
    default_region: Region::CoastalWest,
};

const OIL_GAS: SectorParams = SectorParams {
    energy_cost_share: 0.15,
    cost_passthrough: 0.50,
    demand_elasticity: 0.15,
    scope3_exposure: 0.25,
    learning_rate: 0.02,
    stranded_rate: 0.008,
    kets_base_allocation: 0.93,
    kets_tightening: 0.013,
    outdoor_share: 0.35,
    water_intensity: 0.10,
    structural_shift: 0.020,
    default_region: Region::CoastalEast,
};

const SHIPPING: SectorParams = SectorParams {
    energy_cost_share: 0.35,
    cost_passthrough: 0.35,
    demand_elasticity: 0.15,
    scope3_exposure: 0.10,
    learning_rate: 0.02,
    stranded_rate: 0.0,
    kets_base_allocation: 0.95,
    kets_tightening: 0.010,
    outdoor_share: 0.50,
    water_intensity: 0.03,
    structural_shift: 0.010,
    default_region: Region::CoastalSouth,
};

const AUTOMOTIVE: SectorParams = SectorParams {
    energy_cost_share: 0.08,
    cost_passthrough: 0.30,
    demand_elasticity: 0.30,
    scope3_exposure: 0.20,
    learning_rate: 0.04,
    stranded_rate: 0.0,
    kets_base_allocation: 0.90,
    kets_tightening: 0.015,
    outdoor_share: 0.15,
    water_intensity: 0.06,
    structural_shift: 0.0,
    default_region: Region::InlandCentral,
};

const ELECTRONICS: SectorParams = SectorParams {
    energy_cost_share: 0.10,
    cost_passthrough: 0.25,
    demand_elasticity: 0.05,
    scope3_exposure: 0.08,
    learning_rate: 0.03,
    stranded_rate: 0.0,
    kets_base_allocation: 0.92,
    kets_tightening: 0.012,
    outdoor_share: 0.05,
    water_intensity: 0.18,
    structural_shift: 0.0,
    default_region: Region::InlandCentral,
};

const REAL_ESTATE: SectorParams = SectorParams {
    energy_cost_share: 0.12,
    cost_passthrough: 0.70,
    demand_elasticity: 0.05,
    scope3_exposure: 0.04,
    learning_rate: 0.03,
    stranded_rate: 0.0,
    kets_base_allocation: 0.85,
    kets_tightening: 0.020,
    outdoor_share: 0.20,
    water_intensity: 0.03,
    structural_shift: 0.0,
    default_region: Region::InlandCentral,
};

const FINANCIAL: SectorParams = SectorParams {
    energy_cost_share: 0.03,
    cost_passthrough: 0.60,
    demand_elasticity: 0.02,
    scope3_exposure: 0.03,
    learning_rate: 0.03,
    stranded_rate: 0.0,
    kets_base_allocation: 0.80,
    kets_tightening: 0.020,
    outdoor_share: 0.02,
    water_intensity: 0.01,
    structural_shift: 0.0,
    default_region: Region::InlandCentral,
};

/// Fallback parameters for unrecognised sector tags.
const DEFAULT: SectorParams = SectorParams {
    energy_cost_share: 0.10,
    cost_passthrough: 0.50,
    demand_elasticity: 0.15,
    scope3_exposure: 0.05,
    learning_rate: 0.02,
    stranded_rate: 0.0,
    kets_base_allocation: 0.90,
    kets_tightening: 0.015,
    outdoor_share: 0.15,
    water_intensity: 0.05,
    structural_shift: 0.0,
    default_region: Region::InlandCentral,
};

/// Parameter set for a sector; unknown sectors get the default fallback.
pub fn sector_params(sector: &Sector) -> &'static SectorParams {
    match sector {
        Sector::Steel => &STEEL,
        Sector::Petrochemical => &PETROCHEMICAL,
        Sector::Cement => &CEMENT,
        Sector::Utilities => &UTILITIES,
        Sector::OilGas => &OIL_GAS,
        Sector::Shipping => &SHIPPING,
        Sector::Automotive => &AUTOMOTIVE,
        Sector::Electronics => &ELECTRONICS,
        Sector::RealEstate => &REAL_ESTATE,
        Sector::Financial => &FINANCIAL,
        Sector::Unknown(_) => &DEFAULT,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_stay_in_unit_interval() {
        for sector in Sector::CANONICAL {
            let p = sector_params(&sector);
            for value in [
                p.energy_cost_share,
                p.cost_passthrough,
                p.demand_elasticity,
                p.scope3_exposure,
                p.learning_rate,
                p.stranded_rate,
                p.kets_base_allocation,
                p.kets_tightening,
                p.outdoor_share,
                p.water_intensity,
                p.structural_shift,
            ] {
                assert!((0.0..=1.0).contains(&value), "{sector}: {value}");
            }
        }
    }

    #[test]
    fn stranded_rates_are_confined_to_carbon_intensive_sectors() {
        let stranded: Vec<Sector> = Sector::CANONICAL
            .into_iter()
            .filter(|s| sector_params(s).stranded_rate > 0.0)
            .collect();
        assert_eq!(
            stranded,
            vec![
                Sector::Steel,
                Sector::Cement,
                Sector::Utilities,
                Sector::OilGas
            ]
        );
    }

    #[test]
    fn unknown_sector_maps_to_default() {
        let p = sector_params(&Sector::parse("kelp_farming"));
        assert_eq!(p, &DEFAULT);
        assert_eq!(p.stranded_rate, 0.0);
    }
}
