//! Korean physical-hazard tables: regional climate statistics, damage
//! curves, and business-interruption parameters.
//!
//! Sources:
//! - Gumbel parameters: KMA 30-year statistical analysis (1991-2020),
//!   fitted by region cluster.
//! - Typhoon direct-strike frequencies: KMA National Typhoon Center
//!   (1951-2023); direct strike = centre within 200 km.
//! - Heatwave baselines: KMA Climate Change Scenario Report (2020);
//!   threshold 33 deg C.
//! - Drought baselines: K-water National Water Resources Plan 2021-2030.
//! - Depth-damage curve: USACE depth-damage functions adapted for Korean
//!   industrial facilities (Kim and Lee 2019), flat ceiling at 0.6.
//! - Wind damage: FEMA HAZUS-MH category curves; landfall category
//!   distribution conditional on direct strike, KMA NTC.
//! - Business interruption: Munich Re NatCatSERVICE (2023); Swiss Re
//!   sigma 1/2023.

/// Korean climate region band.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Busan, Yeosu, Gwangyang.
    CoastalSouth,
    /// Pohang, Ulsan.
    CoastalEast,
    /// Incheon, Dangjin, Taean.
    CoastalWest,
    /// Hwaseong, Pyeongtaek, Asan.
    InlandCentral,
    /// Gumi basin.
    InlandSouth,
    /// Danyang, Yeongwol.
    Mountain,
}

impl Region {
    pub fn is_coastal(self) -> bool {
        matches!(
            self,
            Region::CoastalSouth | Region::CoastalEast | Region::CoastalWest
        )
    }
}

/// Classifies coordinates into the six KMA climate districts.
pub fn classify_region(latitude: f64, longitude: f64) -> Region {
    if latitude < 35.2 {
        if longitude > 128.5 {
            return Region::CoastalEast;
        }
        return Region::CoastalSouth;
    }
    if longitude >= 129.0 {
        return Region::CoastalEast;
    }
    if longitude < 126.7 {
        return Region::CoastalWest;
    }
    if latitude > 36.5 && longitude > 128.0 {
        return Region::Mountain;
    }
    if latitude < 36.5 && longitude > 127.5 {
        return Region::InlandSouth;
    }
    Region::InlandCentral
}

/// Gumbel (location mm, scale mm) for annual-maximum daily precipitation.
pub fn flood_gumbel_defaults(region: Region) -> (f64, f64) {
    match region {
        Region::CoastalSouth => (220.0, 55.0),
        Region::CoastalEast => (200.0, 50.0),
        Region::CoastalWest => (180.0, 48.0),
        Region::InlandCentral => (160.0, 42.0),
        Region::InlandSouth => (175.0, 45.0),
        Region::Mountain => (150.0, 38.0),
    }
}

/// Annual typhoon direct-strike frequency (events/year).
pub fn typhoon_annual_frequency(region: Region) -> f64 {
    match region {
        Region::CoastalSouth => 1.8,
        Region::CoastalEast => 1.2,
        Region::CoastalWest => 0.8,
        Region::InlandCentral => 0.3,
        Region::InlandSouth => 0.5,
        Region::Mountain => 0.2,
    }
}

/// Baseline annual days above 33 deg C (1991-2020 average).
pub fn heatwave_baseline_days(region: Region) -> f64 {
    match region {
        Region::CoastalSouth => 12.0,
        Region::CoastalEast => 10.0,
        Region::CoastalWest => 14.0,
        Region::InlandCentral => 16.0,
        Region::InlandSouth => 18.0,
        Region::Mountain => 6.0,
    }
}

/// Baseline annual industrial water-stress days.
pub fn drought_baseline_days(region: Region) -> f64 {
    match region {
        Region::CoastalSouth => 15.0,
        Region::CoastalEast => 20.0,
        Region::CoastalWest => 18.0,
        Region::InlandCentral => 22.0,
        Region::InlandSouth => 25.0,
        Region::Mountain => 12.0,
    }
}

/// Additional heatwave days per deg C of warming above the 2020 baseline
/// (IPCC AR6 WG1 Ch. 11; mid-range for East Asian mid-latitudes).
pub const HEATWAVE_DAYS_PER_DEGREE: f64 = 4.0;

/// Depth (cm) to damage fraction for industrial structures; the curve is
/// monotone with a flat ceiling at [`DEPTH_DAMAGE_CEILING`].
pub const DEPTH_DAMAGE_CURVE: [(f64, f64); 8] = [
    (0.0, 0.0),
    (10.0, 0.03),
    (30.0, 0.08),
    (50.0, 0.15),
    (100.0, 0.30),
    (150.0, 0.45),
    (200.0, 0.58),
    (300.0, 0.60),
];

/// Hard cap on flood damage fraction.
pub const DEPTH_DAMAGE_CEILING: f64 = 0.6;

/// Runoff coefficient for heavily impervious industrial sites (MOLIT urban
/// drainage design standard, 2019).
pub const RUNOFF_COEFFICIENT_INDUSTRIAL: f64 = 0.80;

/// mm of rainfall to cm of ponded depth after drainage.
pub const RAINFALL_MM_TO_DEPTH_CM: f64 = 0.1;

/// Return periods (years) for the discrete EAL integration.
pub const FLOOD_RETURN_PERIODS: [f64; 7] = [5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0];

/// Saffir-Simpson-style wind category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WindCategory {
    Cat1,
    Cat2,
    Cat3,
    Cat4,
    Cat5,
}

impl WindCategory {
    pub const ALL: [WindCategory; 5] = [
        WindCategory::Cat1,
        WindCategory::Cat2,
        WindCategory::Cat3,
        WindCategory::Cat4,
        WindCategory::Cat5,
    ];

    /// HAZUS-MH damage fraction at this category's wind band.
    pub fn damage_rate(self) -> f64 {
        match self {
            Self::Cat1 => 0.05,
            Self::Cat2 => 0.12,
            Self::Cat3 => 0.25,
            Self::Cat4 => 0.45,
            Self::Cat5 => 0.65,
        }
    }

    /// Landfall probability conditional on a direct strike (KMA NTC
    /// 1951-2023).
    pub fn landfall_probability(self) -> f64 {
        match self {
            Self::Cat1 => 0.45,
            Self::Cat2 => 0.30,
            Self::Cat3 => 0.18,
            Self::Cat4 => 0.06,
            Self::Cat5 => 0.01,
        }
    }

    /// Business-interruption days per strike of this category.
    pub fn interruption_days(self) -> f64 {
        match self {
            Self::Cat1 => 3.0,
            Self::Cat2 => 7.0,
            Self::Cat3 => 15.0,
            Self::Cat4 => 30.0,
            Self::Cat5 => 60.0,
        }
    }
}

/// Increase in the Cat 4-5 share of strikes per deg C of warming
/// (IPCC AR6).
pub const CAT45_SHARE_PER_DEGREE: f64 = 0.13;

/// Fraction of a 200 km-radius direct strike that delivers design-level
/// winds at a specific site.
pub const TYPHOON_SITE_EXPOSURE: f64 = 0.10;

/// Business interruption per strike as a fraction of annual revenue.
pub const TYPHOON_BI_REVENUE_FRACTION: f64 = 0.03;

/// Reference Korean annual-maximum wind speed for live-data frequency
/// adjustment, m/s.
pub const TYPHOON_REFERENCE_WIND_MS: f64 = 25.0;

/// Flood business-interruption days by inundation depth class.
pub fn flood_interruption_days(depth_cm: f64) -> f64 {
    if depth_cm < 30.0 {
        5.0
    } else if depth_cm < 100.0 {
        15.0
    } else if depth_cm < 200.0 {
        45.0
    } else {
        90.0
    }
}

/// Drought business-interruption days by annual stress-day count.
pub fn drought_interruption_days(stress_days: f64) -> f64 {
    if stress_days < 20.0 {
        3.0
    } else if stress_days < 35.0 {
        10.0
    } else {
        25.0
    }
}

/// Lost working days per heatwave day for outdoor work.
pub const HEATWAVE_OUTDOOR_LOSS_PER_DAY: f64 = 0.3;

/// Lost working days per heatwave day for indoor work.
pub const HEATWAVE_INDOOR_LOSS_PER_DAY: f64 = 0.05;

/// Revenue loss per weighted heatwave day.
pub const HEATWAVE_REVENUE_FACTOR: f64 = 0.004;

/// Drought loss intensity as a fraction of asset value before sector water
/// intensity and climate scaling.
pub const DROUGHT_ASSET_FACTOR: f64 = 0.016;

/// Fraction of chronic sea-level-rise inundation damage that materialises
/// after adaptation.
pub const SLR_ADAPTATION_FACTOR: f64 = 0.3;

/// Cap on the chronic sea-level-rise damage fraction.
pub const SLR_DAMAGE_CAP: f64 = 0.5;

/// Amortisation horizon in years for chronic coastal losses.
pub const SLR_AMORTISATION_YEARS: f64 = 30.0;
