//! Seed dataset: 17 stylised Korean industrial facilities.
//!
//! The records model major Korean industrial sites; financial figures are
//! illustrative approximations of sector-typical ratios (steel ~15% EBITDA
//! margin per POSCO 2023 reporting, electronics ~30% per Samsung
//! Electronics 2023, regulated coal utilities ~10%), not actual reported
//! values. Scope 3 figures understate use-phase emissions for automotive.

use crate::core::{Facility, Sector};

struct Seed {
    facility_id: &'static str,
    name: &'static str,
    company: &'static str,
    sector: Sector,
    location: &'static str,
    latitude: f64,
    longitude: f64,
    scope1: f64,
    scope2: f64,
    scope3: f64,
    revenue: f64,
    ebitda: f64,
    assets: f64,
}

const SEEDS: [Seed; 17] = [
    Seed {
        facility_id: "KR-STL-001",
        name: "Pohang Steelworks",
        company: "K-Steel Corp",
        sector: Sector::Steel,
        location: "Pohang, North Gyeongsang",
        latitude: 36.0190,
        longitude: 129.3435,
        scope1: 28_000_000.0,
        scope2: 5_200_000.0,
        scope3: 8_400_000.0,
        revenue: 32_000_000_000.0,
        ebitda: 4_800_000_000.0,
        assets: 25_000_000_000.0,
    },
    Seed {
        facility_id: "KR-STL-002",
        name: "Gwangyang Steelworks",
        company: "K-Steel Corp",
        sector: Sector::Steel,
        location: "Gwangyang, South Jeolla",
        latitude: 34.9407,
        longitude: 127.6959,
        scope1: 24_000_000.0,
        scope2: 4_600_000.0,
        scope3: 7_200_000.0,
        revenue: 28_000_000_000.0,
        ebitda: 4_200_000_000.0,
        assets: 22_000_000_000.0,
    },
    Seed {
        facility_id: "KR-PCH-001",
        name: "Ulsan Petrochemical Complex",
        company: "K-Petrochem Inc",
        sector: Sector::Petrochemical,
        location: "Nam-gu, Ulsan",
        latitude: 35.5384,
        longitude: 129.3114,
        scope1: 12_000_000.0,
        scope2: 3_800_000.0,
        scope3: 18_000_000.0,
        revenue: 45_000_000_000.0,
        ebitda: 5_400_000_000.0,
        assets: 20_000_000_000.0,
    },
    Seed {
        facility_id: "KR-PCH-002",
        name: "Yeosu Petrochemical Complex",
        company: "K-Petrochem Inc",
        sector: Sector::Petrochemical,
        location: "Yeosu, South Jeolla",
        latitude: 34.7604,
        longitude: 127.6622,
        scope1: 9_500_000.0,
        scope2: 2_900_000.0,
        scope3: 14_000_000.0,
        revenue: 38_000_000_000.0,
        ebitda: 4_560_000_000.0,
        assets: 17_000_000_000.0,
    },
    Seed {
        facility_id: "KR-AUT-001",
        name: "Ulsan Motor Plant",
        company: "K-Motors Co",
        sector: Sector::Automotive,
        location: "Buk-gu, Ulsan",
        latitude: 35.5825,
        longitude: 129.3612,
        scope1: 1_800_000.0,
        scope2: 2_200_000.0,
        scope3: 15_000_000.0,
        revenue: 55_000_000_000.0,
        ebitda: 6_600_000_000.0,
        assets: 18_000_000_000.0,
    },
    Seed {
        facility_id: "KR-AUT-002",
        name: "Asan Motor Plant",
        company: "K-Motors Co",
        sector: Sector::Automotive,
        location: "Asan, South Chungcheong",
        latitude: 36.7898,
        longitude: 127.0018,
        scope1: 950_000.0,
        scope2: 1_100_000.0,
        scope3: 8_500_000.0,
        revenue: 28_000_000_000.0,
        ebitda: 3_360_000_000.0,
        assets: 10_000_000_000.0,
    },
    Seed {
        facility_id: "KR-ELC-001",
        name: "Hwaseong Semiconductor Fab",
        company: "K-Electronics Ltd",
        sector: Sector::Electronics,
        location: "Hwaseong, Gyeonggi",
        latitude: 37.2064,
        longitude: 127.0714,
        scope1: 3_200_000.0,
        scope2: 8_500_000.0,
        scope3: 5_600_000.0,
        revenue: 120_000_000_000.0,
        ebitda: 36_000_000_000.0,
        assets: 80_000_000_000.0,
    },
    Seed {
        facility_id: "KR-ELC-002",
        name: "Pyeongtaek Semiconductor Fab",
        company: "K-Electronics Ltd",
        sector: Sector::Electronics,
        location: "Pyeongtaek, Gyeonggi",
        latitude: 36.9922,
        longitude: 127.0892,
        scope1: 2_800_000.0,
        scope2: 7_200_000.0,
        scope3: 4_800_000.0,
        revenue: 95_000_000_000.0,
        ebitda: 28_500_000_000.0,
        assets: 65_000_000_000.0,
    },
    Seed {
        facility_id: "KR-ELC-003",
        name: "Gumi Display Plant",
        company: "K-Display Corp",
        sector: Sector::Electronics,
        location: "Gumi, North Gyeongsang",
        latitude: 36.1198,
        longitude: 128.3444,
        scope1: 1_500_000.0,
        scope2: 4_200_000.0,
        scope3: 3_100_000.0,
        revenue: 42_000_000_000.0,
        ebitda: 5_040_000_000.0,
        assets: 28_000_000_000.0,
    },
    Seed {
        facility_id: "KR-UTL-001",
        name: "Dangjin Thermal Power Station",
        company: "K-Power Corp",
        sector: Sector::Utilities,
        location: "Dangjin, South Chungcheong",
        latitude: 36.8898,
        longitude: 126.6294,
        scope1: 18_000_000.0,
        scope2: 500_000.0,
        scope3: 2_200_000.0,
        revenue: 8_000_000_000.0,
        ebitda: 800_000_000.0,
        assets: 12_000_000_000.0,
    },
    Seed {
        facility_id: "KR-UTL-002",
        name: "Taean Thermal Power Station",
        company: "K-Power Corp",
        sector: Sector::Utilities,
        location: "Taean, South Chungcheong",
        latitude: 36.7450,
        longitude: 126.2969,
        scope1: 15_000_000.0,
        scope2: 400_000.0,
        scope3: 1_800_000.0,
        revenue: 6_500_000_000.0,
        ebitda: 650_000_000.0,
        assets: 9_500_000_000.0,
    },
    Seed {
        facility_id: "KR-UTL-003",
        name: "Yeongheung Thermal Power Station",
        company: "K-Power Corp",
        sector: Sector::Utilities,
        location: "Ongjin, Incheon",
        latitude: 37.2500,
        longitude: 126.4833,
        scope1: 12_000_000.0,
        scope2: 350_000.0,
        scope3: 1_500_000.0,
        revenue: 5_200_000_000.0,
        ebitda: 520_000_000.0,
        assets: 8_000_000_000.0,
    },
    Seed {
        facility_id: "KR-CMT-001",
        name: "Danyang Cement Works",
        company: "K-Cement Corp",
        sector: Sector::Cement,
        location: "Danyang, North Chungcheong",
        latitude: 36.9847,
        longitude: 128.3654,
        scope1: 6_500_000.0,
        scope2: 1_200_000.0,
        scope3: 2_800_000.0,
        revenue: 3_800_000_000.0,
        ebitda: 760_000_000.0,
        assets: 5_000_000_000.0,
    },
    Seed {
        facility_id: "KR-CMT-002",
        name: "Yeongwol Cement Works",
        company: "K-Cement Corp",
        sector: Sector::Cement,
        location: "Yeongwol, Gangwon",
        latitude: 37.1839,
        longitude: 128.4617,
        scope1: 5_200_000.0,
        scope2: 980_000.0,
        scope3: 2_200_000.0,
        revenue: 3_000_000_000.0,
        ebitda: 600_000_000.0,
        assets: 4_000_000_000.0,
    },
    Seed {
        facility_id: "KR-SHP-001",
        name: "Busan Shipping Terminal",
        company: "K-Shipping Lines",
        sector: Sector::Shipping,
        location: "Yeongdo-gu, Busan",
        latitude: 35.0756,
        longitude: 129.0681,
        scope1: 4_200_000.0,
        scope2: 350_000.0,
        scope3: 6_800_000.0,
        revenue: 12_000_000_000.0,
        ebitda: 1_440_000_000.0,
        assets: 8_500_000_000.0,
    },
    Seed {
        facility_id: "KR-OG-001",
        name: "Ulsan Refinery",
        company: "K-Refinery Corp",
        sector: Sector::OilGas,
        location: "Ulju, Ulsan",
        latitude: 35.4929,
        longitude: 129.2278,
        scope1: 8_500_000.0,
        scope2: 2_100_000.0,
        scope3: 22_000_000.0,
        revenue: 52_000_000_000.0,
        ebitda: 3_640_000_000.0,
        assets: 15_000_000_000.0,
    },
    Seed {
        facility_id: "KR-OG-002",
        name: "Daesan Refinery",
        company: "K-Refinery Corp",
        sector: Sector::OilGas,
        location: "Seosan, South Chungcheong",
        latitude: 36.9167,
        longitude: 126.3833,
        scope1: 6_800_000.0,
        scope2: 1_700_000.0,
        scope3: 18_000_000.0,
        revenue: 40_000_000_000.0,
        ebitda: 2_800_000_000.0,
        assets: 12_000_000_000.0,
    },
];

/// The built-in facility portfolio, in canonical order.
pub fn seed_facilities() -> Vec<Facility> {
    SEEDS
        .iter()
        .map(|s| Facility {
            facility_id: s.facility_id.to_string(),
            name: s.name.to_string(),
            company: s.company.to_string(),
            sector: s.sector.clone(),
            location: s.location.to_string(),
            latitude: s.latitude,
            longitude: s.longitude,
            scope1_emissions: s.scope1,
            scope2_emissions: s.scope2,
            scope3_emissions: s.scope3,
            annual_revenue: s.revenue,
            ebitda: s.ebitda,
            assets_value: s.assets,
            coastal: None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::core::validate_facilities;

    use super::*;

    #[test]
    fn seed_set_has_seventeen_valid_facilities() {
        let facilities = seed_facilities();
        assert_eq!(facilities.len(), 17);
        let warnings = validate_facilities(&facilities).unwrap();
        assert!(warnings.is_empty());
    }

    #[test]
    fn seed_set_spans_multiple_sectors() {
        let sectors: std::collections::BTreeSet<String> = seed_facilities()
            .iter()
            .map(|f| f.sector.tag().to_string())
            .collect();
        assert!(sectors.len() >= 7);
        assert!(sectors.contains("steel"));
        assert!(sectors.contains("utilities"));
    }
}
