//! Domain types for facilities, scenarios, regimes, frameworks, and risk
//! levels.
//!
//! Facility records arrive as loosely typed JSON from callers; `Facility`
//! is the closed, validated form. Sector is an open enum: the ten canonical
//! tags are recognised, anything else is carried as `Unknown` and analysed
//! with default parameters after a warning.

use std::fmt;
use std::str::FromStr;

use super::RiskError;

/// One of the four NGFS reference scenarios.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Scenario {
    /// Immediate orderly transition holding warming to ~1.5 °C.
    #[serde(rename = "net_zero_2050")]
    NetZero2050,
    /// Gradual transition holding warming below 2 °C.
    #[serde(rename = "below_2c")]
    Below2C,
    /// Policy delay to 2030 followed by an abrupt transition.
    #[serde(rename = "delayed_transition")]
    DelayedTransition,
    /// No policy tightening beyond what is already legislated.
    #[serde(rename = "current_policies")]
    CurrentPolicies,
}

impl Scenario {
    /// All four scenarios in canonical order.
    pub const ALL: [Scenario; 4] = [
        Scenario::NetZero2050,
        Scenario::Below2C,
        Scenario::DelayedTransition,
        Scenario::CurrentPolicies,
    ];

    /// Canonical wire tag.
    pub fn tag(self) -> &'static str {
        match self {
            Self::NetZero2050 => "net_zero_2050",
            Self::Below2C => "below_2c",
            Self::DelayedTransition => "delayed_transition",
            Self::CurrentPolicies => "current_policies",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Scenario {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "net_zero_2050" => Ok(Self::NetZero2050),
            "below_2c" => Ok(Self::Below2C),
            "delayed_transition" => Ok(Self::DelayedTransition),
            "current_policies" => Ok(Self::CurrentPolicies),
            other => Err(RiskError::InvalidScenario(other.to_string())),
        }
    }
}

/// Carbon pricing regime.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PricingRegime {
    /// Global benchmark path in USD/tCO2e.
    Global,
    /// Korean emissions-trading scheme: KRW path with partial free
    /// allocation that tightens annually.
    Kets,
}

impl PricingRegime {
    pub fn tag(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Kets => "kets",
        }
    }
}

impl fmt::Display for PricingRegime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PricingRegime {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(Self::Global),
            "kets" => Ok(Self::Kets),
            other => Err(RiskError::InvalidRegime(other.to_string())),
        }
    }
}

/// Disclosure framework for ESG readiness scoring.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Framework {
    Tcfd,
    Issb,
    Kssb,
}

impl Framework {
    pub const ALL: [Framework; 3] = [Framework::Tcfd, Framework::Issb, Framework::Kssb];

    pub fn tag(self) -> &'static str {
        match self {
            Self::Tcfd => "tcfd",
            Self::Issb => "issb",
            Self::Kssb => "kssb",
        }
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Framework {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tcfd" => Ok(Self::Tcfd),
            "issb" => Ok(Self::Issb),
            "kssb" => Ok(Self::Kssb),
            other => Err(RiskError::InvalidFramework(other.to_string())),
        }
    }
}

/// Industry sector tag. Open-ended: unrecognised tags are preserved and
/// analysed with default parameters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sector {
    Steel,
    Petrochemical,
    Cement,
    Utilities,
    OilGas,
    Shipping,
    Automotive,
    Electronics,
    RealEstate,
    Financial,
    /// Sector not in the canonical set; analysed with defaults.
    Unknown(String),
}

impl Sector {
    /// The ten canonical sectors.
    pub const CANONICAL: [Sector; 10] = [
        Sector::Steel,
        Sector::Petrochemical,
        Sector::Cement,
        Sector::Utilities,
        Sector::OilGas,
        Sector::Shipping,
        Sector::Automotive,
        Sector::Electronics,
        Sector::RealEstate,
        Sector::Financial,
    ];

    pub fn tag(&self) -> &str {
        match self {
            Self::Steel => "steel",
            Self::Petrochemical => "petrochemical",
            Self::Cement => "cement",
            Self::Utilities => "utilities",
            Self::OilGas => "oil_gas",
            Self::Shipping => "shipping",
            Self::Automotive => "automotive",
            Self::Electronics => "electronics",
            Self::RealEstate => "real_estate",
            Self::Financial => "financial",
            Self::Unknown(tag) => tag,
        }
    }

    /// Parses a tag; never fails, unknown tags become [`Sector::Unknown`].
    pub fn parse(tag: &str) -> Self {
        match tag {
            "steel" => Self::Steel,
            "petrochemical" => Self::Petrochemical,
            "cement" => Self::Cement,
            "utilities" => Self::Utilities,
            "oil_gas" => Self::OilGas,
            "shipping" => Self::Shipping,
            "automotive" => Self::Automotive,
            "electronics" => Self::Electronics,
            "real_estate" => Self::RealEstate,
            "financial" => Self::Financial,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl serde::Serialize for Sector {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> serde::Deserialize<'de> for Sector {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = <String as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Sector::parse(&tag))
    }
}

/// Qualitative risk bucket derived from quantitative thresholds.
///
/// Ordering is by severity, so `max()` over hazards yields the overall
/// facility level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("Low"),
            Self::Medium => f.write_str("Medium"),
            Self::High => f.write_str("High"),
        }
    }
}

/// Provenance of the climate baselines behind a physical-risk result.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// Baselines derived from a live 30-year archive fetch.
    OpenMeteoApi,
    /// Regional statistical defaults from the configuration registry.
    HardcodedConfig,
}

/// One industrial facility: identity, placement, emissions by scope, and
/// financial state in a single currency.
///
/// Immutable within a request. Invariants enforced by [`Facility::validate`]:
/// latitude in [-90, 90], longitude in [-180, 180], emissions and monetary
/// values non-negative.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Facility {
    pub facility_id: String,
    pub name: String,
    pub company: String,
    pub sector: Sector,
    pub location: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Direct emissions, tCO2e/yr.
    pub scope1_emissions: f64,
    /// Purchased-energy emissions, tCO2e/yr.
    pub scope2_emissions: f64,
    /// Value-chain emissions, tCO2e/yr.
    pub scope3_emissions: f64,
    pub annual_revenue: f64,
    pub ebitda: f64,
    pub assets_value: f64,
    /// Explicit coastal flag; when absent the region heuristic decides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coastal: Option<bool>,
}

impl Facility {
    /// Baseline priced emissions: scope 1 + scope 2.
    #[inline]
    pub fn baseline_emissions(&self) -> f64 {
        self.scope1_emissions + self.scope2_emissions
    }

    /// Revenue attributable to a single day.
    #[inline]
    pub fn daily_revenue(&self) -> f64 {
        self.annual_revenue / 365.0
    }

    /// Checks the record invariants. Unknown sectors are NOT an error; they
    /// are reported through [`Facility::sector_warning`].
    pub fn validate(&self) -> Result<(), RiskError> {
        if self.facility_id.trim().is_empty() {
            return Err(RiskError::InvalidInput(
                "facility_id must not be empty".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&self.latitude) || !self.latitude.is_finite() {
            return Err(RiskError::InvalidInput(format!(
                "facility `{}` latitude {} outside [-90, 90]",
                self.facility_id, self.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.longitude) || !self.longitude.is_finite() {
            return Err(RiskError::InvalidInput(format!(
                "facility `{}` longitude {} outside [-180, 180]",
                self.facility_id, self.longitude
            )));
        }
        let non_negative = [
            ("scope1_emissions", self.scope1_emissions),
            ("scope2_emissions", self.scope2_emissions),
            ("scope3_emissions", self.scope3_emissions),
            ("annual_revenue", self.annual_revenue),
            ("ebitda", self.ebitda),
            ("assets_value", self.assets_value),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(RiskError::InvalidInput(format!(
                    "facility `{}` {field} must be finite and >= 0, got {value}",
                    self.facility_id
                )));
            }
        }
        Ok(())
    }

    /// Warning string for unknown sectors, if any.
    pub fn sector_warning(&self) -> Option<String> {
        match &self.sector {
            Sector::Unknown(tag) => Some(format!(
                "facility `{}` has unrecognised sector `{tag}`; default parameters applied",
                self.facility_id
            )),
            _ => None,
        }
    }
}

/// Validates a batch of caller-supplied facilities: record invariants,
/// duplicate ids, and collects sector warnings.
pub fn validate_facilities(facilities: &[Facility]) -> Result<Vec<String>, RiskError> {
    let mut seen = std::collections::BTreeSet::new();
    let mut warnings = Vec::new();
    for facility in facilities {
        facility.validate()?;
        if !seen.insert(facility.facility_id.as_str()) {
            return Err(RiskError::InvalidInput(format!(
                "duplicate facility_id `{}`",
                facility.facility_id
            )));
        }
        if let Some(warning) = facility.sector_warning() {
            log::warn!("{warning}");
            warnings.push(warning);
        }
    }
    Ok(warnings)
}
