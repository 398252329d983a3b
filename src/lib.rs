//! ClimRisk is a climate financial-risk analytics library for industrial
//! facility portfolios: transition-risk NPV under NGFS policy scenarios,
//! physical-hazard expected annual loss at facility coordinates, and ESG
//! disclosure-readiness scoring against TCFD/ISSB/KSSB.
//!
//! The crate combines a scenario model (carbon-price interpolation,
//! logistic emission-reduction trajectories, scenario-adjusted WACC), a
//! per-facility transition-risk calculator, hazard-specific physical damage
//! models grounded in extreme-value statistics, a weighted-maturity ESG
//! scoring engine, and the supporting infrastructure: an optional
//! historical-weather client with caching and single-flight, a TTL-bounded
//! session store for caller-supplied facility sets, and a multi-sheet
//! report builder.
//!
//! References used across modules include:
//! - NGFS Phase IV Scenarios (2023) for carbon-price paths and archetypes.
//! - IPCC AR6 WG1 (Table SPM.1, Ch. 9, Ch. 11) for warming, sea-level rise,
//!   and hazard intensification scaling.
//! - Coles (2001) for Gumbel extreme-value statistics.
//! - Bass (1969) for logistic adoption curves.
//! - USACE depth-damage functions and FEMA HAZUS-MH wind damage curves.
//! - TCFD Final Report (2017), IFRS S1/S2, and KSSB draft standards for the
//!   disclosure frameworks.
//!
//! Numerical considerations:
//! - All monetary values are `f64` in a single currency unit per call;
//!   rounding to whole units happens only at the report boundary.
//! - Carbon-price and warming curves clamp to their calibration endpoints;
//!   there is no extrapolation.
//! - Engines are pure over their inputs plus the configuration registry and
//!   produce byte-identical output for identical inputs when no live
//!   weather fetch is requested.
//!
//! # Feature Flags
//! - `parallel` (default): enables Rayon fan-out over facilities in the
//!   transition and physical engines; output order still matches input
//!   order.
//!
//! # Quick Start
//! Interpolate a carbon price:
//! ```rust
//! use climrisk::core::{PricingRegime, Scenario};
//! use climrisk::pricing::price_at;
//!
//! let p = price_at(Scenario::NetZero2050, PricingRegime::Global, 2030).unwrap();
//! assert!((p.usd_per_tco2e - 130.0).abs() < 1e-9);
//! ```
//!
//! Run a transition analysis over the seed portfolio:
//! ```rust
//! use climrisk::config::seed_facilities;
//! use climrisk::core::{CancelToken, PricingRegime, Scenario};
//! use climrisk::transition::{analyse, AnalysisOptions};
//!
//! let facilities = seed_facilities();
//! let result = analyse(
//!     &facilities,
//!     Scenario::NetZero2050,
//!     PricingRegime::Global,
//!     &AnalysisOptions::default(),
//!     &CancelToken::none(),
//! )
//! .unwrap();
//! assert_eq!(result.facilities.len(), facilities.len());
//! assert!(result.total_npv < 0.0);
//! ```
//!
//! Score ESG readiness:
//! ```rust
//! use climrisk::config::seed_facilities;
//! use climrisk::core::Framework;
//! use climrisk::esg::assess_framework;
//!
//! let report = assess_framework(Framework::Tcfd, &seed_facilities());
//! assert!(report.overall_score > 0.0 && report.overall_score <= 100.0);
//! ```

pub mod climate;
pub mod config;
pub mod core;
pub mod esg;
pub mod math;
pub mod physical;
pub mod pricing;
pub mod report;
pub mod session;
pub mod transition;
pub mod weather;

/// Common imports for ergonomic usage.
pub mod prelude {
    pub use crate::core::{
        CancelToken, DataSource, Facility, Framework, PricingRegime, RiskError, RiskLevel,
        Scenario, Sector,
    };
    pub use crate::esg::assess_framework;
    pub use crate::physical::assess;
    pub use crate::pricing::{allocation_fraction, build_path, price_at};
    pub use crate::session::SessionStore;
    pub use crate::transition::analyse;
}
