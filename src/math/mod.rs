//! Pure numerical primitives: interpolation, discounting, the logistic
//! S-curve, and extreme-value statistics.
//!
//! Everything here is deterministic and allocation-light; the engines
//! compose these into per-facility calculations.

pub mod curves;
pub mod extremes;
pub mod finance;
pub mod interpolation;

pub use curves::{calibrated_supremum, logistic};
pub use extremes::{
    annual_exceedance_probability, fit_gumbel_annual_maxima, gumbel_quantile,
    horizon_exceedance_probability, poisson_at_least_one, poisson_pmf, GumbelParams,
};
pub use finance::{discount_factor, npv, wacc};
pub use interpolation::PiecewiseLinear;
