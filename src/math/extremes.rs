//! Extreme-value and counting-process quantities for hazard models.
//!
//! Gumbel Type I (maxima) models annual-maximum daily precipitation and
//! derives flood return periods; Poisson counts model typhoon strikes.
//!
//! References:
//! - Coles (2001), *An Introduction to Statistical Modeling of Extreme
//!   Values*, Ch. 3.
//! - Standard actuarial exceedance identities.

use crate::core::RiskError;

/// Euler-Mascheroni constant, the Gumbel mean offset.
const EULER_GAMMA: f64 = 0.5772156649015329;

/// Fitted Gumbel Type I location/scale pair.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GumbelParams {
    /// Location `mu`.
    pub location: f64,
    /// Scale `beta` (> 0).
    pub scale: f64,
}

impl GumbelParams {
    pub fn new(location: f64, scale: f64) -> Result<Self, RiskError> {
        if !location.is_finite() || !scale.is_finite() || scale <= 0.0 {
            return Err(RiskError::InvalidInput(
                "gumbel scale must be finite and > 0".to_string(),
            ));
        }
        Ok(Self { location, scale })
    }
}

/// Gumbel quantile for a `return_period`-year event:
/// `x_T = mu - beta ln(-ln(1 - 1/T))`.
pub fn gumbel_quantile(params: GumbelParams, return_period: f64) -> Result<f64, RiskError> {
    if return_period <= 1.0 || !return_period.is_finite() {
        return Err(RiskError::InvalidInput(format!(
            "return period must be > 1, got {return_period}"
        )));
    }
    let p = 1.0 - 1.0 / return_period;
    Ok(params.location - params.scale * (-p.ln()).ln())
}

/// Method-of-moments Gumbel fit from a series of annual maxima.
///
/// `beta = s sqrt(6) / pi`, `mu = mean - gamma beta`. Requires at least
/// `min_years` observations.
pub fn fit_gumbel_annual_maxima(
    annual_maxima: &[f64],
    min_years: usize,
) -> Result<GumbelParams, RiskError> {
    if annual_maxima.len() < min_years.max(2) {
        return Err(RiskError::InvalidInput(format!(
            "gumbel fit needs at least {} annual maxima, got {}",
            min_years.max(2),
            annual_maxima.len()
        )));
    }
    if annual_maxima.iter().any(|v| !v.is_finite()) {
        return Err(RiskError::InvalidInput(
            "gumbel fit input must be finite".to_string(),
        ));
    }

    let n = annual_maxima.len() as f64;
    let mean = annual_maxima.iter().sum::<f64>() / n;
    let variance = annual_maxima.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt().max(f64::EPSILON);

    let scale = std_dev * 6.0_f64.sqrt() / std::f64::consts::PI;
    let location = mean - EULER_GAMMA * scale;
    GumbelParams::new(location, scale)
}

/// Probability of at least one exceedance in a single year for a T-year
/// event under Poisson arrivals: `1 - exp(-1/T)`.
pub fn annual_exceedance_probability(return_period: f64) -> f64 {
    if return_period <= 0.0 {
        return 1.0;
    }
    1.0 - (-1.0 / return_period).exp()
}

/// Probability of at least one exceedance over `horizon` years:
/// `1 - (1 - 1/T)^n`.
pub fn horizon_exceedance_probability(return_period: f64, horizon: u32) -> f64 {
    if return_period <= 0.0 {
        return 1.0;
    }
    1.0 - (1.0 - 1.0 / return_period).powi(horizon as i32)
}

/// Poisson probability mass `P(N = k)` for intensity `lambda`.
pub fn poisson_pmf(lambda: f64, k: u32) -> f64 {
    if lambda < 0.0 {
        return 0.0;
    }
    if lambda == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }
    let mut log_factorial = 0.0;
    for i in 2..=k {
        log_factorial += f64::from(i).ln();
    }
    (f64::from(k) * lambda.ln() - lambda - log_factorial).exp()
}

/// Poisson probability of at least one event: `1 - exp(-lambda)`.
#[inline]
pub fn poisson_at_least_one(lambda: f64) -> f64 {
    1.0 - (-lambda.max(0.0)).exp()
}
