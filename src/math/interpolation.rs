//! Piecewise-linear interpolation over calibration knots.
//!
//! Curve construction for carbon-price paths, SSP warming projections, and
//! depth-damage functions. Queries inside the knot range interpolate
//! linearly; queries outside clamp to the nearest endpoint. No
//! extrapolation: scenario calibration points define the curve and nothing
//! beyond them.
//!
//! References:
//! - Hagan and West (2006), *Interpolation Methods for Curve Construction*,
//!   for the local-scheme framing.

use crate::core::RiskError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QueryLocation {
    Left,
    Inside(usize),
    Right,
}

fn validate_xy(x: &[f64], y: &[f64]) -> Result<(), RiskError> {
    if x.len() != y.len() {
        return Err(RiskError::InvalidInput(
            "interpolation x and y must have the same length".to_string(),
        ));
    }
    if x.is_empty() {
        return Err(RiskError::InvalidInput(
            "interpolation requires at least one knot".to_string(),
        ));
    }
    if x.windows(2).any(|w| w[1] <= w[0]) {
        return Err(RiskError::InvalidInput(
            "interpolation x must be strictly increasing".to_string(),
        ));
    }
    if x.iter().any(|v| !v.is_finite()) || y.iter().any(|v| !v.is_finite()) {
        return Err(RiskError::InvalidInput(
            "interpolation knots must be finite".to_string(),
        ));
    }
    Ok(())
}

fn query_location(x: &[f64], xq: f64) -> QueryLocation {
    if xq < x[0] {
        return QueryLocation::Left;
    }
    if xq > x[x.len() - 1] {
        return QueryLocation::Right;
    }
    let idx = x.partition_point(|v| *v <= xq);
    if idx == 0 {
        QueryLocation::Inside(0)
    } else if idx >= x.len() {
        QueryLocation::Inside(x.len().saturating_sub(2))
    } else {
        QueryLocation::Inside(idx - 1)
    }
}

#[inline]
fn linear_weights(x0: f64, x1: f64, xq: f64) -> (f64, f64) {
    let w = if (x1 - x0).abs() <= f64::EPSILON {
        0.0
    } else {
        (xq - x0) / (x1 - x0)
    };
    (1.0 - w, w)
}

/// Piecewise-linear interpolator with flat clamping outside the knot range.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseLinear {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl PiecewiseLinear {
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, RiskError> {
        validate_xy(&x, &y)?;
        Ok(Self { x, y })
    }

    /// Builds from `(x, y)` pairs, which must be in strictly ascending `x`.
    pub fn from_points(points: &[(f64, f64)]) -> Result<Self, RiskError> {
        let (x, y) = points.iter().copied().unzip();
        Self::new(x, y)
    }

    /// Convenience for integer-keyed tables such as year/price paths.
    pub fn from_year_points(points: &[(i32, f64)]) -> Result<Self, RiskError> {
        let x = points.iter().map(|(year, _)| f64::from(*year)).collect();
        let y = points.iter().map(|(_, value)| *value).collect();
        Self::new(x, y)
    }

    /// Interpolated value; clamps to the nearest endpoint outside the range.
    pub fn value(&self, xq: f64) -> f64 {
        match query_location(&self.x, xq) {
            QueryLocation::Left => self.y[0],
            QueryLocation::Right => self.y[self.y.len() - 1],
            QueryLocation::Inside(i) => {
                if self.x.len() == 1 {
                    return self.y[0];
                }
                let (w0, w1) = linear_weights(self.x[i], self.x[i + 1], xq);
                w0 * self.y[i] + w1 * self.y[i + 1]
            }
        }
    }

    /// True when `xq` lies outside the calibrated knot range.
    pub fn clamps(&self, xq: f64) -> bool {
        !matches!(query_location(&self.x, xq), QueryLocation::Inside(_))
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn interpolates_between_knots() {
        let pl = PiecewiseLinear::from_year_points(&[(2024, 65.0), (2025, 75.0), (2027, 100.0)])
            .unwrap();
        assert_relative_eq!(pl.value(2024.5), 70.0, epsilon = 1e-12);
        assert_relative_eq!(pl.value(2026.0), 87.5, epsilon = 1e-12);
    }

    #[test]
    fn matches_knots_exactly() {
        let pl = PiecewiseLinear::from_points(&[(0.0, 0.0), (10.0, 0.03), (30.0, 0.08)]).unwrap();
        assert_relative_eq!(pl.value(10.0), 0.03, epsilon = 1e-12);
        assert_relative_eq!(pl.value(30.0), 0.08, epsilon = 1e-12);
    }

    #[test]
    fn clamps_outside_range_instead_of_extrapolating() {
        let pl = PiecewiseLinear::from_year_points(&[(2024, 65.0), (2050, 250.0)]).unwrap();
        assert_relative_eq!(pl.value(2000.0), 65.0, epsilon = 1e-12);
        assert_relative_eq!(pl.value(2100.0), 250.0, epsilon = 1e-12);
        assert!(pl.clamps(2100.0));
        assert!(!pl.clamps(2040.0));
    }

    #[test]
    fn rejects_unsorted_or_mismatched_knots() {
        assert!(PiecewiseLinear::new(vec![1.0, 1.0], vec![0.0, 1.0]).is_err());
        assert!(PiecewiseLinear::new(vec![2.0, 1.0], vec![0.0, 1.0]).is_err());
        assert!(PiecewiseLinear::new(vec![1.0], vec![0.0, 1.0]).is_err());
        assert!(PiecewiseLinear::new(vec![], vec![]).is_err());
    }

    #[test]
    fn single_knot_is_constant() {
        let pl = PiecewiseLinear::new(vec![2030.0], vec![40.0]).unwrap();
        assert_relative_eq!(pl.value(2020.0), 40.0, epsilon = 1e-12);
        assert_relative_eq!(pl.value(2030.0), 40.0, epsilon = 1e-12);
        assert_relative_eq!(pl.value(2060.0), 40.0, epsilon = 1e-12);
    }
}
