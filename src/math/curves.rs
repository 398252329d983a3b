//! Logistic S-curve for technology adoption and emission reduction.
//!
//! References:
//! - Bass (1969), "A New Product Growth for Model Consumer Durables",
//!   Management Science 15(5).

/// Logistic value `l / (1 + exp(-k (t - t0)))` with overflow clamping.
///
/// `l` is the supremum, `k` the steepness, `t0` the midpoint.
pub fn logistic(t: f64, l: f64, k: f64, t0: f64) -> f64 {
    let exponent = (-k * (t - t0)).clamp(-500.0, 500.0);
    l / (1.0 + exponent.exp())
}

/// Supremum that makes the logistic hit `target` exactly at `t_end`.
///
/// Solving `target = l / (1 + exp(-k (t_end - t0)))` for `l`. Used to pin
/// the reduction trajectory to the scenario's end-year target.
pub fn calibrated_supremum(target: f64, k: f64, t0: f64, t_end: f64) -> f64 {
    target * (1.0 + (-k * (t_end - t0)).clamp(-500.0, 500.0).exp())
}
