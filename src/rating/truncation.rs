//! Moment corrections for truncated Gaussians
//!
//! When a match is observed, the belief about the performance difference
//! between the two sides becomes a Gaussian truncated to the region consistent
//! with the outcome: above the draw margin for a decisive result, inside
//! `[-margin, margin]` for a draw. The functions here return the additive
//! correction to the mean (`V`) and the multiplicative correction to the
//! variance (`W`) of that truncated distribution, as in Herbrich et al.,
//! "TrueSkill: A Bayesian Skill Rating System" (2006) and Herbrich,
//! "On Gaussian Expectation Propagation" (2005), eq. 4.4, 4.7 and 4.8.
//!
//! All arguments are standardized: `t` is the mean performance difference
//! divided by the combined scale `c`, bounds likewise.
//!
//! Every evaluation of the standard normal in this crate goes through this
//! module.

use statrs::distribution::{Continuous, ContinuousCDF, Normal};
use tracing::trace;

fn standard_normal() -> Normal {
    Normal::standard()
}

pub(crate) fn pdf(x: f64) -> f64 {
    standard_normal().pdf(x)
}

pub(crate) fn cdf(x: f64) -> f64 {
    standard_normal().cdf(x)
}

pub(crate) fn inverse_cdf(p: f64) -> f64 {
    standard_normal().inverse_cdf(p)
}

/// Probability mass of the standard normal on `[a, b]`.
///
/// Evaluated in whichever tail keeps both terms small, so the difference does
/// not cancel to zero when the interval lies far into the upper tail.
fn interval_mass(a: f64, b: f64) -> f64 {
    if a > 0.0 {
        cdf(-a) - cdf(-b)
    } else {
        cdf(b) - cdf(a)
    }
}

/// Mean correction for a Gaussian truncated from below at `lower`.
///
/// Grows like `lower - t` as `t` falls below `lower` and decays to zero as
/// `t` rises above it.
pub fn one_sided_v(t: f64, lower: f64, tolerance: f64) -> f64 {
    let normalization = cdf(t - lower);
    if normalization < tolerance {
        trace!(t, lower, normalization, "one-sided V using limiting value");
        return lower - t;
    }
    pdf(t - lower) / normalization
}

/// Variance correction for a Gaussian truncated from below at `lower`.
///
/// A smooth stand-in for the indicator `t <= lower`, always below one.
pub fn one_sided_w(t: f64, lower: f64, tolerance: f64) -> f64 {
    let v = one_sided_v(t, lower, tolerance);
    (v * (v + t - lower)).clamp(0.0, 1.0)
}

/// Mean correction for a Gaussian truncated to `[lower, upper]`.
pub fn two_sided_v(t: f64, lower: f64, upper: f64, tolerance: f64) -> f64 {
    let normalization = interval_mass(lower - t, upper - t);
    if normalization < tolerance {
        // limit as upper -> lower
        trace!(t, lower, upper, normalization, "two-sided V using limiting value");
        return lower - t;
    }
    (pdf(lower - t) - pdf(upper - t)) / normalization
}

/// Variance correction for a Gaussian truncated to `[lower, upper]`.
///
/// Always within `[0, 1]`. Falls back to `1` (the posterior collapses onto a
/// point) when the window holds no measurable mass.
pub fn two_sided_w(t: f64, lower: f64, upper: f64, tolerance: f64) -> f64 {
    let normalization = interval_mass(lower - t, upper - t);
    if normalization < tolerance {
        trace!(t, lower, upper, normalization, "two-sided W using limiting value");
        return 1.0;
    }

    let v = two_sided_v(t, lower, upper, tolerance);
    let upper_term = (upper - t) * pdf(upper - t);
    let lower_term = (lower - t) * pdf(lower - t);
    // narrow windows cancel to just above one
    (v * v + (upper_term - lower_term) / normalization).clamp(0.0, 1.0)
}
