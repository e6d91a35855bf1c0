//! Reflection-coefficient mapping for Smith chart rendering.
//!
//! All functions take raw (unnormalized) impedances or admittances and the
//! reference impedance `z0`. Points where the mapping is singular return
//! [`MatchError::ChartSingularity`] instead of an infinite or NaN value.

pub mod circle;

use crate::error::{require_positive, MatchError, MatchResult};
use num_complex::{c64, Complex64};

fn require_number(what: &'static str, val: Complex64) -> MatchResult<Complex64> {
    if val.is_nan() {
        Err(MatchError::Domain {
            what,
            value: f64::NAN,
        })
    } else {
        Ok(val)
    }
}

fn is_zero(val: Complex64) -> bool {
    val.re == 0.0 && val.im == 0.0
}

/// Normalize `z` to the reference impedance, `z / z0`.
pub fn normalize(z: Complex64, z0: f64) -> MatchResult<Complex64> {
    require_positive("z0", z0)?;
    Ok(require_number("impedance", z)? / z0)
}

/// Reflection coefficient `Γ = (Z - Z0) / (Z + Z0)`.
///
/// An infinite impedance (open) maps to `Γ = 1`. `Z = -Z0` has no image.
pub fn z2gamma(z: Complex64, z0: f64) -> MatchResult<Complex64> {
    require_positive("z0", z0)?;
    let z = require_number("impedance", z)?;
    if z.is_infinite() {
        return Ok(c64(1.0, 0.0));
    }
    let den = z + z0;
    if is_zero(den) {
        return Err(MatchError::ChartSingularity { what: "Z = -Z0" });
    }
    Ok((z - z0) / den)
}

/// Reflection coefficient of a load given by its admittance,
/// `Γ = -(Y - Y0) / (Y + Y0)` with `Y0 = 1 / Z0`.
///
/// `y2gamma(1 / Z, z0) == z2gamma(Z, z0)`. An infinite admittance (short)
/// maps to `Γ = -1`. `Y = -Y0` has no image.
pub fn y2gamma(y: Complex64, z0: f64) -> MatchResult<Complex64> {
    Ok(-admittance_chart_point(y, z0)?)
}

/// Position of admittance `y` on an admittance chart drawn with the
/// impedance-chart grid, `(Y - Y0) / (Y + Y0)`.
///
/// This is the reflection plane rotated by 180°:
/// `admittance_chart_point(1 / Z, z0) == -z2gamma(Z, z0)`.
pub fn admittance_chart_point(y: Complex64, z0: f64) -> MatchResult<Complex64> {
    let y0 = 1.0 / require_positive("z0", z0)?;
    let y = require_number("admittance", y)?;
    if y.is_infinite() {
        return Ok(c64(1.0, 0.0));
    }
    let den = y + y0;
    if is_zero(den) {
        return Err(MatchError::ChartSingularity { what: "Y = -Y0" });
    }
    Ok((y - y0) / den)
}

/// Impedance of reflection coefficient `gamma`, `Z = Z0 (1 + Γ) / (1 - Γ)`.
pub fn gamma2z(gamma: Complex64, z0: f64) -> MatchResult<Complex64> {
    require_positive("z0", z0)?;
    let gamma = require_number("reflection coefficient", gamma)?;
    let den = 1.0 - gamma;
    if is_zero(den) {
        return Err(MatchError::ChartSingularity { what: "Γ = 1" });
    }
    Ok(z0 * (1.0 + gamma) / den)
}
