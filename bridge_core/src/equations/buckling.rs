//! # Thin-Plate Buckling Formulas
//!
//! Critical elastic buckling stresses for the rectangular plates that make
//! up a box-girder cross-section.
//!
//! ## Notation
//!
//! - `E` = Young's modulus (MPa)
//! - `ν` = Poisson's ratio
//! - `t` = Plate thickness (mm)
//! - `b` = Loaded plate width (mm)
//! - `h` = Web height (mm)
//! - `a` = Diaphragm spacing along the span (mm)
//! - `k` = Plate buckling coefficient (boundary conditions)
//!
//! ## References
//!
//! - Timoshenko & Gere, Theory of Elastic Stability, Ch. 9
//! - CIV102 course notes: thin-plate buckling of matboard members

use std::f64::consts::PI;

// =============================================================================
// BUCKLING COEFFICIENTS
// =============================================================================

/// Case 1: flange restrained along both edges (inside span between webs)
pub const K_FLANGE_INSIDE: f64 = 4.0;

/// Case 2: flange overhang with one edge free
pub const K_FLANGE_OVERHANG: f64 = 0.425;

/// Case 3: web compression zone under a triangular stress field
pub const K_WEB_FLEXURE: f64 = 6.0;

/// Shear buckling of a web panel
pub const K_SHEAR: f64 = 5.0;

/// Plate flexural rigidity factor π²E / (12(1 − ν²))
///
/// ```rust
/// use bridge_core::equations::buckling::plate_factor;
///
/// // Matboard: E = 4000 MPa, ν = 0.2
/// let f = plate_factor(4000.0, 0.2);
/// assert!((f - 3426.95).abs() < 0.01);
/// ```
#[inline]
pub fn plate_factor(e: f64, nu: f64) -> f64 {
    PI * PI * e / (12.0 * (1.0 - nu * nu))
}

/// Critical flexural buckling stress of a plate in compression
///
/// # Formula
/// σ_crit = k·π²·E / (12·(1 − ν²)) · (t/b)²
///
/// # Arguments
/// * `k` - Buckling coefficient ([`K_FLANGE_INSIDE`], [`K_FLANGE_OVERHANG`]
///   or [`K_WEB_FLEXURE`])
/// * `t` - Plate thickness (mm)
/// * `b` - Loaded width (mm)
/// * `e` - Young's modulus (MPa)
/// * `nu` - Poisson's ratio
///
/// # Example
/// ```rust
/// use bridge_core::equations::buckling::{sigma_crit_flexural, K_FLANGE_INSIDE};
///
/// // 1.27 mm flange spanning 77.46 mm between webs
/// let sigma = sigma_crit_flexural(K_FLANGE_INSIDE, 1.27, 77.46, 4000.0, 0.2);
/// assert!((sigma - 3.685).abs() < 0.01);
/// ```
#[inline]
pub fn sigma_crit_flexural(k: f64, t: f64, b: f64, e: f64, nu: f64) -> f64 {
    k * plate_factor(e, nu) * (t / b).powi(2)
}

/// Critical shear buckling stress of a web panel
///
/// # Formula
/// τ_crit = 5·π²·E / (12·(1 − ν²)) · [(t/h)² + (t/a)²]
///
/// The `(t/a)²` term is dropped when `spacing` is `None` or not positive
/// (no diaphragms restraining the panel).
///
/// # Arguments
/// * `t` - Web thickness (mm)
/// * `h` - Web height (mm)
/// * `spacing` - Diaphragm spacing `a` (mm)
/// * `e` - Young's modulus (MPa)
/// * `nu` - Poisson's ratio
///
/// # Example
/// ```rust
/// use bridge_core::equations::buckling::tau_crit_shear;
///
/// let without = tau_crit_shear(1.27, 72.46, None, 4000.0, 0.2);
/// let with = tau_crit_shear(1.27, 72.46, Some(150.0), 4000.0, 0.2);
/// assert!(with > without);
/// ```
#[inline]
pub fn tau_crit_shear(t: f64, h: f64, spacing: Option<f64>, e: f64, nu: f64) -> f64 {
    let mut ratio = (t / h).powi(2);
    if let Some(a) = spacing.filter(|a| *a > 0.0) {
        ratio += (t / a).powi(2);
    }
    K_SHEAR * plate_factor(e, nu) * ratio
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        ((a - b) / b).abs() < tol
    }

    #[test]
    fn test_plate_factor() {
        let expected = PI * PI * 4000.0 / (12.0 * 0.96);
        assert!(approx_eq(plate_factor(4000.0, 0.2), expected, 1e-12));
    }

    #[test]
    fn test_case_coefficients_scale_linearly() {
        let base = sigma_crit_flexural(1.0, 1.27, 50.0, 4000.0, 0.2);
        let overhang = sigma_crit_flexural(K_FLANGE_OVERHANG, 1.27, 50.0, 4000.0, 0.2);
        let web = sigma_crit_flexural(K_WEB_FLEXURE, 1.27, 50.0, 4000.0, 0.2);
        assert!(approx_eq(overhang, 0.425 * base, 1e-12));
        assert!(approx_eq(web, 6.0 * base, 1e-12));
    }

    #[test]
    fn test_flexural_thickness_squared() {
        // Doubling t quadruples σ_crit
        let thin = sigma_crit_flexural(K_FLANGE_INSIDE, 1.27, 80.0, 4000.0, 0.2);
        let thick = sigma_crit_flexural(K_FLANGE_INSIDE, 2.54, 80.0, 4000.0, 0.2);
        assert!(approx_eq(thick, 4.0 * thin, 1e-12));
    }

    #[test]
    fn test_shear_spacing_term() {
        let t = 1.27;
        let h = 97.46;
        let none = tau_crit_shear(t, h, None, 4000.0, 0.2);
        let expected_none = 5.0 * plate_factor(4000.0, 0.2) * (t / h).powi(2);
        assert!(approx_eq(none, expected_none, 1e-12));

        let spaced = tau_crit_shear(t, h, Some(150.0), 4000.0, 0.2);
        let expected_spaced =
            5.0 * plate_factor(4000.0, 0.2) * ((t / h).powi(2) + (t / 150.0).powi(2));
        assert!(approx_eq(spaced, expected_spaced, 1e-12));
    }

    #[test]
    fn test_shear_zero_spacing_ignored() {
        let none = tau_crit_shear(1.27, 72.46, None, 4000.0, 0.2);
        let zero = tau_crit_shear(1.27, 72.46, Some(0.0), 4000.0, 0.2);
        assert_eq!(none, zero);
    }
}
