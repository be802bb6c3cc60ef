//! # Bending and Shear Stress Formulas
//!
//! Navier bending stress and Jourawski shear stress for a prismatic beam.
//!
//! ## Sign Conventions
//!
//! - Positive (sagging) moment compresses the top fiber
//! - Tension positive, compression negative
//! - Shear stress is reported as a magnitude
//!
//! Each formula returns 0 instead of dividing by a near-zero `I` or width
//! (below [`STIFFNESS_EPSILON`]).

/// Denominators below this are treated as zero
pub const STIFFNESS_EPSILON: f64 = 1e-9;

/// Stress at the top fiber
///
/// # Formula
/// σ_top = −M·y_top / I
///
/// # Arguments
/// * `m` - Bending moment (N·mm)
/// * `y_top` - Distance from neutral axis to top fiber (mm)
/// * `i` - Second moment of area (mm⁴)
///
/// # Example
/// ```rust
/// use bridge_core::equations::stress::sigma_top;
///
/// // Sagging moment puts the top in compression
/// assert!(sigma_top(1.0e5, 50.0, 1.0e6) < 0.0);
/// assert_eq!(sigma_top(1.0e5, 50.0, 0.0), 0.0);
/// ```
#[inline]
pub fn sigma_top(m: f64, y_top: f64, i: f64) -> f64 {
    if i.abs() < STIFFNESS_EPSILON {
        return 0.0;
    }
    -m * y_top / i
}

/// Stress at the bottom fiber
///
/// # Formula
/// σ_bot = M·y_bot / I
#[inline]
pub fn sigma_bot(m: f64, y_bot: f64, i: f64) -> f64 {
    if i.abs() < STIFFNESS_EPSILON {
        return 0.0;
    }
    m * y_bot / i
}

/// Shear stress across a horizontal cut
///
/// # Formula
/// τ = |V|·Q / (I·b)
///
/// Used both at the centroid (b = section width at ybar) and at glue
/// joints (b = glue contact width).
///
/// # Arguments
/// * `v` - Shear force (N); sign ignored
/// * `q` - First moment of area above the cut (mm³)
/// * `i` - Second moment of area (mm⁴)
/// * `b` - Width of the cut (mm)
///
/// # Example
/// ```rust
/// use bridge_core::equations::stress::shear_stress;
///
/// let tau = shear_stress(-200.0, 5.0e4, 1.0e6, 2.54);
/// assert!((tau - 3.937).abs() < 0.001);
/// ```
#[inline]
pub fn shear_stress(v: f64, q: f64, i: f64, b: f64) -> f64 {
    if i.abs() < STIFFNESS_EPSILON || b.abs() < STIFFNESS_EPSILON {
        return 0.0;
    }
    v.abs() * q / (i * b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fiber_stresses_opposite_sign() {
        let top = sigma_top(2.0e5, 40.0, 4.0e5);
        let bot = sigma_bot(2.0e5, 60.0, 4.0e5);
        assert_eq!(top, -20.0);
        assert_eq!(bot, 30.0);
    }

    #[test]
    fn test_hogging_reverses_fibers() {
        assert!(sigma_top(-1.0e5, 40.0, 4.0e5) > 0.0);
        assert!(sigma_bot(-1.0e5, 60.0, 4.0e5) < 0.0);
    }

    #[test]
    fn test_zero_stiffness_guard() {
        assert_eq!(sigma_top(1.0e5, 40.0, 1e-10), 0.0);
        assert_eq!(sigma_bot(1.0e5, 40.0, -1e-10), 0.0);
        assert_eq!(shear_stress(100.0, 1.0e3, 0.0, 2.0), 0.0);
        assert_eq!(shear_stress(100.0, 1.0e3, 1.0e6, 0.0), 0.0);
    }

    #[test]
    fn test_shear_uses_magnitude() {
        assert_eq!(
            shear_stress(-150.0, 1.0e3, 1.0e5, 2.0),
            shear_stress(150.0, 1.0e3, 1.0e5, 2.0)
        );
    }
}
