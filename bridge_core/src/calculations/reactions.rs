//! Support reactions
//!
//! Statics of the simply-supported span for one train position. Wheels off
//! the deck carry no load into the supports.
//!
//! ## Formulas
//! - ΣM_B = 0: R_A = Σ Pᵢ(B − xᵢ) / L
//! - ΣF_y = 0: R_B = Σ Pᵢ − R_A
//!
//! ## Example
//! ```rust
//! use bridge_core::calculations::reactions::reactions;
//! use bridge_core::loads::LoadCase;
//!
//! let r = reactions(197.0, LoadCase::Locomotive, 452.0);
//! assert!((r.ra + r.rb - 452.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

use crate::bridge::{SPAN_MM, SUPPORT_B_MM};
use crate::loads::{LoadCase, WheelSet};

/// Upward support reactions (N)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Reactions {
    /// Reaction at support A (25 mm)
    pub ra: f64,
    /// Reaction at support B (1225 mm)
    pub rb: f64,
}

impl Reactions {
    /// Reactions from a wheel set. Zero when no wheel is on the deck.
    pub fn from_wheels(wheels: &WheelSet) -> Self {
        let (moment_about_b, load_on_bridge) = wheels
            .on_bridge()
            .fold((0.0, 0.0), |(m, p), (pos, load)| {
                (m + load * (SUPPORT_B_MM - pos), p + load)
            });

        let ra = moment_about_b / SPAN_MM;
        Reactions {
            ra,
            rb: load_on_bridge - ra,
        }
    }

    pub fn total(&self) -> f64 {
        self.ra + self.rb
    }
}

/// Support reactions with the leftmost wheel at `x` (mm)
pub fn reactions(x: f64, loadcase: LoadCase, mass: f64) -> Reactions {
    Reactions::from_wheels(&WheelSet::new(x, loadcase, mass))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_reactions_balance_on_bridge_load() {
        for lc in LoadCase::ALL {
            for x in [-800.0, -300.0, 0.0, 197.0, 394.0, 600.0, 1100.0] {
                let wheels = WheelSet::new(x, lc, 452.0);
                let r = Reactions::from_wheels(&wheels);
                assert!(
                    approx_eq(r.total(), wheels.on_bridge_load(), 1e-9),
                    "x = {}: {} vs {}",
                    x,
                    r.total(),
                    wheels.on_bridge_load()
                );
            }
        }
    }

    #[test]
    fn test_symmetric_train_symmetric_reactions() {
        // Uniform train centred on midspan: leftmost wheel at 625 - 428
        let r = reactions(197.0, LoadCase::Uniform, 600.0);
        assert!(approx_eq(r.ra, 300.0, 1e-9));
        assert!(approx_eq(r.rb, 300.0, 1e-9));
    }

    #[test]
    fn test_train_off_bridge() {
        let r = reactions(1300.0, LoadCase::Uniform, 600.0);
        assert_eq!(r, Reactions { ra: 0.0, rb: 0.0 });
        let r = reactions(-900.0, LoadCase::HeavyFreight, 600.0);
        assert_eq!(r.total(), 0.0);
    }

    #[test]
    fn test_wheel_between_support_and_end() {
        // Single wheel on the deck at 1250 (right overhang): R_A is negative
        let r = reactions(1250.0, LoadCase::Uniform, 600.0);
        assert!(approx_eq(r.ra, 100.0 * (1225.0 - 1250.0) / 1200.0, 1e-12));
        assert!(r.ra < 0.0);
        assert!(approx_eq(r.total(), 100.0, 1e-12));
    }
}
