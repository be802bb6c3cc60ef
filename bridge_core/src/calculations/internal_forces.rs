//! Shear force and bending moment diagrams
//!
//! V and M are accumulated station by station from the reactions and the
//! on-deck wheels, stepping each force in once a station reaches it:
//!
//! ```text
//! V(s) = R_A·[s ≥ A] − Σ Pᵢ·[s ≥ xᵢ] + R_B·[s ≥ B]
//! M(s) = R_A·(s − A)·[s ≥ A] − Σ Pᵢ·(s − xᵢ)·[s ≥ xᵢ] + R_B·(s − B)·[s ≥ B]
//! ```
//!
//! The envelopes depend on exactly this sampled definition, so no
//! closed-form shortcut is taken.

use serde::{Deserialize, Serialize};

use super::reactions::Reactions;
use crate::bridge::{station_position, NUM_STATIONS, SUPPORT_A_MM, SUPPORT_B_MM};
use crate::loads::{LoadCase, WheelSet};

/// SFD and BMD sampled at every station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForceDiagrams {
    /// Shear force (N)
    pub shear: Vec<f64>,
    /// Bending moment (N·mm)
    pub moment: Vec<f64>,
}

/// Loads acting on the deck for one train position.
///
/// Holds the on-deck wheels and reactions so that per-station evaluation
/// does not repeat the statics.
#[derive(Debug, Clone, Copy)]
pub struct LoadState {
    /// On-deck wheels as `(position, load)`; only the first `count` are used
    wheels: [(f64, f64); 6],
    count: usize,
    pub reactions: Reactions,
}

impl LoadState {
    pub fn new(wheels: &WheelSet) -> Self {
        let mut on_bridge = [(0.0, 0.0); 6];
        let mut count = 0;
        for w in wheels.on_bridge() {
            on_bridge[count] = w;
            count += 1;
        }

        LoadState {
            wheels: on_bridge,
            count,
            reactions: Reactions::from_wheels(wheels),
        }
    }

    /// Shear force at `pos` (mm)
    #[inline]
    pub fn shear_at(&self, pos: f64) -> f64 {
        let mut v = 0.0;
        if pos >= SUPPORT_A_MM {
            v += self.reactions.ra;
        }
        for &(x, p) in &self.wheels[..self.count] {
            if pos >= x {
                v -= p;
            }
        }
        if pos >= SUPPORT_B_MM {
            v += self.reactions.rb;
        }
        v
    }

    /// Bending moment at `pos` (mm)
    #[inline]
    pub fn moment_at(&self, pos: f64) -> f64 {
        let mut m = 0.0;
        if pos >= SUPPORT_A_MM {
            m += self.reactions.ra * (pos - SUPPORT_A_MM);
        }
        for &(x, p) in &self.wheels[..self.count] {
            if pos >= x {
                m -= p * (pos - x);
            }
        }
        if pos >= SUPPORT_B_MM {
            m += self.reactions.rb * (pos - SUPPORT_B_MM);
        }
        m
    }

    /// Full diagrams over all stations
    pub fn diagrams(&self) -> ForceDiagrams {
        let mut shear = Vec::with_capacity(NUM_STATIONS);
        let mut moment = Vec::with_capacity(NUM_STATIONS);
        for i in 0..NUM_STATIONS {
            let pos = station_position(i);
            shear.push(self.shear_at(pos));
            moment.push(self.moment_at(pos));
        }
        ForceDiagrams { shear, moment }
    }
}

/// Shear and moment at every station with the leftmost wheel at `x` (mm).
///
/// Returns `(V, M)`, each of length [`NUM_STATIONS`].
///
/// # Example
/// ```rust
/// use bridge_core::calculations::internal_forces::internal_forces;
/// use bridge_core::loads::LoadCase;
///
/// let (v, m) = internal_forces(197.0, LoadCase::Uniform, 600.0);
/// assert_eq!(v.len(), 10_000);
/// // Zero moment left of support A
/// assert_eq!(m[0], 0.0);
/// ```
pub fn internal_forces(x: f64, loadcase: LoadCase, mass: f64) -> (Vec<f64>, Vec<f64>) {
    let diagrams = LoadState::new(&WheelSet::new(x, loadcase, mass)).diagrams();
    (diagrams.shear, diagrams.moment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::MIDSPAN_INDEX;

    #[test]
    fn test_no_load_no_forces() {
        let (v, m) = internal_forces(2000.0, LoadCase::Uniform, 600.0);
        assert!(v.iter().all(|&s| s == 0.0));
        assert!(m.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_free_end_closes() {
        // Past support B with every wheel inside the span, V and M return to ~0
        let (v, m) = internal_forces(197.0, LoadCase::Locomotive, 452.0);
        let last = NUM_STATIONS - 1;
        assert!(v[last].abs() < 1e-9);
        assert!(m[last].abs() < 1e-6);
    }

    #[test]
    fn test_midspan_matches_hand_calculation() {
        let wheels = WheelSet::new(197.0, LoadCase::Uniform, 600.0);
        let state = LoadState::new(&wheels);
        let pos = station_position(MIDSPAN_INDEX);

        // Wheels at 197, 373, 537 are left of 625.06
        let r = state.reactions;
        let expected_v = r.ra - 300.0;
        let expected_m = r.ra * (pos - 25.0)
            - 100.0 * (pos - 197.0)
            - 100.0 * (pos - 373.0)
            - 100.0 * (pos - 537.0);

        let (v, m) = internal_forces(197.0, LoadCase::Uniform, 600.0);
        assert!((v[MIDSPAN_INDEX] - expected_v).abs() < 1e-9);
        assert!((m[MIDSPAN_INDEX] - expected_m).abs() < 1e-6);
    }

    #[test]
    fn test_step_at_wheel() {
        let wheels = WheelSet::new(400.0, LoadCase::Uniform, 600.0);
        let state = LoadState::new(&wheels);
        let before = state.shear_at(399.999);
        let at = state.shear_at(400.0);
        assert!((before - at - 100.0).abs() < 1e-9);
    }
}
