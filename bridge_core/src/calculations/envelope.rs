//! # Shear and Moment Envelopes
//!
//! Rolls the train across the deck and keeps, for every station, the
//! extreme shear and moment seen over all sampled train positions.
//!
//! The leftmost wheel runs from −856 mm (rightmost wheel entering at 0)
//! to 1250 mm (leftmost wheel leaving). Envelopes depend only on the load
//! case and mass, never on the cross-section, which is what lets
//! [`crate::session::EnvelopeCache`] reuse them across geometry edits.
//!
//! Train positions are split across rayon workers. Each worker folds its
//! share into private envelopes and the partial results are merged
//! element-wise; min/max merges are exact, so the output does not depend
//! on how the work was split.

use std::time::Instant;

use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::internal_forces::LoadState;
use crate::bridge::{station_position, BRIDGE_LENGTH_MM, NUM_STATIONS};
use crate::errors::{BridgeError, BridgeResult};
use crate::loads::{LoadCase, WheelSet, TRAIN_LENGTH_MM};

/// Default number of sampled train positions
pub const DEFAULT_TRAIN_POSITIONS: usize = 1000;

/// First leftmost-wheel coordinate (mm)
pub const TRAIN_START_MM: f64 = -TRAIN_LENGTH_MM;

/// Last leftmost-wheel coordinate (mm)
pub const TRAIN_END_MM: f64 = BRIDGE_LENGTH_MM;

/// Per-station extremes of shear (N) and moment (N·mm)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeArrays {
    pub sfe_min: Vec<f64>,
    pub sfe_max: Vec<f64>,
    pub bme_min: Vec<f64>,
    pub bme_max: Vec<f64>,
}

impl EnvelopeArrays {
    /// Identity for the merge: max arrays at −∞, min arrays at +∞
    fn empty() -> Self {
        EnvelopeArrays {
            sfe_min: vec![f64::INFINITY; NUM_STATIONS],
            sfe_max: vec![f64::NEG_INFINITY; NUM_STATIONS],
            bme_min: vec![f64::INFINITY; NUM_STATIONS],
            bme_max: vec![f64::NEG_INFINITY; NUM_STATIONS],
        }
    }

    fn include(&mut self, state: &LoadState) {
        for i in 0..NUM_STATIONS {
            let pos = station_position(i);
            let v = state.shear_at(pos);
            let m = state.moment_at(pos);
            self.sfe_max[i] = self.sfe_max[i].max(v);
            self.sfe_min[i] = self.sfe_min[i].min(v);
            self.bme_max[i] = self.bme_max[i].max(m);
            self.bme_min[i] = self.bme_min[i].min(m);
        }
    }

    fn merge(mut self, other: EnvelopeArrays) -> Self {
        for i in 0..NUM_STATIONS {
            self.sfe_max[i] = self.sfe_max[i].max(other.sfe_max[i]);
            self.sfe_min[i] = self.sfe_min[i].min(other.sfe_min[i]);
            self.bme_max[i] = self.bme_max[i].max(other.bme_max[i]);
            self.bme_min[i] = self.bme_min[i].min(other.bme_min[i]);
        }
        self
    }

    /// Shear envelope magnitude at station `i`: max(|V_min|, |V_max|)
    #[inline]
    pub fn shear_magnitude(&self, i: usize) -> f64 {
        self.sfe_min[i].abs().max(self.sfe_max[i].abs())
    }

    /// Moment envelope magnitude at station `i`: max(|M_min|, |M_max|)
    #[inline]
    pub fn moment_magnitude(&self, i: usize) -> f64 {
        self.bme_min[i].abs().max(self.bme_max[i].abs())
    }

    pub fn len(&self) -> usize {
        self.sfe_min.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sfe_min.is_empty()
    }
}

/// Evenly spaced leftmost-wheel coordinates over [−856, 1250] mm.
///
/// At least two positions are required so that both ends are sampled.
pub fn train_positions(n: usize) -> BridgeResult<Vec<f64>> {
    if n < 2 {
        return Err(BridgeError::invalid_input(
            "num_train_positions",
            n.to_string(),
            "At least two train positions are required",
        ));
    }

    let range = TRAIN_END_MM - TRAIN_START_MM;
    Ok((0..n)
        .map(|i| TRAIN_START_MM + i as f64 * range / (n - 1) as f64)
        .collect())
}

/// Reject non-finite or non-positive train mass
pub(crate) fn validate_mass(mass: f64) -> BridgeResult<()> {
    if !mass.is_finite() || mass <= 0.0 {
        return Err(BridgeError::invalid_input(
            "mass",
            mass.to_string(),
            "Train mass must be a finite, positive force in N",
        ));
    }
    Ok(())
}

/// Shear and moment envelopes for a load case and train mass (N).
///
/// # Example
/// ```rust
/// use bridge_core::calculations::envelope::envelopes;
/// use bridge_core::loads::LoadCase;
///
/// let env = envelopes(LoadCase::Uniform, 400.0, 50).unwrap();
/// assert!(env.sfe_min.iter().zip(&env.sfe_max).all(|(lo, hi)| lo <= hi));
/// ```
pub fn envelopes(
    loadcase: LoadCase,
    mass: f64,
    num_positions: usize,
) -> BridgeResult<EnvelopeArrays> {
    validate_mass(mass)?;
    let positions = train_positions(num_positions)?;
    let started = Instant::now();

    let result = positions
        .par_iter()
        .fold(EnvelopeArrays::empty, |mut acc, &x| {
            let state = LoadState::new(&WheelSet::new(x, loadcase, mass));
            acc.include(&state);
            acc
        })
        .reduce(EnvelopeArrays::empty, EnvelopeArrays::merge);

    debug!(
        "envelopes: loadcase {} mass {} N, {} positions x {} stations in {:?}",
        loadcase,
        mass,
        num_positions,
        NUM_STATIONS,
        started.elapsed()
    );
    Ok(result)
}
