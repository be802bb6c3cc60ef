//! # Failure Sweep
//!
//! Evaluates the eight factors of safety at every station and reduces
//! them to the governing station, mode, and predicted failure load.
//!
//! Because wheel loads are linear in the train mass, the predicted failure
//! load is simply `min FOS × mass`.
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::calculations::failure_sweep::{failure_sweep, SweepOptions};
//! use bridge_core::loads::LoadCase;
//! use bridge_core::materials::MaterialProperties;
//! use bridge_core::section::presets;
//!
//! let geometry = presets::simple_square();
//! let results = failure_sweep(
//!     &geometry,
//!     LoadCase::Uniform,
//!     400.0,
//!     &MaterialProperties::matboard(),
//!     &SweepOptions { num_train_positions: 50 },
//! )
//! .unwrap();
//!
//! assert_eq!(results.failure_load, results.overall_min_fos * 400.0);
//! ```

use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::envelope::{envelopes, validate_mass, EnvelopeArrays, DEFAULT_TRAIN_POSITIONS};
use super::fos::{find_fos, FailureMode, FosResult};
use crate::bridge::{station_position, NUM_STATIONS};
use crate::errors::{BridgeError, BridgeResult};
use crate::loads::LoadCase;
use crate::materials::MaterialProperties;
use crate::section::GeometryLookup;

/// Sweep resolution
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepOptions {
    /// Train positions sampled for the envelopes (≥ 2)
    pub num_train_positions: usize,
}

impl Default for SweepOptions {
    fn default() -> Self {
        SweepOptions {
            num_train_positions: DEFAULT_TRAIN_POSITIONS,
        }
    }
}

/// Station with the lowest factor of safety
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CriticalLocation {
    /// Station position (mm)
    pub x: f64,
    pub min_fos: f64,
    /// Station index
    pub index: usize,
}

/// Lowest factor of safety for one failure mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModeMinimum {
    pub mode: FailureMode,
    pub min_fos: f64,
    pub index: usize,
    pub x: f64,
}

/// Per-station results of a failure sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureResults {
    pub loadcase: LoadCase,
    /// Train mass (N)
    pub mass: f64,

    /// Station positions (mm)
    pub x: Vec<f64>,
    pub v_env: Vec<f64>,
    pub m_max: Vec<f64>,
    pub m_min: Vec<f64>,
    pub m_env: Vec<f64>,

    pub fos_tens: Vec<f64>,
    pub fos_comp: Vec<f64>,
    pub fos_shear: Vec<f64>,
    pub fos_glue: Vec<f64>,
    pub fos_buck1: Vec<f64>,
    pub fos_buck2: Vec<f64>,
    pub fos_buck3: Vec<f64>,
    pub fos_buck_v: Vec<f64>,
    pub min_fos: Vec<f64>,
    pub failure_modes: Vec<FailureMode>,

    // Predicted failure shear (N) and moment (N·mm)
    pub v_fail_shear: Vec<f64>,
    pub v_fail_glue: Vec<f64>,
    pub v_fail_buck_v: Vec<f64>,
    pub m_fail_tens: Vec<f64>,
    pub m_fail_comp: Vec<f64>,
    pub m_fail_buck1: Vec<f64>,
    pub m_fail_buck2: Vec<f64>,
    pub m_fail_buck3: Vec<f64>,

    pub overall_min_fos: f64,
    /// Predicted train mass at failure (N)
    pub failure_load: f64,
    pub critical: CriticalLocation,
    pub governing_mode: FailureMode,
}

impl FailureResults {
    /// FOS array for one mode
    pub fn fos_array(&self, mode: FailureMode) -> &[f64] {
        match mode {
            FailureMode::Tension => &self.fos_tens,
            FailureMode::Compression => &self.fos_comp,
            FailureMode::Shear => &self.fos_shear,
            FailureMode::Glue => &self.fos_glue,
            FailureMode::FlexuralBucklingCase1 => &self.fos_buck1,
            FailureMode::FlexuralBucklingCase2 => &self.fos_buck2,
            FailureMode::FlexuralBucklingCase3 => &self.fos_buck3,
            FailureMode::ShearBuckling => &self.fos_buck_v,
        }
    }

    /// Predicted failure force (shear modes, N) or moment (N·mm)
    pub fn failure_array(&self, mode: FailureMode) -> &[f64] {
        match mode {
            FailureMode::Tension => &self.m_fail_tens,
            FailureMode::Compression => &self.m_fail_comp,
            FailureMode::Shear => &self.v_fail_shear,
            FailureMode::Glue => &self.v_fail_glue,
            FailureMode::FlexuralBucklingCase1 => &self.m_fail_buck1,
            FailureMode::FlexuralBucklingCase2 => &self.m_fail_buck2,
            FailureMode::FlexuralBucklingCase3 => &self.m_fail_buck3,
            FailureMode::ShearBuckling => &self.v_fail_buck_v,
        }
    }

    /// Lowest FOS of every mode and where it occurs
    pub fn mode_minimums(&self) -> Vec<ModeMinimum> {
        FailureMode::ALL
            .iter()
            .map(|&mode| {
                let (index, min_fos) = first_minimum(self.fos_array(mode));
                ModeMinimum {
                    mode,
                    min_fos,
                    index,
                    x: self.x[index],
                }
            })
            .collect()
    }
}

/// Index and value of the first minimum
fn first_minimum(values: &[f64]) -> (usize, f64) {
    let mut best = (0, f64::INFINITY);
    for (i, &v) in values.iter().enumerate() {
        if v < best.1 {
            best = (i, v);
        }
    }
    best
}

/// FOS × envelope, +∞ where the mode cannot fail
#[inline]
fn predicted_failure(fos: f64, envelope: f64) -> f64 {
    if fos.is_infinite() {
        f64::INFINITY
    } else {
        fos * envelope
    }
}

/// Station with the lowest factor of safety (first one on ties)
pub fn critical_location(results: &FailureResults) -> CriticalLocation {
    results.critical
}

/// Run the failure sweep against precomputed envelopes.
///
/// `envelopes` must come from the same `loadcase` and `mass`; the session
/// cache relies on this to skip the envelope sweep after geometry edits.
pub fn failure_sweep_with_envelopes<G: GeometryLookup + Sync + ?Sized>(
    geometry: &G,
    envelopes: &EnvelopeArrays,
    loadcase: LoadCase,
    mass: f64,
    material: &MaterialProperties,
) -> BridgeResult<FailureResults> {
    validate_mass(mass)?;
    material.validate()?;
    if envelopes.len() != NUM_STATIONS {
        return Err(BridgeError::invalid_input(
            "envelopes",
            envelopes.len().to_string(),
            format!("Envelope arrays must have {} stations", NUM_STATIONS),
        ));
    }

    let started = Instant::now();
    let per_station: Vec<FosResult> = (0..NUM_STATIONS)
        .into_par_iter()
        .map(|i| {
            find_fos(
                station_position(i),
                geometry,
                envelopes.shear_magnitude(i),
                envelopes.bme_max[i],
                envelopes.bme_min[i],
                material,
            )
        })
        .collect();
    debug!(
        "failure sweep: {} stations evaluated in {:?}",
        NUM_STATIONS,
        started.elapsed()
    );

    let x: Vec<f64> = (0..NUM_STATIONS).map(station_position).collect();
    let v_env: Vec<f64> = (0..NUM_STATIONS)
        .map(|i| envelopes.shear_magnitude(i))
        .collect();
    let m_env: Vec<f64> = (0..NUM_STATIONS)
        .map(|i| envelopes.moment_magnitude(i))
        .collect();

    let column = |f: fn(&FosResult) -> f64| -> Vec<f64> { per_station.iter().map(f).collect() };
    let fos_tens = column(|r| r.fos_tens);
    let fos_comp = column(|r| r.fos_comp);
    let fos_shear = column(|r| r.fos_shear);
    let fos_glue = column(|r| r.fos_glue);
    let fos_buck1 = column(|r| r.fos_buck1);
    let fos_buck2 = column(|r| r.fos_buck2);
    let fos_buck3 = column(|r| r.fos_buck3);
    let fos_buck_v = column(|r| r.fos_buck_v);
    let min_fos = column(|r| r.min_fos);
    let failure_modes: Vec<FailureMode> = per_station.iter().map(|r| r.failure_mode).collect();

    let scale = |fos: &[f64], env: &[f64]| -> Vec<f64> {
        fos.iter()
            .zip(env)
            .map(|(&f, &e)| predicted_failure(f, e))
            .collect()
    };

    let (index, overall_min_fos) = first_minimum(&min_fos);
    let critical = CriticalLocation {
        x: x[index],
        min_fos: overall_min_fos,
        index,
    };
    let governing_mode = failure_modes[index];
    let failure_load = overall_min_fos * mass;

    info!(
        "failure sweep: min FOS {:.4} ({}) at x = {:.2} mm, failure load {:.2} N",
        overall_min_fos, governing_mode, critical.x, failure_load
    );

    Ok(FailureResults {
        loadcase,
        mass,
        v_fail_shear: scale(&fos_shear, &v_env),
        v_fail_glue: scale(&fos_glue, &v_env),
        v_fail_buck_v: scale(&fos_buck_v, &v_env),
        m_fail_tens: scale(&fos_tens, &m_env),
        m_fail_comp: scale(&fos_comp, &m_env),
        m_fail_buck1: scale(&fos_buck1, &m_env),
        m_fail_buck2: scale(&fos_buck2, &m_env),
        m_fail_buck3: scale(&fos_buck3, &m_env),
        x,
        v_env,
        m_max: envelopes.bme_max.clone(),
        m_min: envelopes.bme_min.clone(),
        m_env,
        fos_tens,
        fos_comp,
        fos_shear,
        fos_glue,
        fos_buck1,
        fos_buck2,
        fos_buck3,
        fos_buck_v,
        min_fos,
        failure_modes,
        overall_min_fos,
        failure_load,
        critical,
        governing_mode,
    })
}

/// Envelopes plus failure sweep for one scenario.
pub fn failure_sweep<G: GeometryLookup + Sync + ?Sized>(
    geometry: &G,
    loadcase: LoadCase,
    mass: f64,
    material: &MaterialProperties,
    options: &SweepOptions,
) -> BridgeResult<FailureResults> {
    let env = envelopes(loadcase, mass, options.num_train_positions)?;
    failure_sweep_with_envelopes(geometry, &env, loadcase, mass, material)
}
