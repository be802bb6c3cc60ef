//! # Moving-Load Calculations
//!
//! The analysis pipeline, from a single train position up to the failure
//! load of a cross-section:
//!
//! - [`reactions`] - Support reactions for one train position
//! - [`internal_forces`] - SFD/BMD at every station
//! - [`envelope`] - Min/max shear and moment over all train positions
//! - [`fos`] - Eight factors of safety at one station
//! - [`failure_sweep`] - FOS at every station, governing station and load
//! - [`report`] - Detailed breakdown of the critical station
//!
//! Envelopes depend only on the load case and mass; everything from
//! [`fos`] onwards also depends on the cross-section.

pub mod envelope;
pub mod failure_sweep;
pub mod fos;
pub mod internal_forces;
pub mod reactions;
pub mod report;

pub use envelope::{envelopes, train_positions, EnvelopeArrays, DEFAULT_TRAIN_POSITIONS};
pub use failure_sweep::{
    critical_location, failure_sweep, failure_sweep_with_envelopes, CriticalLocation,
    FailureResults, ModeMinimum, SweepOptions,
};
pub use fos::{
    analyze_station, calculate_fos, find_fos, AppliedStresses, FailureMode, FosResult,
    StationAnalysis, StressEnvelope,
};
pub use internal_forces::{internal_forces, ForceDiagrams, LoadState};
pub use reactions::{reactions, Reactions};
pub use report::{critical_report, CriticalReport};
