//! # bridge_core - Moving-Load Safety Analysis for Model Bridges
//!
//! `bridge_core` is the computational heart of Trestle. It predicts how a
//! thin-plate (matboard) box-girder bridge fails under a train crossing a
//! simply supported span, and at what train mass.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Every calculation is a pure function of its inputs
//! - **JSON-First**: Inputs and results implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Explicit units**: mm, N, MPa, N·mm everywhere, no conversion layer
//!
//! ## Quick Start
//!
//! ```rust
//! use bridge_core::calculations::{failure_sweep, SweepOptions};
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
//! assert!(results.overall_min_fos >= 0.0);
//! println!("fails by {} at {} N", results.governing_mode, results.failure_load);
//! ```
//!
//! ## Modules
//!
//! - [`bridge`] - Span layout and analysis stations
//! - [`loads`] - Train load cases and wheel loads
//! - [`calculations`] - Reactions, force diagrams, envelopes, FOS, failure sweep
//! - [`section`] - Plates, section properties, buckling, presets
//! - [`equations`] - Closed-form stress and buckling formulas
//! - [`materials`] - Material strengths and stiffness
//! - [`settings`] - Scenario and resolution settings
//! - [`session`] - Interactive re-analysis with envelope caching
//! - [`project`] - Project container for labelled designs
//! - [`file_io`] - Atomic project and geometry saves
//! - [`errors`] - Structured error types

pub mod bridge;
pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod loads;
pub mod materials;
pub mod project;
pub mod section;
pub mod session;
pub mod settings;

// Re-export the main entry points at crate root
pub use calculations::{
    critical_location, envelopes, failure_sweep, find_fos, internal_forces, reactions,
    EnvelopeArrays, FailureResults, FosResult,
};
pub use errors::{BridgeError, BridgeResult};
pub use file_io::{load_project, save_project};
pub use loads::{wheel_loads, LoadCase};
pub use materials::MaterialProperties;
pub use project::BridgeProject;
pub use section::{buckling_capacities, section_properties, Geometry, Plate, PlateType};
pub use session::DesignSession;
pub use settings::AnalysisSettings;
