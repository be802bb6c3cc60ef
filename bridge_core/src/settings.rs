//! Analysis settings
//!
//! Scenario and resolution parameters shared by the CLI and project files.

use serde::{Deserialize, Serialize};

use crate::calculations::envelope::DEFAULT_TRAIN_POSITIONS;
use crate::calculations::failure_sweep::SweepOptions;
use crate::errors::{BridgeError, BridgeResult};
use crate::loads::LoadCase;
use crate::materials::MaterialProperties;

/// Default train mass (N)
pub const DEFAULT_MASS_N: f64 = 400.0;

/// Everything a failure sweep needs besides the geometry.
///
/// The load case has no default and must be given explicitly, in code and
/// in files. The other fields fall back to matboard values at 400 N.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    pub loadcase: LoadCase,
    /// Total train mass (N)
    #[serde(default = "default_mass")]
    pub mass_n: f64,
    #[serde(default = "default_train_positions")]
    pub num_train_positions: usize,
    #[serde(default)]
    pub material: MaterialProperties,
}

fn default_mass() -> f64 {
    DEFAULT_MASS_N
}

fn default_train_positions() -> usize {
    DEFAULT_TRAIN_POSITIONS
}

impl AnalysisSettings {
    /// Settings for a load case with the default mass, resolution and material
    pub fn new(loadcase: LoadCase) -> Self {
        AnalysisSettings {
            loadcase,
            mass_n: DEFAULT_MASS_N,
            num_train_positions: DEFAULT_TRAIN_POSITIONS,
            material: MaterialProperties::default(),
        }
    }

    pub fn validate(&self) -> BridgeResult<()> {
        if !self.mass_n.is_finite() || self.mass_n <= 0.0 {
            return Err(BridgeError::invalid_input(
                "mass_n",
                self.mass_n.to_string(),
                "Train mass must be a finite, positive force in N",
            ));
        }
        if self.num_train_positions < 2 {
            return Err(BridgeError::invalid_input(
                "num_train_positions",
                self.num_train_positions.to_string(),
                "At least two train positions are required",
            ));
        }
        self.material.validate()
    }

    pub fn sweep_options(&self) -> SweepOptions {
        SweepOptions {
            num_train_positions: self.num_train_positions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_valid() {
        let s = AnalysisSettings::new(LoadCase::Uniform);
        assert!(s.validate().is_ok());
        assert_eq!(s.mass_n, DEFAULT_MASS_N);
        assert_eq!(s.sweep_options().num_train_positions, 1000);
    }

    #[test]
    fn test_rejects_single_position() {
        let s = AnalysisSettings {
            num_train_positions: 1,
            ..AnalysisSettings::new(LoadCase::Uniform)
        };
        assert_eq!(s.validate().unwrap_err().error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let s: AnalysisSettings = serde_json::from_str(r#"{"loadcase":2,"mass_n":452}"#).unwrap();
        assert_eq!(s.loadcase, LoadCase::Locomotive);
        assert_eq!(s.num_train_positions, 1000);
        assert_eq!(s.material, MaterialProperties::matboard());
    }

    #[test]
    fn test_missing_loadcase_rejected() {
        let err = serde_json::from_str::<AnalysisSettings>(r#"{"mass_n":452}"#).unwrap_err();
        assert!(err.to_string().contains("loadcase"));
        assert!(serde_json::from_str::<AnalysisSettings>("{}").is_err());
    }

    #[test]
    fn test_bad_loadcase_rejected() {
        assert!(serde_json::from_str::<AnalysisSettings>(r#"{"loadcase":7}"#).is_err());
    }
}
