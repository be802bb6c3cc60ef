//! # Material Properties
//!
//! Elastic constants and strength limits for the plate material and the
//! adhesive joining the plates. All stresses in MPa.
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::materials::MaterialProperties;
//!
//! let mat = MaterialProperties::matboard();
//! assert_eq!(mat.e, 4000.0);
//! assert!(mat.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{BridgeError, BridgeResult};

/// Material constants used by the failure checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Young's modulus (MPa)
    #[serde(rename = "E", alias = "e")]
    pub e: f64,
    /// Poisson's ratio
    pub nu: f64,
    /// Tensile strength (MPa)
    pub sigma_tens: f64,
    /// Compressive strength (MPa)
    pub sigma_comp: f64,
    /// Shear strength of the plate material (MPa)
    pub tau_max: f64,
    /// Shear strength of the glue (MPa)
    pub tau_glue_max: f64,
}

impl MaterialProperties {
    /// 1.27 mm matboard with contact cement
    pub fn matboard() -> Self {
        MaterialProperties {
            e: 4000.0,
            nu: 0.2,
            sigma_tens: 30.0,
            sigma_comp: 6.0,
            tau_max: 4.0,
            tau_glue_max: 2.0,
        }
    }

    /// Check that moduli and strengths are positive and ν lies in (0, 0.5)
    pub fn validate(&self) -> BridgeResult<()> {
        let positive = [
            ("E", self.e),
            ("sigma_tens", self.sigma_tens),
            ("sigma_comp", self.sigma_comp),
            ("tau_max", self.tau_max),
            ("tau_glue_max", self.tau_glue_max),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(BridgeError::invalid_input(
                    field,
                    value.to_string(),
                    "Material constants must be positive",
                ));
            }
        }

        if !(self.nu > 0.0 && self.nu < 0.5) {
            return Err(BridgeError::invalid_input(
                "nu",
                self.nu.to_string(),
                "Poisson's ratio must be between 0 and 0.5",
            ));
        }
        Ok(())
    }
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self::matboard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matboard_values() {
        let m = MaterialProperties::default();
        assert_eq!(m.nu, 0.2);
        assert_eq!(m.sigma_tens, 30.0);
        assert_eq!(m.sigma_comp, 6.0);
        assert_eq!(m.tau_max, 4.0);
        assert_eq!(m.tau_glue_max, 2.0);
    }

    #[test]
    fn test_poisson_bounds() {
        let mut m = MaterialProperties::matboard();
        m.nu = 0.5;
        assert!(m.validate().is_err());
        m.nu = 0.0;
        assert!(m.validate().is_err());
        m.nu = f64::NAN;
        assert!(m.validate().is_err());
    }

    #[test]
    fn test_negative_strength_rejected() {
        let mut m = MaterialProperties::matboard();
        m.tau_glue_max = -2.0;
        let err = m.validate().unwrap_err();
        assert!(err.to_string().contains("tau_glue_max"));
    }

    #[test]
    fn test_serde_modulus_key() {
        let json = serde_json::to_string(&MaterialProperties::matboard()).unwrap();
        assert!(json.contains("\"E\":4000.0"));
        let m: MaterialProperties = serde_json::from_str(
            r#"{"e":3500,"nu":0.25,"sigma_tens":30,"sigma_comp":6,"tau_max":4,"tau_glue_max":2}"#,
        )
        .unwrap();
        assert_eq!(m.e, 3500.0);
    }
}
