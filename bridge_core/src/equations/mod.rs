//! # Structural Mechanics Equations
//!
//! Closed-form formulas used by the section and failure calculations.
//! Keeping them here, apart from the geometry bookkeeping, makes each one
//! easy to check against a textbook.
//!
//! ## Modules
//!
//! - [`stress`] - Bending (Navier) and shear (VQ/Ib) stresses
//! - [`buckling`] - Thin-plate flexural and shear buckling
//!
//! ## Sign Conventions
//!
//! - **Moment**: Positive causes tension on bottom fiber (sagging)
//! - **Stress**: Tension positive, compression negative
//! - **Units**: mm, N, MPa, N·mm throughout

pub mod buckling;
pub mod stress;

pub use buckling::{
    sigma_crit_flexural, tau_crit_shear, K_FLANGE_INSIDE, K_FLANGE_OVERHANG, K_SHEAR,
    K_WEB_FLEXURE,
};
pub use stress::{shear_stress, sigma_bot, sigma_top, STIFFNESS_EPSILON};
