//! # Cross-Section Geometry
//!
//! Thin-plate cross-sections and everything derived from their plates
//! alone: centroid, stiffness, first moments, glue contact widths, and
//! buckling capacities. Nothing here depends on the train loading.
//!
//! ## Modules
//!
//! - [`plate`] - Plates, plate roles, and the [`Geometry`] value
//! - [`properties`] - ȳ, I, Q(y), width(y), glue width
//! - [`buckling`] - Flange/web buckling capacities
//! - [`presets`] - Named reference sections

pub mod buckling;
pub mod plate;
pub mod presets;
pub mod properties;

pub use buckling::{
    buckling_capacities, buckling_details, flange_overhang_widths, stacked_thickness_horizontal,
    stacked_thickness_vertical, BucklingCapacities, BucklingDetails, FlangeWidths,
};
pub use plate::{Geometry, GeometryLookup, Plate, PlateType};
pub use properties::{
    first_moment_q, glue_width, moment_of_inertia, section_properties, width_at, ybar,
    GlueJointProperties, SectionProperties,
};
