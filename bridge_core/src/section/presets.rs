//! Named cross-section presets
//!
//! All presets are built from 1.27 mm matboard.

use super::{Geometry, Plate, PlateType};
use crate::errors::{BridgeError, BridgeResult};

/// Matboard sheet thickness (mm)
pub const MATBOARD_THICKNESS: f64 = 1.27;

/// Default diaphragm spacing used by the presets (mm)
pub const DEFAULT_DIAPHRAGM_SPACING: f64 = 150.0;

const PRESET_NAMES: [&str; 3] = ["design0", "simple_square", "cigar"];

fn plate(plate_type: PlateType, b: f64, h: f64, x: f64, y: f64) -> Plate {
    Plate {
        b,
        h,
        x,
        y,
        plate_type,
    }
}

/// Baseline box girder with glue tabs under the deck
pub fn design0() -> Geometry {
    let t = MATBOARD_THICKNESS;
    Geometry::new(vec![
        plate(PlateType::TopFlange, 100.0, t, 50.0, 74.365),
        plate(PlateType::Web, t, 72.46, 10.635, 37.5),
        plate(PlateType::Web, t, 72.46, 89.365, 37.5),
        plate(PlateType::BottomFlange, 80.0, t, 50.0, 0.635),
        plate(PlateType::TopFlange, 5.0, t, 13.77, 73.095),
        plate(PlateType::TopFlange, 5.0, t, 86.23, 73.095),
    ])
    .with_glue_joints([73.73, 1.27])
    .with_diaphragm_spacing(DEFAULT_DIAPHRAGM_SPACING)
}

/// 100 x 100 mm hollow box
pub fn simple_square() -> Geometry {
    let t = MATBOARD_THICKNESS;
    Geometry::new(vec![
        plate(PlateType::TopFlange, 100.0, t, 50.0, 99.365),
        plate(PlateType::Web, t, 97.46, 0.635, 50.0),
        plate(PlateType::Web, t, 97.46, 99.365, 50.0),
        plate(PlateType::BottomFlange, 100.0, t, 50.0, 0.635),
    ])
    .with_glue_joints([98.73, 1.27])
    .with_diaphragm_spacing(DEFAULT_DIAPHRAGM_SPACING)
}

/// Tall section with a triple-layer top flange
pub fn cigar() -> Geometry {
    let t = MATBOARD_THICKNESS;
    Geometry::new(vec![
        plate(PlateType::TopFlange, 100.0, t, 49.650, 113.122),
        plate(PlateType::Web, t, 112.0, 10.635, 56.487),
        plate(PlateType::Web, t, 112.0, 86.905, 56.487),
        plate(PlateType::BottomFlange, 75.0, t, 48.770, 1.122),
        plate(PlateType::TopFlange, 75.0, t, 48.770, 110.582),
        plate(PlateType::TopFlange, 75.0, t, 48.770, 111.852),
    ])
    .with_diaphragm_spacing(DEFAULT_DIAPHRAGM_SPACING)
}

/// Names accepted by [`by_name`]
pub fn names() -> &'static [&'static str] {
    &PRESET_NAMES
}

/// Look up a preset by name
pub fn by_name(name: &str) -> BridgeResult<Geometry> {
    match name {
        "design0" => Ok(design0()),
        "simple_square" => Ok(simple_square()),
        "cigar" => Ok(cigar()),
        other => Err(BridgeError::design_not_found(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_name_resolves() {
        for name in names() {
            let g = by_name(name).unwrap();
            assert!(g.validate().is_ok(), "{} failed validation", name);
        }
    }

    #[test]
    fn test_unknown_preset() {
        let err = by_name("bridge9000").unwrap_err();
        assert_eq!(err.error_code(), "DESIGN_NOT_FOUND");
    }

    #[test]
    fn test_cigar_has_no_glue() {
        assert!(cigar().glue_joints.is_empty());
        assert_eq!(cigar().plates_of(PlateType::TopFlange).count(), 3);
    }
}
