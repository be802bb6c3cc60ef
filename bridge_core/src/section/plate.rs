//! Plates and cross-section geometry
//!
//! A cross-section is an unordered collection of thin rectangular plates,
//! each tagged with the role it plays. Coordinates are plate centres in mm,
//! with y measured up from the bottom of the section.
//!
//! ```text
//!   ┌──────────────────────┐  top_flange
//!   └─┬──┬────────────┬──┬─┘
//!     │  │            │  │    web
//!     │  │            │  │
//!    ┌┴──┴────────────┴──┴┐   bottom_flange
//!    └────────────────────┘
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{BridgeError, BridgeResult};

/// Structural role of a plate.
///
/// Serialized as `"top_flange"`, `"web"` or `"bottom_flange"`. Any other
/// tag is rejected, since buckling and stress checks select plates by it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum PlateType {
    TopFlange,
    Web,
    BottomFlange,
}

impl PlateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlateType::TopFlange => "top_flange",
            PlateType::Web => "web",
            PlateType::BottomFlange => "bottom_flange",
        }
    }
}

impl FromStr for PlateType {
    type Err = BridgeError;

    fn from_str(s: &str) -> BridgeResult<Self> {
        match s {
            "top_flange" => Ok(PlateType::TopFlange),
            "web" => Ok(PlateType::Web),
            "bottom_flange" => Ok(PlateType::BottomFlange),
            other => Err(BridgeError::unknown_plate_type(other)),
        }
    }
}

impl TryFrom<String> for PlateType {
    type Error = BridgeError;

    fn try_from(value: String) -> BridgeResult<Self> {
        value.parse()
    }
}

impl fmt::Display for PlateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Idealised rectangular plate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Plate {
    /// Horizontal extent (mm)
    pub b: f64,
    /// Vertical extent (mm)
    pub h: f64,
    /// Centre x (mm)
    pub x: f64,
    /// Centre y (mm)
    pub y: f64,
    pub plate_type: PlateType,
}

impl Plate {
    /// Create a plate, rejecting non-positive or non-finite dimensions.
    pub fn new(plate_type: PlateType, b: f64, h: f64, x: f64, y: f64) -> BridgeResult<Self> {
        let plate = Plate {
            b,
            h,
            x,
            y,
            plate_type,
        };
        plate.validate()?;
        Ok(plate)
    }

    pub fn top_flange(b: f64, h: f64, x: f64, y: f64) -> BridgeResult<Self> {
        Self::new(PlateType::TopFlange, b, h, x, y)
    }

    pub fn web(b: f64, h: f64, x: f64, y: f64) -> BridgeResult<Self> {
        Self::new(PlateType::Web, b, h, x, y)
    }

    pub fn bottom_flange(b: f64, h: f64, x: f64, y: f64) -> BridgeResult<Self> {
        Self::new(PlateType::BottomFlange, b, h, x, y)
    }

    pub fn validate(&self) -> BridgeResult<()> {
        for (field, value) in [("b", self.b), ("h", self.h)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(BridgeError::invalid_input(
                    format!("plate.{}", field),
                    value.to_string(),
                    "Plate dimensions must be positive",
                ));
            }
        }
        for (field, value) in [("x", self.x), ("y", self.y)] {
            if !value.is_finite() {
                return Err(BridgeError::invalid_input(
                    format!("plate.{}", field),
                    value.to_string(),
                    "Plate coordinates must be finite",
                ));
            }
        }
        Ok(())
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.b * self.h
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y + self.h / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y - self.h / 2.0
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x - self.b / 2.0
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.b / 2.0
    }
}

/// A complete cross-section: plates, glue joint heights, and optional
/// diaphragm spacing along the span.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Geometry {
    pub plates: Vec<Plate>,
    /// y-coordinates of glue interfaces (mm)
    #[serde(default)]
    pub glue_joints: Vec<f64>,
    /// Distance between diaphragms (mm)
    #[serde(default)]
    pub diaphragm_spacing: Option<f64>,
}

impl Geometry {
    pub fn new(plates: Vec<Plate>) -> Self {
        Geometry {
            plates,
            glue_joints: Vec::new(),
            diaphragm_spacing: None,
        }
    }

    pub fn with_glue_joints(mut self, joints: impl IntoIterator<Item = f64>) -> Self {
        self.glue_joints.extend(joints);
        self
    }

    pub fn with_diaphragm_spacing(mut self, spacing: f64) -> Self {
        self.diaphragm_spacing = Some(spacing);
        self
    }

    /// Plates of one role, in declaration order
    pub fn plates_of(&self, plate_type: PlateType) -> impl Iterator<Item = &Plate> {
        self.plates
            .iter()
            .filter(move |p| p.plate_type == plate_type)
    }

    pub fn has_webs(&self) -> bool {
        self.plates_of(PlateType::Web).next().is_some()
    }

    pub fn total_area(&self) -> f64 {
        self.plates.iter().map(Plate::area).sum()
    }

    /// Check every plate, joint and spacing value.
    ///
    /// Overlapping plates are not detected; they simply double-count area.
    pub fn validate(&self) -> BridgeResult<()> {
        for plate in &self.plates {
            plate.validate()?;
        }
        if let Some(y) = self.glue_joints.iter().find(|y| !y.is_finite()) {
            return Err(BridgeError::invalid_input(
                "glue_joints",
                y.to_string(),
                "Glue joint heights must be finite",
            ));
        }
        if let Some(spacing) = self.diaphragm_spacing {
            if !spacing.is_finite() || spacing <= 0.0 {
                return Err(BridgeError::invalid_input(
                    "diaphragm_spacing",
                    spacing.to_string(),
                    "Diaphragm spacing must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Cross-section in effect at a station.
///
/// Every analysis reads geometry through this trait so that a caller can
/// supply a section that varies along the span.
pub trait GeometryLookup {
    /// Geometry at position `x` (mm) along the deck
    fn geometry_at(&self, x: f64) -> &Geometry;
}

impl GeometryLookup for Geometry {
    fn geometry_at(&self, _x: f64) -> &Geometry {
        self
    }
}
