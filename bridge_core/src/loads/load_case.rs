//! Train load cases
//!
//! Every load case is three two-axle cars. They differ only in how the
//! total train mass is shared between the cars.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{BridgeError, BridgeResult};

/// Light freight car mass ratio for load case 3
const LIGHT_FREIGHT_RATIO: f64 = 1.0;
/// Heavy freight car is 1.1x the light freight car
const HEAVY_FREIGHT_RATIO: f64 = 1.1 * LIGHT_FREIGHT_RATIO;
/// Load case 3 locomotive is 1.38x the heavy freight car
const LC3_LOCOMOTIVE_RATIO: f64 = 1.38 * HEAVY_FREIGHT_RATIO;
/// Load case 2 locomotive is 1.35x a regular car
const LC2_LOCOMOTIVE_RATIO: f64 = 1.35;

/// Train load case.
///
/// Serializes as the integer tag used on the command line and in config
/// files (`1`, `2`, `3`). Any other tag is rejected: the wheel loads are
/// selected by it, so there is no sensible default.
///
/// # Example
/// ```
/// use bridge_core::loads::LoadCase;
///
/// let lc = LoadCase::try_from(2u8).unwrap();
/// assert_eq!(lc, LoadCase::Locomotive);
/// assert!(LoadCase::try_from(4u8).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LoadCase {
    /// Load case 1: three equal cars
    Uniform,
    /// Load case 2: locomotive (1.35x) + two regular cars
    Locomotive,
    /// Load case 3: locomotive + light freight + heavy freight
    HeavyFreight,
}

impl LoadCase {
    /// All load cases in tag order
    pub const ALL: [LoadCase; 3] = [
        LoadCase::Uniform,
        LoadCase::Locomotive,
        LoadCase::HeavyFreight,
    ];

    /// Integer tag (1, 2 or 3)
    pub fn tag(&self) -> u8 {
        match self {
            LoadCase::Uniform => 1,
            LoadCase::Locomotive => 2,
            LoadCase::HeavyFreight => 3,
        }
    }

    /// Relative mass of each car, leftmost first
    pub fn car_ratios(&self) -> [f64; 3] {
        match self {
            LoadCase::Uniform => [1.0, 1.0, 1.0],
            LoadCase::Locomotive => [LC2_LOCOMOTIVE_RATIO, 1.0, 1.0],
            LoadCase::HeavyFreight => [
                LC3_LOCOMOTIVE_RATIO,
                LIGHT_FREIGHT_RATIO,
                HEAVY_FREIGHT_RATIO,
            ],
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadCase::Uniform => "LC1: three equal cars",
            LoadCase::Locomotive => "LC2: locomotive + 2 regular",
            LoadCase::HeavyFreight => "LC3: locomotive + light + heavy freight",
        }
    }
}

impl TryFrom<u8> for LoadCase {
    type Error = BridgeError;

    fn try_from(value: u8) -> BridgeResult<Self> {
        match value {
            1 => Ok(LoadCase::Uniform),
            2 => Ok(LoadCase::Locomotive),
            3 => Ok(LoadCase::HeavyFreight),
            other => Err(BridgeError::unsupported_load_case(other)),
        }
    }
}

impl From<LoadCase> for u8 {
    fn from(lc: LoadCase) -> u8 {
        lc.tag()
    }
}

impl FromStr for LoadCase {
    type Err = BridgeError;

    fn from_str(s: &str) -> BridgeResult<Self> {
        let tag: u8 = s
            .trim()
            .parse()
            .map_err(|_| BridgeError::unsupported_load_case(s.trim()))?;
        LoadCase::try_from(tag)
    }
}

impl fmt::Display for LoadCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
