//! Wheel positions and loads for one train position.

use serde::{Deserialize, Serialize};

use super::LoadCase;
use crate::bridge::is_on_bridge;

/// Wheel offsets from the leftmost wheel (mm).
///
/// Three two-axle cars; inter-axle gaps are 176, 164, 176, 164, 176.
pub const WHEEL_OFFSETS_MM: [f64; 6] = [0.0, 176.0, 340.0, 516.0, 680.0, 856.0];

/// Distance from the leftmost to the rightmost wheel (mm)
pub const TRAIN_LENGTH_MM: f64 = 856.0;

/// Number of wheels (contact points) on the train
pub const NUM_WHEELS: usize = 6;

/// Six wheel positions (mm) and loads (N), leftmost wheel first.
///
/// The loads always sum to the train mass, whatever the load case.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelSet {
    /// Wheel coordinates along the deck (mm). May lie off the bridge.
    pub positions: [f64; NUM_WHEELS],
    /// Wheel loads (N)
    pub loads: [f64; NUM_WHEELS],
}

impl WheelSet {
    /// Build the wheel set for leftmost-wheel coordinate `x` (mm).
    ///
    /// `x` is unrestricted: the train may sit fully or partially off the
    /// deck.
    ///
    /// # Example
    /// ```
    /// use bridge_core::loads::{LoadCase, WheelSet};
    ///
    /// let wheels = WheelSet::new(100.0, LoadCase::Uniform, 600.0);
    /// assert_eq!(wheels.positions[5], 956.0);
    /// assert!(wheels.loads.iter().all(|&p| p == 100.0));
    /// ```
    pub fn new(x: f64, loadcase: LoadCase, mass: f64) -> Self {
        let mut positions = [0.0; NUM_WHEELS];
        for (pos, offset) in positions.iter_mut().zip(WHEEL_OFFSETS_MM) {
            *pos = x + offset;
        }

        WheelSet {
            positions,
            loads: wheel_loads_for(loadcase, mass),
        }
    }

    /// Wheels whose position lies on the deck, as `(position, load)`
    pub fn on_bridge(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.positions
            .iter()
            .zip(self.loads.iter())
            .filter(|(pos, _)| is_on_bridge(**pos))
            .map(|(&pos, &load)| (pos, load))
    }

    /// Sum of all six wheel loads (N)
    pub fn total_load(&self) -> f64 {
        self.loads.iter().sum()
    }

    /// Sum of the loads of wheels currently on the deck (N)
    pub fn on_bridge_load(&self) -> f64 {
        self.on_bridge().map(|(_, load)| load).sum()
    }

    /// Whether any wheel bears on the deck
    pub fn any_on_bridge(&self) -> bool {
        self.on_bridge().next().is_some()
    }
}

/// Split the train mass over the six wheels.
///
/// Each car's mass is `ratio / Σratio * mass`, shared evenly between its
/// two wheels.
fn wheel_loads_for(loadcase: LoadCase, mass: f64) -> [f64; NUM_WHEELS] {
    if loadcase == LoadCase::Uniform {
        return [mass / 6.0; NUM_WHEELS];
    }

    let ratios = loadcase.car_ratios();
    let total_ratio: f64 = ratios.iter().sum();
    let unit_car = mass / total_ratio;

    let mut loads = [0.0; NUM_WHEELS];
    for (car, ratio) in ratios.iter().enumerate() {
        let car_mass = ratio * unit_car;
        loads[2 * car] = car_mass / 2.0;
        loads[2 * car + 1] = car_mass / 2.0;
    }
    loads
}

/// Wheel positions and loads for one train position.
///
/// Convenience wrapper around [`WheelSet::new`].
pub fn wheel_loads(x: f64, loadcase: LoadCase, mass: f64) -> WheelSet {
    WheelSet::new(x, loadcase, mass)
}
