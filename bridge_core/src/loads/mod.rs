//! Moving train loads
//!
//! A train is three two-axle cars crossing the deck. Its position is given
//! by the coordinate of the leftmost wheel; the load case decides how the
//! total mass is shared between cars.
//!
//! # Overview
//!
//! - [`LoadCase`] - Mass split between locomotive and freight cars
//! - [`WheelSet`] - Six wheel positions and loads for one train position
//!
//! # Example
//!
//! ```
//! use bridge_core::loads::{wheel_loads, LoadCase};
//!
//! let wheels = wheel_loads(197.0, LoadCase::Locomotive, 452.0);
//! assert!((wheels.total_load() - 452.0).abs() < 1e-9);
//! ```

pub mod load_case;
pub mod wheels;

pub use load_case::LoadCase;
pub use wheels::{wheel_loads, WheelSet, NUM_WHEELS, TRAIN_LENGTH_MM, WHEEL_OFFSETS_MM};
