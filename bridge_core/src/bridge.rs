//! # Bridge Layout
//!
//! Fixed geometry of the model bridge and the station grid every diagram,
//! envelope, and FOS array is sampled on.
//!
//! ```text
//!   0   25                                        1225  1250
//!   |----A==========================================B----|
//!        ^            span = 1200 mm                ^
//!     support A                                 support B
//! ```
//!
//! All lengths are millimetres.

/// Total deck length (mm)
pub const BRIDGE_LENGTH_MM: f64 = 1250.0;

/// Left support coordinate (mm)
pub const SUPPORT_A_MM: f64 = 25.0;

/// Right support coordinate (mm)
pub const SUPPORT_B_MM: f64 = 1225.0;

/// Distance between supports (mm)
pub const SPAN_MM: f64 = 1200.0;

/// Number of equally spaced stations over [0, BRIDGE_LENGTH_MM]
pub const NUM_STATIONS: usize = 10_000;

/// Station index closest to midspan (625 mm)
pub const MIDSPAN_INDEX: usize = 5_000;

/// Position of station `i` along the deck (mm).
///
/// `position = i * 1250 / 9999`, evaluated in that order so that stations
/// land on the same binary values everywhere they are computed.
///
/// ```rust
/// use bridge_core::bridge::{station_position, NUM_STATIONS, BRIDGE_LENGTH_MM};
///
/// assert_eq!(station_position(0), 0.0);
/// assert_eq!(station_position(NUM_STATIONS - 1), BRIDGE_LENGTH_MM);
/// ```
#[inline]
pub fn station_position(i: usize) -> f64 {
    i as f64 * BRIDGE_LENGTH_MM / (NUM_STATIONS - 1) as f64
}

/// All station positions (mm), length `NUM_STATIONS`
pub fn station_positions() -> Vec<f64> {
    (0..NUM_STATIONS).map(station_position).collect()
}

/// Whether a wheel at `pos` (mm) bears on the deck.
///
/// Both ends are inclusive.
#[inline]
pub fn is_on_bridge(pos: f64) -> bool {
    (0.0..=BRIDGE_LENGTH_MM).contains(&pos)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_station_grid_endpoints() {
        let xs = station_positions();
        assert_eq!(xs.len(), NUM_STATIONS);
        assert_eq!(xs[0], 0.0);
        assert_eq!(xs[NUM_STATIONS - 1], BRIDGE_LENGTH_MM);
    }

    #[test]
    fn test_midspan_station() {
        // 5000 * 1250 / 9999 = 625.06 mm
        let x = station_position(MIDSPAN_INDEX);
        assert!((x - 625.0).abs() < 0.1);
    }

    #[test]
    fn test_span_matches_supports() {
        assert_eq!(SUPPORT_B_MM - SUPPORT_A_MM, SPAN_MM);
    }

    #[test]
    fn test_on_bridge_is_inclusive() {
        assert!(is_on_bridge(0.0));
        assert!(is_on_bridge(BRIDGE_LENGTH_MM));
        assert!(!is_on_bridge(-0.001));
        assert!(!is_on_bridge(1250.001));
    }
}
