//! # Section Properties
//!
//! Geometric properties of a plate cross-section about its horizontal
//! centroidal axis.
//!
//! ## Formulas
//!
//! - ȳ = Σ(A·y) / ΣA
//! - I = Σ[b·h³/12 + A·(y − ȳ)²]  (parallel-axis theorem)
//! - Q(y) = Σ A_above·(y_c,above − ȳ)
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::section::{presets, section_properties};
//!
//! let g = presets::simple_square();
//! let props = section_properties(&g.plates, &g.glue_joints);
//! assert!((props.ybar - 50.0).abs() < 1e-9);
//! assert_eq!(props.glue.len(), 2);
//! ```

use serde::{Deserialize, Serialize};

use super::Plate;

/// Total area below which a section is treated as empty
const AREA_EPSILON: f64 = 1e-9;

/// Edge-coincidence tolerance for glue contact (mm)
pub const GLUE_EDGE_TOLERANCE: f64 = 1e-6;

/// Properties of one glue interface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GlueJointProperties {
    /// Joint height (mm)
    pub y: f64,
    /// First moment of area above the joint (mm³)
    pub q: f64,
    /// Glue contact width (mm)
    pub width: f64,
}

/// Cross-section properties used by the stress checks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionProperties {
    /// Neutral axis height from the section bottom (mm)
    pub ybar: f64,
    /// Second moment of area (mm⁴)
    pub i: f64,
    /// Total area (mm²)
    pub area: f64,
    /// Neutral axis to top fiber (mm)
    pub y_top: f64,
    /// Neutral axis to bottom fiber (mm)
    pub y_bot: f64,
    /// First moment of area above the neutral axis (mm³)
    pub q_cent: f64,
    /// Section width at the neutral axis (mm)
    pub b_cent: f64,
    /// One entry per glue joint, in input order
    pub glue: Vec<GlueJointProperties>,
}

/// Neutral axis height. Returns 0 for an empty (zero-area) section.
pub fn ybar(plates: &[Plate]) -> f64 {
    let (area, sum_ay) = plates.iter().fold((0.0, 0.0), |(a, ay), p| {
        let pa = p.area();
        (a + pa, ay + pa * p.y)
    });

    if area < AREA_EPSILON {
        return 0.0;
    }
    sum_ay / area
}

/// Second moment of area about the neutral axis
pub fn moment_of_inertia(plates: &[Plate]) -> f64 {
    moment_of_inertia_about(plates, ybar(plates))
}

fn moment_of_inertia_about(plates: &[Plate], ybar: f64) -> f64 {
    plates
        .iter()
        .map(|p| {
            let d = p.y - ybar;
            p.b * p.h.powi(3) / 12.0 + p.area() * d * d
        })
        .sum()
}

/// First moment of the area above `y_cut`, taken about the neutral axis.
///
/// A plate straddling the cut contributes only the sliver above it,
/// centred on the sliver's own midpoint.
pub fn first_moment_q(plates: &[Plate], y_cut: f64) -> f64 {
    first_moment_about(plates, y_cut, ybar(plates))
}

fn first_moment_about(plates: &[Plate], y_cut: f64, ybar: f64) -> f64 {
    let mut q = 0.0;
    for p in plates {
        let top = p.top();
        if top <= y_cut {
            continue;
        }
        if p.bottom() >= y_cut {
            q += p.area() * (p.y - ybar);
        } else {
            let h_above = top - y_cut;
            let yc_above = y_cut + h_above / 2.0;
            q += p.b * h_above * (yc_above - ybar);
        }
    }
    q
}

/// Sum of widths of plates whose vertical extent contains `y` (inclusive)
pub fn width_at(plates: &[Plate], y: f64) -> f64 {
    plates
        .iter()
        .filter(|p| p.bottom() <= y && y <= p.top())
        .map(|p| p.b)
        .sum()
}

/// Glue contact width at height `y_glue`.
///
/// Pairs every plate whose bottom edge sits on the joint with every plate
/// whose top edge does, and sums their horizontal overlaps.
pub fn glue_width(plates: &[Plate], y_glue: f64) -> f64 {
    let above: Vec<&Plate> = plates
        .iter()
        .filter(|p| (p.bottom() - y_glue).abs() < GLUE_EDGE_TOLERANCE)
        .collect();
    let below: Vec<&Plate> = plates
        .iter()
        .filter(|p| (p.top() - y_glue).abs() < GLUE_EDGE_TOLERANCE)
        .collect();

    if above.is_empty() || below.is_empty() {
        return 0.0;
    }

    let mut total = 0.0;
    for lower in &below {
        for upper in &above {
            let left = lower.left().max(upper.left());
            let right = lower.right().min(upper.right());
            if right > left {
                total += right - left;
            }
        }
    }
    total
}

/// All section properties for a set of plates and glue joints.
pub fn section_properties(plates: &[Plate], glue_joints: &[f64]) -> SectionProperties {
    let ybar = ybar(plates);
    let i = moment_of_inertia_about(plates, ybar);

    let (y_top, y_bot) = if plates.is_empty() {
        (0.0, 0.0)
    } else {
        let top = plates.iter().map(Plate::top).fold(f64::NEG_INFINITY, f64::max);
        let bottom = plates.iter().map(Plate::bottom).fold(f64::INFINITY, f64::min);
        (top - ybar, ybar - bottom)
    };

    let glue = glue_joints
        .iter()
        .map(|&y| GlueJointProperties {
            y,
            q: first_moment_about(plates, y, ybar),
            width: glue_width(plates, y),
        })
        .collect();

    SectionProperties {
        ybar,
        i,
        area: plates.iter().map(Plate::area).sum(),
        y_top,
        y_bot,
        q_cent: first_moment_about(plates, ybar, ybar),
        b_cent: width_at(plates, ybar),
        glue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rect(b: f64, h: f64, x: f64, y: f64) -> Plate {
        Plate::web(b, h, x, y).unwrap()
    }

    fn hollow_box() -> Vec<Plate> {
        vec![
            Plate::top_flange(100.0, 1.27, 50.0, 99.365).unwrap(),
            Plate::web(1.27, 97.46, 0.635, 50.0).unwrap(),
            Plate::web(1.27, 97.46, 99.365, 50.0).unwrap(),
            Plate::bottom_flange(100.0, 1.27, 50.0, 0.635).unwrap(),
        ]
    }

    #[test]
    fn test_single_rectangle() {
        let plates = [rect(10.0, 20.0, 0.0, 10.0)];
        let props = section_properties(&plates, &[]);
        assert_relative_eq!(props.ybar, 10.0);
        assert_relative_eq!(props.i, 10.0 * 20.0_f64.powi(3) / 12.0);
        assert_relative_eq!(props.y_top, 10.0);
        assert_relative_eq!(props.y_bot, 10.0);
        // Q at centroid of a rectangle = b·(h/2)·(h/4)
        assert_relative_eq!(props.q_cent, 10.0 * 10.0 * 5.0);
        assert_relative_eq!(props.b_cent, 10.0);
    }

    #[test]
    fn test_empty_section_falls_back() {
        assert_eq!(ybar(&[]), 0.0);
        let props = section_properties(&[], &[10.0]);
        assert_eq!(props.i, 0.0);
        assert_eq!(props.y_top, 0.0);
        assert_eq!(props.glue[0].width, 0.0);
    }

    #[test]
    fn test_hollow_box_symmetric() {
        let plates = hollow_box();
        let props = section_properties(&plates, &[98.73, 1.27]);
        assert_relative_eq!(props.ybar, 50.0, epsilon = 1e-9);
        assert_relative_eq!(props.y_top, 50.0, epsilon = 1e-9);
        assert_relative_eq!(props.y_bot, 50.0, epsilon = 1e-9);
        assert_relative_eq!(props.b_cent, 2.54, epsilon = 1e-12);
        assert!(props.i > 0.0);
    }

    #[test]
    fn test_q_regions() {
        let plates = [rect(10.0, 20.0, 0.0, 10.0)];
        // Above everything
        assert_eq!(first_moment_q(&plates, 20.0), 0.0);
        // Below everything: full area about its own centroid
        assert_relative_eq!(first_moment_q(&plates, 0.0), 0.0, epsilon = 1e-12);
        // Sliver of the top 5 mm: area 50, centroid 17.5, d = 7.5
        assert_relative_eq!(first_moment_q(&plates, 15.0), 375.0);
    }

    #[test]
    fn test_width_inclusive() {
        let plates = [rect(4.0, 10.0, 0.0, 5.0), rect(6.0, 10.0, 0.0, 15.0)];
        assert_eq!(width_at(&plates, 10.0), 10.0);
        assert_eq!(width_at(&plates, 0.0), 4.0);
        assert_eq!(width_at(&plates, 20.5), 0.0);
    }

    #[test]
    fn test_glue_width_overlap() {
        let plates = [
            Plate::top_flange(100.0, 1.27, 50.0, 74.365).unwrap(),
            Plate::top_flange(5.0, 1.27, 13.77, 73.095).unwrap(),
            Plate::top_flange(5.0, 1.27, 86.23, 73.095).unwrap(),
        ];
        // Two full 5 mm tabs under the deck
        assert_relative_eq!(glue_width(&plates, 73.73), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_glue_width_design0_joints() {
        let g = crate::section::presets::design0();
        // Deck rests on both tabs and both web tops
        assert_relative_eq!(glue_width(&g.plates, 73.73), 12.54, epsilon = 1e-9);
        // Bottom flange carries the two web bottoms only
        assert_relative_eq!(glue_width(&g.plates, 1.27), 2.54, epsilon = 1e-9);
    }

    #[test]
    fn test_glue_width_needs_both_sides() {
        let plates = [rect(10.0, 2.0, 0.0, 1.0)];
        assert_eq!(glue_width(&plates, 2.0), 0.0);
        assert_eq!(glue_width(&plates, 0.0), 0.0);
    }

    #[test]
    fn test_glue_width_partial_overlap() {
        let plates = [rect(10.0, 2.0, 0.0, 1.0), rect(10.0, 2.0, 6.0, 3.0)];
        // [-5, 5] ∩ [1, 11] = 4
        assert_relative_eq!(glue_width(&plates, 2.0), 4.0, epsilon = 1e-12);
    }
}
