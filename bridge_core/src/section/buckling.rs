//! # Buckling Capacities
//!
//! Critical stresses for the four thin-plate buckling modes of a box
//! girder. Each capacity is +∞ when the plate group it depends on is
//! absent, so that mode can never govern.
//!
//! | Mode | Plates | k | t | b |
//! |------|--------|---|---|---|
//! | Case 1 | top flange between webs | 4.0 | stacked flange | inside width |
//! | Case 2 | top flange overhang | 0.425 | stacked flange | max overhang |
//! | Case 3 | web compression zone | 6.0 | stacked web | web top − ȳ |
//! | Shear | web panel | 5.0 | stacked web | web height h, spacing a |

use serde::{Deserialize, Serialize};

use super::{Plate, PlateType};
use crate::equations::buckling::{
    sigma_crit_flexural, tau_crit_shear, K_FLANGE_INSIDE, K_FLANGE_OVERHANG, K_WEB_FLEXURE,
};

/// Gap below which adjacent plates count as one stacked plate (mm)
pub const STACK_TOLERANCE: f64 = 0.01;

/// Inside and overhang widths of a flange relative to the webs (mm)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FlangeWidths {
    pub inside_width: f64,
    pub left_overhang: f64,
    pub right_overhang: f64,
    pub max_overhang: f64,
}

/// Critical buckling stresses (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BucklingCapacities {
    /// Case 1, k = 4
    pub top_flange_inside: f64,
    /// Case 2, k = 0.425
    pub top_flange_overhang: f64,
    /// Case 3, k = 6
    pub web: f64,
    /// Shear buckling, k = 5
    pub shear: f64,
}

impl BucklingCapacities {
    /// No plates for any mode
    pub fn unbounded() -> Self {
        BucklingCapacities {
            top_flange_inside: f64::INFINITY,
            top_flange_overhang: f64::INFINITY,
            web: f64::INFINITY,
            shear: f64::INFINITY,
        }
    }
}

/// Capacities together with the plate dimensions that produced them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucklingDetails {
    pub capacities: BucklingCapacities,
    /// Top flange widths, `None` without a top flange
    pub flange: Option<FlangeWidths>,
    /// Equivalent top flange thickness (mm)
    pub t_flange: f64,
    /// Equivalent web thickness (mm)
    pub t_web: f64,
    /// Highest web edge (mm), `None` without webs
    pub web_top: Option<f64>,
    /// Web top minus ȳ (mm)
    pub compression_zone_height: f64,
    /// Tallest web (mm)
    pub h_web: f64,
    pub diaphragm_spacing: Option<f64>,
}

/// Equivalent thickness of vertically stacked plates (flanges).
///
/// Sum of `h` if every consecutive pair (sorted by y) touches within
/// [`STACK_TOLERANCE`], otherwise the thinnest `h`.
pub fn stacked_thickness_vertical(plates: &[&Plate]) -> f64 {
    stacked_thickness(
        plates,
        |p| p.y,
        |lower, upper| upper.bottom() - lower.top(),
        |p| p.h,
        f64::min,
    )
}

/// Equivalent thickness of horizontally stacked plates (webs).
///
/// Sum of `b` if every consecutive pair (sorted by x) touches within
/// [`STACK_TOLERANCE`], otherwise the thickest `b`.
pub fn stacked_thickness_horizontal(plates: &[&Plate]) -> f64 {
    stacked_thickness(
        plates,
        |p| p.x,
        |left, right| right.left() - left.right(),
        |p| p.b,
        f64::max,
    )
}

fn stacked_thickness(
    plates: &[&Plate],
    key: impl Fn(&Plate) -> f64,
    gap: impl Fn(&Plate, &Plate) -> f64,
    thickness: impl Fn(&Plate) -> f64,
    pick: fn(f64, f64) -> f64,
) -> f64 {
    match plates {
        [] => 0.0,
        [only] => thickness(only),
        _ => {
            let mut sorted: Vec<&Plate> = plates.to_vec();
            sorted.sort_by(|a, b| key(a).total_cmp(&key(b)));

            let touching = sorted
                .windows(2)
                .all(|pair| gap(pair[0], pair[1]).abs() <= STACK_TOLERANCE);

            if touching {
                sorted.iter().map(|p| thickness(p)).sum()
            } else {
                sorted
                    .iter()
                    .map(|p| thickness(p))
                    .reduce(pick)
                    .unwrap_or(0.0)
            }
        }
    }
}

/// Inside width and overhangs of a flange.
///
/// The flange extent is the outer envelope of its plates. Without webs the
/// whole flange is an overhang, reported on the left side.
pub fn flange_overhang_widths(flanges: &[&Plate], webs: &[&Plate]) -> FlangeWidths {
    if flanges.is_empty() {
        return FlangeWidths::default();
    }

    let flange_left = min_of(flanges.iter().map(|p| p.left()));
    let flange_right = max_of(flanges.iter().map(|p| p.right()));
    let flange_width = flange_right - flange_left;

    if webs.is_empty() {
        return FlangeWidths {
            inside_width: 0.0,
            left_overhang: flange_width,
            right_overhang: 0.0,
            max_overhang: flange_width,
        };
    }

    let outer_left = min_of(webs.iter().map(|p| p.left()));
    let outer_right = max_of(webs.iter().map(|p| p.right()));
    // Inner faces of the two outermost webs
    let inner_left = min_of(webs.iter().map(|p| p.right()));
    let inner_right = max_of(webs.iter().map(|p| p.left()));

    let left_overhang = (outer_left - flange_left).max(0.0);
    let right_overhang = (flange_right - outer_right).max(0.0);

    FlangeWidths {
        inside_width: inner_right - inner_left,
        left_overhang,
        right_overhang,
        max_overhang: left_overhang.max(right_overhang),
    }
}

/// Buckling capacities and the dimensions behind them.
///
/// `ybar` sets the depth of the web compression zone; `spacing` adds the
/// diaphragm term to shear buckling.
pub fn buckling_details(
    plates: &[Plate],
    e: f64,
    nu: f64,
    ybar: f64,
    spacing: Option<f64>,
) -> BucklingDetails {
    let tops: Vec<&Plate> = plates
        .iter()
        .filter(|p| p.plate_type == PlateType::TopFlange)
        .collect();
    let webs: Vec<&Plate> = plates
        .iter()
        .filter(|p| p.plate_type == PlateType::Web)
        .collect();

    let mut capacities = BucklingCapacities::unbounded();
    let mut flange = None;
    let mut t_flange = 0.0;

    if !tops.is_empty() {
        let widths = flange_overhang_widths(&tops, &webs);
        t_flange = stacked_thickness_vertical(&tops);

        if widths.inside_width > 0.0 {
            capacities.top_flange_inside =
                sigma_crit_flexural(K_FLANGE_INSIDE, t_flange, widths.inside_width, e, nu);
        }
        if widths.max_overhang > 0.0 {
            capacities.top_flange_overhang =
                sigma_crit_flexural(K_FLANGE_OVERHANG, t_flange, widths.max_overhang, e, nu);
        }
        flange = Some(widths);
    }

    let mut t_web = 0.0;
    let mut web_top = None;
    let mut compression_zone_height = 0.0;
    let mut h_web = 0.0;

    if !webs.is_empty() {
        let top = max_of(webs.iter().map(|p| p.top()));
        t_web = stacked_thickness_horizontal(&webs);
        h_web = max_of(webs.iter().map(|p| p.h));
        compression_zone_height = top - ybar;
        web_top = Some(top);

        // Neutral axis at or above the web top leaves no compression zone
        if compression_zone_height > 0.0 {
            capacities.web =
                sigma_crit_flexural(K_WEB_FLEXURE, t_web, compression_zone_height, e, nu);
        }
        capacities.shear = tau_crit_shear(t_web, h_web, spacing, e, nu);
    }

    BucklingDetails {
        capacities,
        flange,
        t_flange,
        t_web,
        web_top,
        compression_zone_height,
        h_web,
        diaphragm_spacing: spacing,
    }
}

/// Critical buckling stresses for a cross-section
pub fn buckling_capacities(
    plates: &[Plate],
    e: f64,
    nu: f64,
    ybar: f64,
    spacing: Option<f64>,
) -> BucklingCapacities {
    buckling_details(plates, e, nu, ybar, spacing).capacities
}

fn min_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::INFINITY, f64::min)
}

fn max_of(values: impl Iterator<Item = f64>) -> f64 {
    values.fold(f64::NEG_INFINITY, f64::max)
}
