//! # Factor of Safety at a Station
//!
//! Combines the envelope forces at one station with the cross-section in
//! effect there, and compares eight applied stresses against their
//! capacities.
//!
//! | Mode | Applied | Capacity |
//! |------|---------|----------|
//! | tension | max fiber tension | σ_tens |
//! | compression | max fiber compression | σ_comp |
//! | shear | τ at centroid | τ_max |
//! | glue | max τ over glue joints | τ_glue_max |
//! | flexural_buckling_case1 | top fiber compression | flange inside (k = 4) |
//! | flexural_buckling_case2 | top fiber compression | flange overhang (k = 0.425) |
//! | flexural_buckling_case3 | web-top compression | web (k = 6) |
//! | shear_buckling | τ at centroid | τ_crit |
//!
//! The station FOS is the smallest of the eight; ties go to the mode
//! listed first.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::equations::stress::{shear_stress, sigma_bot, sigma_top, STIFFNESS_EPSILON};
use crate::materials::MaterialProperties;
use crate::section::{
    buckling_details, section_properties, BucklingDetails, GeometryLookup, PlateType,
    SectionProperties,
};

/// Applied stresses below this magnitude cannot cause failure
pub const APPLIED_EPSILON: f64 = 1e-10;

/// Failure modes in evaluation (and tie-break) order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureMode {
    Tension,
    Compression,
    Shear,
    Glue,
    FlexuralBucklingCase1,
    FlexuralBucklingCase2,
    FlexuralBucklingCase3,
    ShearBuckling,
}

impl FailureMode {
    pub const ALL: [FailureMode; 8] = [
        FailureMode::Tension,
        FailureMode::Compression,
        FailureMode::Shear,
        FailureMode::Glue,
        FailureMode::FlexuralBucklingCase1,
        FailureMode::FlexuralBucklingCase2,
        FailureMode::FlexuralBucklingCase3,
        FailureMode::ShearBuckling,
    ];

    /// Machine label, e.g. `flexural_buckling_case2`
    pub fn label(&self) -> &'static str {
        match self {
            FailureMode::Tension => "tension",
            FailureMode::Compression => "compression",
            FailureMode::Shear => "shear",
            FailureMode::Glue => "glue",
            FailureMode::FlexuralBucklingCase1 => "flexural_buckling_case1",
            FailureMode::FlexuralBucklingCase2 => "flexural_buckling_case2",
            FailureMode::FlexuralBucklingCase3 => "flexural_buckling_case3",
            FailureMode::ShearBuckling => "shear_buckling",
        }
    }

    /// Whether the predicted failure is a shear force (else a moment)
    pub fn is_shear_mode(&self) -> bool {
        matches!(
            self,
            FailureMode::Shear | FailureMode::Glue | FailureMode::ShearBuckling
        )
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for FailureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Eight factors of safety and the governing mode
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FosResult {
    pub fos_tens: f64,
    pub fos_comp: f64,
    pub fos_shear: f64,
    pub fos_glue: f64,
    pub fos_buck1: f64,
    pub fos_buck2: f64,
    pub fos_buck3: f64,
    pub fos_buck_v: f64,
    pub min_fos: f64,
    pub failure_mode: FailureMode,
}

impl FosResult {
    /// Build from the eight values in [`FailureMode::ALL`] order
    pub fn from_values(values: [f64; 8]) -> Self {
        let mut governing = FailureMode::Tension;
        let mut min_fos = values[0];
        for mode in &FailureMode::ALL[1..] {
            let value = values[mode.index()];
            if value < min_fos {
                min_fos = value;
                governing = *mode;
            }
        }

        FosResult {
            fos_tens: values[0],
            fos_comp: values[1],
            fos_shear: values[2],
            fos_glue: values[3],
            fos_buck1: values[4],
            fos_buck2: values[5],
            fos_buck3: values[6],
            fos_buck_v: values[7],
            min_fos,
            failure_mode: governing,
        }
    }

    /// Values in [`FailureMode::ALL`] order
    pub fn values(&self) -> [f64; 8] {
        [
            self.fos_tens,
            self.fos_comp,
            self.fos_shear,
            self.fos_glue,
            self.fos_buck1,
            self.fos_buck2,
            self.fos_buck3,
            self.fos_buck_v,
        ]
    }

    pub fn get(&self, mode: FailureMode) -> f64 {
        self.values()[mode.index()]
    }
}

/// Worst fiber stresses under both bounding moments (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StressEnvelope {
    /// Largest tension at either fiber
    pub tension_max: f64,
    /// Most negative compression at either fiber
    pub compression_max: f64,
    /// Most negative top-fiber stress
    pub top_compression: f64,
    /// Most negative bottom-fiber stress
    pub bottom_compression: f64,
}

/// Applied stresses at a station (MPa)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AppliedStresses {
    pub fibers: StressEnvelope,
    pub tau_cent: f64,
    pub tau_glue: f64,
    pub sigma_web: f64,
}

/// Everything evaluated at one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationAnalysis {
    pub section: SectionProperties,
    pub buckling: BucklingDetails,
    pub applied: AppliedStresses,
    pub fos: FosResult,
}

/// capacity / |applied|, or +∞ when the applied value is negligible.
///
/// ```rust
/// use bridge_core::calculations::fos::calculate_fos;
///
/// assert_eq!(calculate_fos(-3.0, 6.0), 2.0);
/// assert!(calculate_fos(0.0, 6.0).is_infinite());
/// ```
#[inline]
pub fn calculate_fos(applied: f64, capacity: f64) -> f64 {
    if applied.abs() < APPLIED_EPSILON {
        return f64::INFINITY;
    }
    capacity / applied.abs()
}

/// Fiber stresses under `m_max` and `m_min`, reduced to the worst cases
pub fn stress_envelope(m_max: f64, m_min: f64, y_top: f64, y_bot: f64, i: f64) -> StressEnvelope {
    let top_sag = sigma_top(m_max, y_top, i);
    let bot_sag = sigma_bot(m_max, y_bot, i);
    let top_hog = sigma_top(m_min, y_top, i);
    let bot_hog = sigma_bot(m_min, y_bot, i);

    let top_comp = top_sag.min(top_hog);
    let top_tens = top_sag.max(top_hog);
    let bot_tens = bot_sag.max(bot_hog);
    let bot_comp = bot_sag.min(bot_hog);

    StressEnvelope {
        tension_max: top_tens.max(bot_tens),
        compression_max: top_comp.min(bot_comp),
        top_compression: top_comp,
        bottom_compression: bot_comp,
    }
}

/// Largest glue shear stress over joints with contact; 0 if none
pub fn max_glue_stress(section: &SectionProperties, v_env: f64) -> f64 {
    section
        .glue
        .iter()
        .filter(|joint| joint.width > 0.0)
        .map(|joint| shear_stress(v_env, joint.q, section.i, joint.width))
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Stress at the web top under the moment that compresses it.
///
/// Uses `m_max` when it is sagging, otherwise `m_min`. Zero without webs.
pub fn web_compression_stress(
    web_top: Option<f64>,
    m_max: f64,
    m_min: f64,
    ybar: f64,
    i: f64,
) -> f64 {
    let Some(web_top) = web_top else {
        return 0.0;
    };
    if i.abs() < STIFFNESS_EPSILON {
        return 0.0;
    }

    let d = web_top - ybar;
    let m = if m_max > 0.0 { m_max } else { m_min };
    -m * d / i
}

/// Full evaluation at the station at `x` (mm)
pub fn analyze_station<G: GeometryLookup + ?Sized>(
    x: f64,
    geometry: &G,
    v_env: f64,
    m_max: f64,
    m_min: f64,
    material: &MaterialProperties,
) -> StationAnalysis {
    let geom = geometry.geometry_at(x);
    let section = section_properties(&geom.plates, &geom.glue_joints);
    let buckling = buckling_details(
        &geom.plates,
        material.e,
        material.nu,
        section.ybar,
        geom.diaphragm_spacing,
    );

    let fibers = stress_envelope(m_max, m_min, section.y_top, section.y_bot, section.i);
    let tau_cent = shear_stress(v_env, section.q_cent, section.i, section.b_cent);
    let tau_glue = max_glue_stress(&section, v_env);
    let sigma_web = web_compression_stress(buckling.web_top, m_max, m_min, section.ybar, section.i);

    let caps = &buckling.capacities;
    let has_webs = geom.plates.iter().any(|p| p.plate_type == PlateType::Web);
    let fos_buck3 = if has_webs {
        calculate_fos(sigma_web, caps.web)
    } else {
        f64::INFINITY
    };

    let fos = FosResult::from_values([
        calculate_fos(fibers.tension_max, material.sigma_tens),
        calculate_fos(fibers.compression_max, material.sigma_comp),
        calculate_fos(tau_cent, material.tau_max),
        calculate_fos(tau_glue, material.tau_glue_max),
        calculate_fos(fibers.top_compression, caps.top_flange_inside),
        calculate_fos(fibers.top_compression, caps.top_flange_overhang),
        fos_buck3,
        calculate_fos(tau_cent, caps.shear),
    ]);

    StationAnalysis {
        section,
        buckling,
        applied: AppliedStresses {
            fibers,
            tau_cent,
            tau_glue,
            sigma_web,
        },
        fos,
    }
}

/// Eight factors of safety at the station at `x` (mm).
///
/// # Arguments
/// * `x` - Station position, used to look up the cross-section
/// * `geometry` - Cross-section source
/// * `v_env` - Envelope shear magnitude (N)
/// * `m_max`, `m_min` - Bounding moments (N·mm)
/// * `material` - Strengths and elastic constants
///
/// # Example
/// ```rust
/// use bridge_core::calculations::fos::{find_fos, FailureMode};
/// use bridge_core::materials::MaterialProperties;
/// use bridge_core::section::presets;
///
/// let g = presets::simple_square();
/// let r = find_fos(625.0, &g, 0.0, 50_000.0, 0.0, &MaterialProperties::matboard());
/// assert!(r.fos_shear.is_infinite());
/// assert!(r.min_fos.is_finite());
/// assert_ne!(r.failure_mode, FailureMode::Shear);
/// ```
pub fn find_fos<G: GeometryLookup + ?Sized>(
    x: f64,
    geometry: &G,
    v_env: f64,
    m_max: f64,
    m_min: f64,
    material: &MaterialProperties,
) -> FosResult {
    analyze_station(x, geometry, v_env, m_max, m_min, material).fos
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::{presets, Geometry, Plate};
    use approx::assert_relative_eq;

    fn matboard() -> MaterialProperties {
        MaterialProperties::matboard()
    }

    #[test]
    fn test_calculate_fos_threshold() {
        assert!(calculate_fos(9.9e-11, 1.0).is_infinite());
        assert!(calculate_fos(-9.9e-11, 1.0).is_infinite());
        assert_relative_eq!(calculate_fos(1e-10, 1.0), 1e10, max_relative = 1e-12);
    }

    #[test]
    fn test_calculate_fos_decreasing() {
        let mut last = f64::INFINITY;
        for applied in [0.5, 1.0, 2.0, 4.0, 8.0] {
            let fos = calculate_fos(applied, 6.0);
            assert!(fos < last);
            last = fos;
        }
    }

    #[test]
    fn test_governing_mode_tie_break() {
        let r = FosResult::from_values([3.0, 2.0, 2.0, 5.0, 2.0, 9.0, 9.0, 9.0]);
        assert_eq!(r.min_fos, 2.0);
        assert_eq!(r.failure_mode, FailureMode::Compression);

        let all_inf = FosResult::from_values([f64::INFINITY; 8]);
        assert_eq!(all_inf.failure_mode, FailureMode::Tension);
        assert!(all_inf.min_fos.is_infinite());
    }

    #[test]
    fn test_mode_labels_match_serde() {
        for mode in FailureMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{}\"", mode.label()));
        }
    }

    #[test]
    fn test_stress_envelope_sagging() {
        let s = stress_envelope(1.0e5, 0.0, 50.0, 50.0, 1.0e6);
        assert_relative_eq!(s.tension_max, 5.0);
        assert_relative_eq!(s.compression_max, -5.0);
        assert_relative_eq!(s.top_compression, -5.0);
        // m_min = 0 gives zero stress on the other side
        assert_eq!(s.bottom_compression, 0.0);
    }

    #[test]
    fn test_stress_envelope_reversal() {
        let s = stress_envelope(1.0e5, -2.0e5, 30.0, 70.0, 1.0e6);
        // Hogging: bottom compression 2e5*70/1e6 = 14
        assert_relative_eq!(s.compression_max, -14.0);
        // Sagging bottom tension 7 vs hogging top tension 6
        assert_relative_eq!(s.tension_max, 7.0);
        assert_relative_eq!(s.top_compression, -3.0);
    }

    #[test]
    fn test_web_compression_picks_sagging() {
        let sag = web_compression_stress(Some(90.0), 1.0e5, -5.0e4, 40.0, 1.0e6);
        assert_relative_eq!(sag, -5.0);
        let hog = web_compression_stress(Some(90.0), -1.0, -5.0e4, 40.0, 1.0e6);
        assert_relative_eq!(hog, 2.5);
        assert_eq!(web_compression_stress(None, 1.0e5, 0.0, 40.0, 1.0e6), 0.0);
        assert_eq!(web_compression_stress(Some(90.0), 1.0e5, 0.0, 40.0, 0.0), 0.0);
    }

    #[test]
    fn test_no_glue_joints_infinite_glue_fos() {
        let g = presets::cigar();
        let r = find_fos(625.0, &g, 300.0, 8.0e4, -1.0e3, &matboard());
        assert!(r.fos_glue.is_infinite());
        assert!(r.fos_shear.is_finite());
    }

    #[test]
    fn test_no_webs() {
        let g = Geometry::new(vec![
            Plate::top_flange(100.0, 1.27, 50.0, 20.0).unwrap(),
            Plate::bottom_flange(100.0, 1.27, 50.0, 0.635).unwrap(),
        ]);
        let r = find_fos(625.0, &g, 200.0, 5.0e4, 0.0, &matboard());
        assert!(r.fos_buck1.is_infinite());
        assert!(r.fos_buck3.is_infinite());
        assert!(r.fos_buck_v.is_infinite());
        assert!(r.fos_buck2.is_finite());
    }

    #[test]
    fn test_box_section_hand_check() {
        let g = presets::simple_square();
        let m = 1.0e5;
        let v = 200.0;
        let a = analyze_station(625.0, &g, v, m, 0.0, &matboard());

        let s = &a.section;
        let tension = m * s.y_bot / s.i;
        assert_relative_eq!(a.fos.fos_tens, 30.0 / tension, max_relative = 1e-12);
        let tau = v * s.q_cent / (s.i * s.b_cent);
        assert_relative_eq!(a.fos.fos_shear, 4.0 / tau, max_relative = 1e-12);
        assert!(a.applied.tau_glue > 0.0);
        // Overhang is zero on a flush box
        assert!(a.fos.fos_buck2.is_infinite());
        assert_eq!(a.fos.min_fos, a.fos.get(a.fos.failure_mode));
    }
}
