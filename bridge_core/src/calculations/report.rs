//! Critical-section report
//!
//! Re-evaluates the governing station of a failure sweep and collects the
//! section properties, applied stresses, and buckling dimensions behind
//! its factors of safety.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::failure_sweep::FailureResults;
use super::fos::{analyze_station, AppliedStresses, FosResult};
use crate::materials::MaterialProperties;
use crate::section::{BucklingDetails, GeometryLookup, SectionProperties};

/// Detailed state of the critical station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriticalReport {
    /// Critical station position (mm)
    pub x: f64,
    pub index: usize,
    pub section: SectionProperties,
    pub applied: AppliedStresses,
    pub buckling: BucklingDetails,
    /// Widest glue contact over all joints (mm)
    pub max_glue_width: f64,
    pub fos: FosResult,
    /// Train mass used for the sweep (N)
    pub mass: f64,
    /// Predicted train mass at failure (N)
    pub failure_load: f64,
}

/// Build the report for the critical station of `results`.
///
/// `geometry` must be the one the sweep ran against.
pub fn critical_report<G: GeometryLookup + ?Sized>(
    results: &FailureResults,
    geometry: &G,
    material: &MaterialProperties,
) -> CriticalReport {
    let i = results.critical.index;
    let x = results.critical.x;
    let station = analyze_station(
        x,
        geometry,
        results.v_env[i],
        results.m_max[i],
        results.m_min[i],
        material,
    );

    let max_glue_width = station
        .section
        .glue
        .iter()
        .map(|joint| joint.width)
        .fold(0.0, f64::max);

    CriticalReport {
        x,
        index: i,
        section: station.section,
        applied: station.applied,
        buckling: station.buckling,
        max_glue_width,
        fos: station.fos,
        mass: results.mass,
        failure_load: results.failure_load,
    }
}

impl fmt::Display for CriticalReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.section;
        let a = &self.applied;
        let b = &self.buckling;
        let caps = &b.capacities;
        let flange = b.flange.unwrap_or_default();

        writeln!(f, "SECTION PROPERTIES")?;
        writeln!(f, "  ybar:       {:.2} mm", s.ybar)?;
        writeln!(f, "  I:          {:.1} mm^4", s.i)?;
        writeln!(f, "  area:       {:.2} mm^2", s.area)?;
        writeln!(f, "  y_top:      {:.2} mm", s.y_top)?;
        writeln!(f, "  y_bot:      {:.2} mm", s.y_bot)?;
        writeln!(f)?;

        writeln!(f, "APPLIED STRESSES (x = {:.1} mm)", self.x)?;
        writeln!(f, "  tension:    {:.2} MPa", a.fibers.tension_max)?;
        writeln!(f, "  comp:       {:.2} MPa", a.fibers.compression_max)?;
        writeln!(f, "  top comp:   {:.2} MPa", a.fibers.top_compression)?;
        writeln!(f, "  shear:      {:.3} MPa", a.tau_cent)?;
        writeln!(f, "  glue:       {:.3} MPa", a.tau_glue)?;
        writeln!(f, "  web comp:   {:.2} MPa", a.sigma_web)?;
        writeln!(f)?;

        let cases = [
            (
                "BUCKLING CASE 1 (top flange inside)",
                b.t_flange,
                flange.inside_width,
                caps.top_flange_inside,
                self.fos.fos_buck1,
            ),
            (
                "BUCKLING CASE 2 (top flange overhang)",
                b.t_flange,
                flange.max_overhang,
                caps.top_flange_overhang,
                self.fos.fos_buck2,
            ),
            (
                "BUCKLING CASE 3 (web)",
                b.t_web,
                b.compression_zone_height,
                caps.web,
                self.fos.fos_buck3,
            ),
        ];
        for (title, t, width, capacity, fos) in cases {
            writeln!(f, "{}", title)?;
            writeln!(f, "  t:          {:.2} mm", t)?;
            writeln!(f, "  b:          {:.2} mm", width)?;
            writeln!(f, "  capacity:   {:.1} MPa", capacity)?;
            writeln!(f, "  FOS:        {:.2}", fos)?;
            writeln!(f)?;
        }

        writeln!(f, "SHEAR BUCKLING")?;
        writeln!(f, "  h:          {:.2} mm", b.h_web)?;
        writeln!(f, "  t:          {:.2} mm", b.t_web)?;
        writeln!(f, "  a:          {:.2} mm", b.diaphragm_spacing.unwrap_or(0.0))?;
        writeln!(f, "  capacity:   {:.3} MPa", caps.shear)?;
        writeln!(f, "  FOS:        {:.2}", self.fos.fos_buck_v)?;
        writeln!(f)?;

        writeln!(f, "GLUE SHEAR")?;
        writeln!(f, "  glue width: {:.2} mm", self.max_glue_width)?;
        writeln!(f, "  FOS:        {:.2}", self.fos.fos_glue)?;
        writeln!(f)?;

        writeln!(f, "MATERIAL")?;
        writeln!(f, "  tension FOS:     {:.2}", self.fos.fos_tens)?;
        writeln!(f, "  compression FOS: {:.2}", self.fos.fos_comp)?;
        writeln!(f, "  shear FOS:       {:.2}", self.fos.fos_shear)?;
        writeln!(f)?;

        writeln!(f, "OVERALL")?;
        writeln!(f, "  min FOS:      {:.3}", self.fos.min_fos)?;
        writeln!(f, "  failure mode: {}", self.fos.failure_mode)?;
        writeln!(f, "  failure load: {:.1} N", self.failure_load)?;
        write!(f, "  critical x:   {:.1} mm", self.x)
    }
}
