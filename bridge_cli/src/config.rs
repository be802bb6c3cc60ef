//! TOML analysis files
//!
//! ```toml
//! [scenario]
//! loadcase = 2
//! mass = 452.0
//!
//! [sweep]
//! num_train_positions = 1000
//!
//! [material]
//! E = 4000.0
//! sigma_comp = 6.0
//!
//! [geometry]
//! preset = "design0"      # or: file = "my_section.json"
//! ```
//!
//! Every section and key is optional, except that a load case must come
//! from either `[scenario]` or the command line. Missing material keys
//! keep the matboard values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use bridge_core::loads::LoadCase;
use bridge_core::materials::MaterialProperties;
use bridge_core::settings::AnalysisSettings;

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisFile {
    pub scenario: ScenarioSection,
    pub sweep: SweepSection,
    pub material: MaterialSection,
    pub geometry: GeometrySection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioSection {
    pub loadcase: Option<LoadCase>,
    /// Train mass (N)
    pub mass: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepSection {
    pub num_train_positions: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MaterialSection {
    #[serde(rename = "E", alias = "e")]
    pub e: Option<f64>,
    pub nu: Option<f64>,
    pub sigma_tens: Option<f64>,
    pub sigma_comp: Option<f64>,
    pub tau_max: Option<f64>,
    pub tau_glue_max: Option<f64>,
}

impl MaterialSection {
    fn apply(&self, m: &mut MaterialProperties) {
        let fields = [
            (self.e, &mut m.e),
            (self.nu, &mut m.nu),
            (self.sigma_tens, &mut m.sigma_tens),
            (self.sigma_comp, &mut m.sigma_comp),
            (self.tau_max, &mut m.tau_max),
            (self.tau_glue_max, &mut m.tau_glue_max),
        ];
        for (value, slot) in fields {
            if let Some(v) = value {
                *slot = v;
            }
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeometrySection {
    pub preset: Option<String>,
    /// Geometry JSON, relative to the analysis file
    pub file: Option<PathBuf>,
}

impl AnalysisFile {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading analysis file {}", path.display()))?;
        let mut file: AnalysisFile = toml::from_str(&text)
            .with_context(|| format!("parsing analysis file {}", path.display()))?;

        if let (Some(geom), Some(dir)) = (file.geometry.file.as_mut(), path.parent()) {
            if geom.is_relative() {
                *geom = dir.join(&*geom);
            }
        }
        Ok(file)
    }

    /// Settings from this file on top of the defaults.
    ///
    /// `loadcase` takes precedence over the file's `[scenario]` value;
    /// with neither there is nothing to analyze.
    pub fn settings(&self, loadcase: Option<LoadCase>) -> Result<AnalysisSettings> {
        let loadcase = loadcase
            .or(self.scenario.loadcase)
            .context("no load case given: pass --loadcase or set [scenario] loadcase")?;

        let mut settings = AnalysisSettings::new(loadcase);
        if let Some(mass) = self.scenario.mass {
            settings.mass_n = mass;
        }
        if let Some(n) = self.sweep.num_train_positions {
            settings.num_train_positions = n;
        }
        self.material.apply(&mut settings.material);
        Ok(settings)
    }
}
