//! # Project Data Structures
//!
//! `BridgeProject` is the root container for a team's candidate
//! cross-sections. Projects serialize to `.trestle` files as
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! BridgeProject
//! ├── meta: ProjectMetadata (schema version, designer, team, timestamps)
//! ├── settings: AnalysisSettings (scenario, resolution, material)
//! └── designs: HashMap<Uuid, NamedDesign> (labelled geometries)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bridge_core::loads::LoadCase;
//! use bridge_core::project::BridgeProject;
//! use bridge_core::section::presets;
//! use bridge_core::settings::AnalysisSettings;
//!
//! let settings = AnalysisSettings::new(LoadCase::Uniform);
//! let mut project = BridgeProject::new("Ada", "Team 7", settings);
//! let id = project.add_design("box", presets::simple_square());
//!
//! assert_eq!(project.find_by_label("box").map(|(found, _)| *found), Some(id));
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("Team 7"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{BridgeError, BridgeResult};
use crate::section::Geometry;
use crate::settings::AnalysisSettings;

/// Current schema version for .trestle files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Designs live in a flat UUID-keyed map so that labels can be renamed
/// without breaking references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeProject {
    pub meta: ProjectMetadata,

    pub settings: AnalysisSettings,

    #[serde(default)]
    pub designs: HashMap<Uuid, NamedDesign>,
}

impl BridgeProject {
    /// Create an empty project.
    pub fn new(
        designer: impl Into<String>,
        team: impl Into<String>,
        settings: AnalysisSettings,
    ) -> Self {
        let now = Utc::now();
        BridgeProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                designer: designer.into(),
                team: team.into(),
                created: now,
                modified: now,
            },
            settings,
            designs: HashMap::new(),
        }
    }

    /// Add a design. Returns the UUID assigned to it.
    pub fn add_design(&mut self, label: impl Into<String>, geometry: Geometry) -> Uuid {
        let id = Uuid::new_v4();
        self.designs.insert(
            id,
            NamedDesign {
                label: label.into(),
                geometry,
            },
        );
        self.touch();
        id
    }

    pub fn remove_design(&mut self, id: &Uuid) -> Option<NamedDesign> {
        let design = self.designs.remove(id);
        if design.is_some() {
            self.touch();
        }
        design
    }

    pub fn get_design(&self, id: &Uuid) -> Option<&NamedDesign> {
        self.designs.get(id)
    }

    /// Mutable access. Marks the project as modified when the design exists.
    pub fn get_design_mut(&mut self, id: &Uuid) -> Option<&mut NamedDesign> {
        if self.designs.contains_key(id) {
            self.meta.modified = Utc::now();
            self.designs.get_mut(id)
        } else {
            None
        }
    }

    /// First design whose label matches exactly
    pub fn find_by_label(&self, label: &str) -> Option<(&Uuid, &NamedDesign)> {
        self.designs.iter().find(|(_, d)| d.label == label)
    }

    /// Geometry for a label, or `DesignNotFound`
    pub fn geometry_by_label(&self, label: &str) -> BridgeResult<&Geometry> {
        self.find_by_label(label)
            .map(|(_, d)| &d.geometry)
            .ok_or_else(|| BridgeError::design_not_found(label))
    }

    /// Labels in alphabetical order
    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.designs.values().map(|d| d.label.as_str()).collect();
        labels.sort_unstable();
        labels
    }

    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    pub fn design_count(&self) -> usize {
        self.designs.len()
    }

    /// Check settings and every stored geometry
    pub fn validate(&self) -> BridgeResult<()> {
        self.settings.validate()?;
        for design in self.designs.values() {
            design.geometry.validate()?;
        }
        Ok(())
    }
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    pub designer: String,

    /// Team or group name
    pub team: String,

    pub created: DateTime<Utc>,

    pub modified: DateTime<Utc>,
}

/// A labelled cross-section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedDesign {
    pub label: String,
    pub geometry: Geometry,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::LoadCase;
    use crate::section::presets;

    fn team_project() -> BridgeProject {
        BridgeProject::new("Ada", "Team 7", AnalysisSettings::new(LoadCase::Uniform))
    }

    #[test]
    fn test_project_creation() {
        let project = team_project();
        assert_eq!(project.meta.designer, "Ada");
        assert_eq!(project.meta.team, "Team 7");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.design_count(), 0);
    }

    #[test]
    fn test_project_serialization() {
        let mut project = team_project();
        project.settings.loadcase = LoadCase::HeavyFreight;
        project.add_design("cigar", presets::cigar());

        let json = serde_json::to_string_pretty(&project).unwrap();
        assert!(json.contains("\"plate_type\": \"top_flange\""));

        let roundtrip: BridgeProject = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.settings.loadcase, LoadCase::HeavyFreight);
        assert_eq!(
            roundtrip.geometry_by_label("cigar").unwrap(),
            &presets::cigar()
        );
    }

    #[test]
    fn test_settings_required() {
        let mut value = serde_json::to_value(team_project()).unwrap();
        value["settings"]
            .as_object_mut()
            .unwrap()
            .remove("loadcase");
        assert!(serde_json::from_value::<BridgeProject>(value.clone()).is_err());

        value.as_object_mut().unwrap().remove("settings");
        assert!(serde_json::from_value::<BridgeProject>(value).is_err());
    }

    #[test]
    fn test_add_remove_design() {
        let mut project = team_project();
        let id = project.add_design("d0", presets::design0());
        project.add_design("box", presets::simple_square());
        assert_eq!(project.labels(), vec!["box", "d0"]);

        let removed = project.remove_design(&id).unwrap();
        assert_eq!(removed.label, "d0");
        assert_eq!(project.design_count(), 1);
        assert!(project.remove_design(&id).is_none());
    }

    #[test]
    fn test_missing_label() {
        let project = team_project();
        let err = project.geometry_by_label("nope").unwrap_err();
        assert_eq!(err.error_code(), "DESIGN_NOT_FOUND");
    }

    #[test]
    fn test_rename_through_mut() {
        let mut project = team_project();
        let id = project.add_design("draft", presets::design0());
        project.get_design_mut(&id).unwrap().label = "final".to_string();
        assert!(project.find_by_label("draft").is_none());
        assert!(project.find_by_label("final").is_some());
        assert!(project.validate().is_ok());
    }
}
