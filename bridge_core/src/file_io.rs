//! # File I/O
//!
//! Project and geometry persistence.
//!
//! - Saves are atomic: serialize, write `<file>.tmp`, fsync, rename.
//! - Project files carry a schema version checked on load.
//! - Loaded projects and geometries are validated before use.
//!
//! ```rust,no_run
//! use bridge_core::file_io::{load_project, save_project};
//! use bridge_core::loads::LoadCase;
//! use bridge_core::project::BridgeProject;
//! use bridge_core::settings::AnalysisSettings;
//! use std::path::Path;
//!
//! let path = Path::new("team7.trestle");
//! let settings = AnalysisSettings::new(LoadCase::Locomotive);
//! save_project(&BridgeProject::new("Ada", "Team 7", settings), path)?;
//! let reloaded = load_project(path)?;
//! # Ok::<(), bridge_core::errors::BridgeError>(())
//! ```

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::debug;
use serde::{de::DeserializeOwned, Serialize};

use crate::errors::{BridgeError, BridgeResult};
use crate::project::{BridgeProject, SCHEMA_VERSION};
use crate::section::Geometry;

fn io_error<'a>(
    operation: &'static str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> BridgeError + 'a {
    move |e| BridgeError::file_error(operation, path.display().to_string(), e.to_string())
}

/// `<path>.<suffix>` keeping the original extension
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(suffix);
    PathBuf::from(name)
}

fn write_atomic(path: &Path, contents: &[u8]) -> BridgeResult<()> {
    let tmp_path = sibling_path(path, "tmp");

    let mut tmp = File::create(&tmp_path).map_err(io_error("create temp file", &tmp_path))?;
    tmp.write_all(contents)
        .map_err(io_error("write temp file", &tmp_path))?;
    tmp.sync_all().map_err(io_error("sync temp file", &tmp_path))?;
    drop(tmp);

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_error("rename to final", path)(e));
    }
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> BridgeResult<T> {
    let contents = fs::read_to_string(path).map_err(io_error("read", path))?;
    serde_json::from_str(&contents)
        .map_err(|e| BridgeError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))
}

fn write_json<T: Serialize + ?Sized>(value: &T, path: &Path) -> BridgeResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(BridgeError::serialization)?;
    write_atomic(path, json.as_bytes())
}

// ============================================================================
// Projects
// ============================================================================

/// Save a project atomically.
pub fn save_project(project: &BridgeProject, path: &Path) -> BridgeResult<()> {
    write_json(project, path)?;
    debug!(
        "saved project with {} designs to {}",
        project.design_count(),
        path.display()
    );
    Ok(())
}

/// Load a project, rejecting incompatible schema versions and invalid
/// settings or designs.
pub fn load_project(path: &Path) -> BridgeResult<BridgeProject> {
    let project: BridgeProject = read_json(path)?;
    check_version(&project.meta.version)?;
    project.validate()?;
    Ok(project)
}

fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut parts = version.split('.').map(|p| p.parse::<u32>());
    match (parts.next(), parts.next()) {
        (Some(Ok(major)), Some(Ok(minor))) => Some((major, minor)),
        (Some(Ok(major)), None) => Some((major, 0)),
        _ => None,
    }
}

/// Majors must match. Under 0.x a file from a newer minor is refused.
fn check_version(file_version: &str) -> BridgeResult<()> {
    let mismatch = || BridgeError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (file_major, file_minor) = parse_version(file_version).ok_or_else(mismatch)?;
    let (major, minor) = parse_version(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_major != major || (major == 0 && file_minor > minor) {
        return Err(mismatch());
    }
    Ok(())
}

// ============================================================================
// Bare geometry
// ============================================================================

/// Save a single cross-section as JSON.
pub fn save_geometry(geometry: &Geometry, path: &Path) -> BridgeResult<()> {
    write_json(geometry, path)
}

/// Load and validate a single cross-section.
pub fn load_geometry(path: &Path) -> BridgeResult<Geometry> {
    let geometry: Geometry = read_json(path)?;
    geometry.validate()?;
    Ok(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::LoadCase;
    use crate::section::presets;
    use crate::settings::AnalysisSettings;
    use std::env::temp_dir;

    fn temp_path(name: &str) -> PathBuf {
        temp_dir().join(format!("trestle_test_{}_{}.trestle", name, std::process::id()))
    }

    fn team_project() -> BridgeProject {
        BridgeProject::new("Ada", "Team 7", AnalysisSettings::new(LoadCase::Locomotive))
    }

    #[test]
    fn test_sibling_paths() {
        let path = Path::new("/teams/seven.trestle");
        assert_eq!(sibling_path(path, "tmp"), Path::new("/teams/seven.trestle.tmp"));
    }

    #[test]
    fn test_project_roundtrip() {
        let path = temp_path("roundtrip");
        let mut project = team_project();
        project.add_design("box", presets::simple_square());
        project.settings.mass_n = 452.0;

        save_project(&project, &path).unwrap();
        assert!(!sibling_path(&path, "tmp").exists());

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.team, "Team 7");
        assert_eq!(loaded.settings.loadcase, LoadCase::Locomotive);
        assert_eq!(loaded.settings.mass_n, 452.0);
        assert_eq!(
            loaded.geometry_by_label("box").unwrap(),
            &presets::simple_square()
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_newer_schema_rejected() {
        let path = temp_path("newer");
        let mut project = team_project();
        project.meta.version = "0.9.0".to_string();
        save_project(&project, &path).unwrap();

        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_project_with_bad_plate_rejected() {
        let path = temp_path("badplate");
        let mut geometry = presets::simple_square();
        geometry.plates[0].b = 0.0;
        let mut project = team_project();
        project.add_design("flat", geometry);
        save_project(&project, &path).unwrap();

        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_project_with_bad_mass_rejected() {
        let path = temp_path("badmass");
        let mut project = team_project();
        project.settings.mass_n = -5.0;
        save_project(&project, &path).unwrap();

        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_version_rules() {
        assert!(check_version(SCHEMA_VERSION).is_ok());
        assert!(check_version("0.1.7").is_ok());
        assert!(check_version("0.0.3").is_ok());
        assert!(check_version("0.2.0").is_err());
        assert!(check_version("1.0.0").is_err());
        assert!(check_version("garbage").is_err());
    }

    #[test]
    fn test_geometry_roundtrip() {
        let path = temp_dir().join(format!("trestle_geom_{}.json", std::process::id()));
        save_geometry(&presets::design0(), &path).unwrap();
        assert_eq!(load_geometry(&path).unwrap(), presets::design0());
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_geometry_bad_plate_type() {
        let path = temp_dir().join(format!("trestle_badgeom_{}.json", std::process::id()));
        fs::write(
            &path,
            r#"{"plates":[{"b":10,"h":1,"x":0,"y":0,"plate_type":"diaphragm"}]}"#,
        )
        .unwrap();
        let err = load_geometry(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file() {
        let err = load_project(Path::new("/nonexistent/dir/x.trestle")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }
}
