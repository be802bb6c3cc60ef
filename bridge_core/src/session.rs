//! # Design Session
//!
//! Interactive driver for repeated analyses of an evolving cross-section.
//!
//! The session is the single writer of the current geometry. Each edit
//! replaces the geometry with a new immutable value and bumps the
//! revision. An analysis is taken as a [`AnalysisJob`] snapshot that runs
//! anywhere (typically a worker thread) and is handed back through
//! [`DesignSession::accept`], which discards it if an edit landed in the
//! meantime (last edit wins).
//!
//! Envelopes depend only on the load case and mass, so they are cached
//! across geometry edits; only the failure sweep is repeated after an
//! edit. The cache keeps the most recently used scenarios only.
//!
//! ```rust
//! use bridge_core::loads::LoadCase;
//! use bridge_core::section::presets;
//! use bridge_core::session::DesignSession;
//! use bridge_core::settings::AnalysisSettings;
//!
//! let settings = AnalysisSettings {
//!     num_train_positions: 20,
//!     ..AnalysisSettings::new(LoadCase::Uniform)
//! };
//! let mut session = DesignSession::new(presets::simple_square(), &settings).unwrap();
//!
//! let job = session.snapshot();
//! session.edit_geometry(|g| g.diaphragm_spacing = Some(100.0)).unwrap();
//!
//! // The job saw the old geometry and is rejected
//! let stale = job.run().unwrap();
//! assert!(session.accept(stale).is_err());
//!
//! // Envelopes from the stale run were kept
//! assert_eq!(session.cache().len(), 1);
//! assert!(session.analyze().is_ok());
//! ```

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use log::{debug, warn};

use crate::calculations::envelope::{envelopes, validate_mass, EnvelopeArrays};
use crate::calculations::failure_sweep::{failure_sweep_with_envelopes, FailureResults};
use crate::errors::{BridgeError, BridgeResult};
use crate::loads::LoadCase;
use crate::materials::MaterialProperties;
use crate::section::Geometry;
use crate::settings::AnalysisSettings;

type CacheKey = (LoadCase, u64);

fn cache_key(loadcase: LoadCase, mass: f64) -> CacheKey {
    (loadcase, mass.to_bits())
}

/// Scenarios kept by [`DesignSession`] before the least recently used is dropped
pub const DEFAULT_CACHE_CAPACITY: usize = 8;

/// Envelopes keyed by load case and mass, at a fixed resolution.
///
/// Holds at most `capacity` scenarios and evicts the least recently used.
#[derive(Debug, Clone)]
pub struct EnvelopeCache {
    num_positions: usize,
    capacity: usize,
    entries: HashMap<CacheKey, Arc<EnvelopeArrays>>,
    /// Keys from least to most recently used
    order: VecDeque<CacheKey>,
}

impl EnvelopeCache {
    pub fn new(num_positions: usize) -> Self {
        Self::with_capacity(num_positions, DEFAULT_CACHE_CAPACITY)
    }

    /// Cache holding at most `capacity` scenarios (at least one)
    pub fn with_capacity(num_positions: usize, capacity: usize) -> Self {
        EnvelopeCache {
            num_positions,
            capacity: capacity.max(1),
            entries: HashMap::new(),
            order: VecDeque::new(),
        }
    }

    /// Train positions every cached entry was computed with
    pub fn num_positions(&self) -> usize {
        self.num_positions
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Lookup without marking the entry as used
    pub fn get(&self, loadcase: LoadCase, mass: f64) -> Option<Arc<EnvelopeArrays>> {
        self.entries.get(&cache_key(loadcase, mass)).cloned()
    }

    fn touch(&mut self, key: CacheKey) {
        if let Some(pos) = self.order.iter().position(|k| *k == key) {
            self.order.remove(pos);
        }
        self.order.push_back(key);
    }

    pub fn insert(&mut self, loadcase: LoadCase, mass: f64, env: Arc<EnvelopeArrays>) {
        let key = cache_key(loadcase, mass);
        self.entries.insert(key, env);
        self.touch(key);

        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
                debug!(
                    "envelope cache evicted loadcase {} mass {} N",
                    oldest.0,
                    f64::from_bits(oldest.1)
                );
            }
        }
    }

    /// Cached envelopes, computing them on a miss
    pub fn get_or_compute(
        &mut self,
        loadcase: LoadCase,
        mass: f64,
    ) -> BridgeResult<Arc<EnvelopeArrays>> {
        if let Some(env) = self.get(loadcase, mass) {
            debug!("envelope cache hit: loadcase {} mass {} N", loadcase, mass);
            self.touch(cache_key(loadcase, mass));
            return Ok(env);
        }

        debug!("envelope cache miss: loadcase {} mass {} N", loadcase, mass);
        let env = Arc::new(envelopes(loadcase, mass, self.num_positions)?);
        self.insert(loadcase, mass, Arc::clone(&env));
        Ok(env)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }
}

/// Self-contained analysis of one session revision
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub revision: u64,
    pub geometry: Arc<Geometry>,
    pub loadcase: LoadCase,
    pub mass: f64,
    pub material: MaterialProperties,
    pub num_positions: usize,
    /// Cached envelopes, if the session already had them
    pub envelopes: Option<Arc<EnvelopeArrays>>,
}

impl AnalysisJob {
    /// Run the sweep. Touches no session state.
    pub fn run(self) -> BridgeResult<SessionResult> {
        let env = match self.envelopes {
            Some(env) => env,
            None => Arc::new(envelopes(self.loadcase, self.mass, self.num_positions)?),
        };

        let results = failure_sweep_with_envelopes(
            self.geometry.as_ref(),
            &env,
            self.loadcase,
            self.mass,
            &self.material,
        )?;

        Ok(SessionResult {
            revision: self.revision,
            geometry: self.geometry,
            loadcase: self.loadcase,
            mass: self.mass,
            num_positions: self.num_positions,
            envelopes: env,
            results,
        })
    }
}

/// Output of an [`AnalysisJob`]
#[derive(Debug, Clone)]
pub struct SessionResult {
    pub revision: u64,
    /// Geometry the sweep ran against
    pub geometry: Arc<Geometry>,
    pub loadcase: LoadCase,
    pub mass: f64,
    pub num_positions: usize,
    pub envelopes: Arc<EnvelopeArrays>,
    pub results: FailureResults,
}

/// Single-writer owner of the geometry being designed
#[derive(Debug)]
pub struct DesignSession {
    geometry: Arc<Geometry>,
    revision: u64,
    loadcase: LoadCase,
    mass: f64,
    material: MaterialProperties,
    cache: EnvelopeCache,
    latest: Option<SessionResult>,
}

impl DesignSession {
    pub fn new(geometry: Geometry, settings: &AnalysisSettings) -> BridgeResult<Self> {
        geometry.validate()?;
        settings.validate()?;

        Ok(DesignSession {
            geometry: Arc::new(geometry),
            revision: 0,
            loadcase: settings.loadcase,
            mass: settings.mass_n,
            material: settings.material,
            cache: EnvelopeCache::new(settings.num_train_positions),
            latest: None,
        })
    }

    pub fn geometry(&self) -> &Arc<Geometry> {
        &self.geometry
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn loadcase(&self) -> LoadCase {
        self.loadcase
    }

    pub fn mass(&self) -> f64 {
        self.mass
    }

    pub fn material(&self) -> &MaterialProperties {
        &self.material
    }

    pub fn cache(&self) -> &EnvelopeCache {
        &self.cache
    }

    /// Most recently accepted result
    pub fn latest(&self) -> Option<&SessionResult> {
        self.latest.as_ref()
    }

    fn bump(&mut self) -> u64 {
        self.revision += 1;
        self.revision
    }

    /// Install a new geometry. Returns the new revision.
    pub fn replace_geometry(&mut self, geometry: Geometry) -> BridgeResult<u64> {
        geometry.validate()?;
        self.geometry = Arc::new(geometry);
        Ok(self.bump())
    }

    /// Edit a copy of the current geometry and install it.
    ///
    /// Jobs already holding the previous geometry keep their copy.
    pub fn edit_geometry(&mut self, edit: impl FnOnce(&mut Geometry)) -> BridgeResult<u64> {
        let mut next = Geometry::clone(&self.geometry);
        edit(&mut next);
        self.replace_geometry(next)
    }

    /// Change load case and mass. Cached envelopes for other scenarios are kept.
    pub fn set_scenario(&mut self, loadcase: LoadCase, mass: f64) -> BridgeResult<u64> {
        validate_mass(mass)?;
        self.loadcase = loadcase;
        self.mass = mass;
        Ok(self.bump())
    }

    pub fn set_material(&mut self, material: MaterialProperties) -> BridgeResult<u64> {
        material.validate()?;
        self.material = material;
        Ok(self.bump())
    }

    /// Capture the current revision as a job
    pub fn snapshot(&self) -> AnalysisJob {
        AnalysisJob {
            revision: self.revision,
            geometry: Arc::clone(&self.geometry),
            loadcase: self.loadcase,
            mass: self.mass,
            material: self.material,
            num_positions: self.cache.num_positions(),
            envelopes: self.cache.get(self.loadcase, self.mass),
        }
    }

    /// Install a finished result if it belongs to the current revision.
    ///
    /// Envelopes from the result are cached either way, since they do not
    /// depend on the geometry.
    pub fn accept(&mut self, result: SessionResult) -> BridgeResult<&SessionResult> {
        if result.num_positions == self.cache.num_positions() {
            self.cache
                .insert(result.loadcase, result.mass, Arc::clone(&result.envelopes));
        }

        if result.revision != self.revision {
            warn!(
                "discarding result for revision {} (current {})",
                result.revision, self.revision
            );
            return Err(BridgeError::Superseded {
                revision: result.revision,
                current: self.revision,
            });
        }

        Ok(&*self.latest.insert(result))
    }

    /// Snapshot, run and accept on the calling thread
    pub fn analyze(&mut self) -> BridgeResult<&SessionResult> {
        let mut job = self.snapshot();
        if job.envelopes.is_none() {
            job.envelopes = Some(self.cache.get_or_compute(self.loadcase, self.mass)?);
        }
        let result = job.run()?;
        self.accept(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::presets;
    use std::thread;

    fn settings() -> AnalysisSettings {
        AnalysisSettings {
            num_train_positions: 12,
            ..AnalysisSettings::new(LoadCase::Uniform)
        }
    }

    #[test]
    fn test_cache_hit_returns_same_arrays() {
        let mut cache = EnvelopeCache::new(8);
        let a = cache.get_or_compute(LoadCase::Uniform, 400.0).unwrap();
        let b = cache.get_or_compute(LoadCase::Uniform, 400.0).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.len(), 1);

        cache.get_or_compute(LoadCase::Locomotive, 400.0).unwrap();
        cache.get_or_compute(LoadCase::Uniform, 452.0).unwrap();
        assert_eq!(cache.len(), 3);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_cache_evicts_least_recently_used() {
        let mut cache = EnvelopeCache::with_capacity(4, 2);
        cache.get_or_compute(LoadCase::Uniform, 400.0).unwrap();
        cache.get_or_compute(LoadCase::Uniform, 410.0).unwrap();
        // Using 400 N again makes 410 N the oldest
        cache.get_or_compute(LoadCase::Uniform, 400.0).unwrap();
        cache.get_or_compute(LoadCase::Uniform, 420.0).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(cache.get(LoadCase::Uniform, 400.0).is_some());
        assert!(cache.get(LoadCase::Uniform, 410.0).is_none());
        assert!(cache.get(LoadCase::Uniform, 420.0).is_some());
    }

    #[test]
    fn test_mass_scrub_stays_bounded() {
        let mut session = DesignSession::new(presets::simple_square(), &settings()).unwrap();
        for step in 0..(DEFAULT_CACHE_CAPACITY + 5) {
            session
                .set_scenario(LoadCase::Uniform, 400.0 + step as f64)
                .unwrap();
            session.analyze().unwrap();
        }
        assert_eq!(session.cache().len(), DEFAULT_CACHE_CAPACITY);
        let last = 400.0 + (DEFAULT_CACHE_CAPACITY + 4) as f64;
        assert!(session.cache().get(LoadCase::Uniform, last).is_some());
        assert!(session.cache().get(LoadCase::Uniform, 400.0).is_none());
    }

    #[test]
    fn test_geometry_edit_keeps_cache() {
        let mut session = DesignSession::new(presets::simple_square(), &settings()).unwrap();
        session.analyze().unwrap();
        let env = session.cache().get(LoadCase::Uniform, 400.0).unwrap();

        session
            .edit_geometry(|g| g.glue_joints.clear())
            .unwrap();
        let result = session.analyze().unwrap();
        assert!(Arc::ptr_eq(&env, &result.envelopes));
        assert!(result.results.fos_glue.iter().all(|f| f.is_infinite()));
        assert_eq!(session.cache().len(), 1);
    }

    #[test]
    fn test_scenario_change_adds_entry() {
        let mut session = DesignSession::new(presets::simple_square(), &settings()).unwrap();
        session.analyze().unwrap();
        session.set_scenario(LoadCase::HeavyFreight, 500.0).unwrap();
        assert!(session.snapshot().envelopes.is_none());
        session.analyze().unwrap();
        assert_eq!(session.cache().len(), 2);
        assert_eq!(session.latest().unwrap().loadcase, LoadCase::HeavyFreight);
    }

    #[test]
    fn test_last_edit_wins_across_threads() {
        let mut session = DesignSession::new(presets::design0(), &settings()).unwrap();
        let first = session.snapshot();
        let handle = thread::spawn(move || first.run());

        let rev = session
            .replace_geometry(presets::simple_square())
            .unwrap();
        let second = session.snapshot();
        assert_eq!(second.revision, rev);

        let stale = handle.join().unwrap().unwrap();
        let err = session.accept(stale).unwrap_err();
        assert_eq!(err, BridgeError::Superseded { revision: 0, current: 1 });
        assert!(session.latest().is_none());

        let fresh = thread::spawn(move || second.run()).join().unwrap().unwrap();
        let accepted = session.accept(fresh).unwrap();
        assert_eq!(accepted.revision, 1);
        assert_eq!(*accepted.geometry, presets::simple_square());
    }

    #[test]
    fn test_snapshot_isolated_from_edits() {
        let mut session = DesignSession::new(presets::simple_square(), &settings()).unwrap();
        let job = session.snapshot();
        session
            .edit_geometry(|g| g.plates.truncate(1))
            .unwrap();
        assert_eq!(job.geometry.plates.len(), 4);
        assert_eq!(session.geometry().plates.len(), 1);
    }

    #[test]
    fn test_invalid_edit_rejected() {
        let mut session = DesignSession::new(presets::simple_square(), &settings()).unwrap();
        let err = session
            .edit_geometry(|g| g.plates[0].b = -1.0)
            .unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert_eq!(session.revision(), 0);
        assert!(session.set_scenario(LoadCase::Uniform, f64::NAN).is_err());
    }
}
