//! The process-wide VIS facade.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use parking_lot::RwLock;
use tracing::debug;

use vista_gmod::{Gmod, GmodDto, GmodError, GmodNode, GmodPath, GmodProvider};
use vista_locations::{Locations, LocationsDto};
use vista_types::VisVersion;
use vista_versioning::{CacheStats, GmodVersioning, GmodVersioningDto};

use crate::error::VisError;
use crate::resources::VisResources;

static INSTANCE: OnceCell<Vis> = OnceCell::new();

/// The entry point to the SDK.
///
/// One `Vis` lives per process: it is initialized on first use with a
/// [`VisResources`] provider and stays alive until process exit. The
/// per-version GMOD and location tables are built lazily on first
/// request and immutable afterwards; the conversion engine holds its
/// own bounded cache.
///
/// All accessors are safe to call from parallel threads; construction
/// of a version's model happens at most a handful of times under
/// contention and the winning instance is the one every caller sees.
pub struct Vis {
    resources: Box<dyn VisResources>,
    gmods: RwLock<HashMap<VisVersion, Arc<Gmod>>>,
    locations: RwLock<HashMap<VisVersion, Arc<Locations>>>,
    versioning: OnceCell<Arc<GmodVersioning>>,
}

impl Vis {
    /// Initializes the process-wide instance on first call and returns
    /// it.
    ///
    /// Later calls return the already-initialized instance; their
    /// `resources` argument is dropped unused.
    pub fn initialize<R: VisResources + 'static>(resources: R) -> &'static Vis {
        INSTANCE.get_or_init(|| Vis::with_resources(Box::new(resources)))
    }

    /// The process-wide instance.
    ///
    /// # Panics
    ///
    /// Panics when [`Vis::initialize`] has not been called yet.
    pub fn instance() -> &'static Vis {
        INSTANCE
            .get()
            .expect("VIS is not initialized; call Vis::initialize first")
    }

    fn with_resources(resources: Box<dyn VisResources>) -> Self {
        Self {
            resources,
            gmods: RwLock::new(HashMap::new()),
            locations: RwLock::new(HashMap::new()),
            versioning: OnceCell::new(),
        }
    }

    //----------------------------------------------
    // Model accessors
    //----------------------------------------------

    /// The GMOD of `version`, built from its resource on first use.
    pub fn gmod(&self, version: VisVersion) -> Result<Arc<Gmod>, VisError> {
        if let Some(gmod) = self.gmods.read().get(&version) {
            return Ok(Arc::clone(gmod));
        }

        let dto = self
            .resources
            .gmod_dto(version)
            .ok_or(VisError::GmodResourceNotFound(version))?;
        let built = Arc::new(Gmod::new(version, &dto)?);

        let mut gmods = self.gmods.write();
        let gmod = gmods.entry(version).or_insert_with(|| {
            debug!(version = %version, nodes = built.len(), "GMOD built");
            built
        });
        Ok(Arc::clone(gmod))
    }

    /// The location table of `version`, built from its resource on
    /// first use.
    pub fn locations(&self, version: VisVersion) -> Result<Arc<Locations>, VisError> {
        if let Some(locations) = self.locations.read().get(&version) {
            return Ok(Arc::clone(locations));
        }

        let dto = self
            .resources
            .locations_dto(version)
            .ok_or(VisError::LocationsResourceNotFound(version))?;
        let built = Arc::new(Locations::new(version, &dto)?);

        let mut locations = self.locations.write();
        let entry = locations.entry(version).or_insert(built);
        Ok(Arc::clone(entry))
    }

    /// The version conversion engine, built on first use.
    pub fn gmod_versioning(&self) -> Result<Arc<GmodVersioning>, VisError> {
        let versioning = self.versioning.get_or_try_init(|| {
            GmodVersioning::new(&self.resources.gmod_versioning_dtos()).map(Arc::new)
        })?;
        Ok(Arc::clone(versioning))
    }

    //----------------------------------------------
    // Conversion entry points
    //----------------------------------------------

    /// Converts a node between releases.
    pub fn convert_node(
        &self,
        source_version: VisVersion,
        node: &GmodNode,
        target_version: VisVersion,
    ) -> Result<Option<GmodNode>, VisError> {
        let versioning = self.gmod_versioning()?;
        Ok(versioning.convert_node(source_version, node, target_version, self)?)
    }

    /// Converts a path between releases, through the conversion cache.
    pub fn convert_path(
        &self,
        source_version: VisVersion,
        path: &GmodPath,
        target_version: VisVersion,
    ) -> Result<Option<GmodPath>, VisError> {
        let versioning = self.gmod_versioning()?;
        Ok(versioning.convert_path(source_version, path, target_version, self)?)
    }

    /// Statistics of the path-conversion cache.
    pub fn path_conversion_cache_stats(&self) -> Result<CacheStats, VisError> {
        Ok(self.gmod_versioning()?.path_cache_stats())
    }

    //----------------------------------------------
    // DTO accessors
    //----------------------------------------------

    /// The raw GMOD resource of `version`.
    pub fn gmod_dto(&self, version: VisVersion) -> Result<GmodDto, VisError> {
        self.resources
            .gmod_dto(version)
            .ok_or(VisError::GmodResourceNotFound(version))
    }

    /// The raw locations resource of `version`.
    pub fn locations_dto(&self, version: VisVersion) -> Result<LocationsDto, VisError> {
        self.resources
            .locations_dto(version)
            .ok_or(VisError::LocationsResourceNotFound(version))
    }

    /// The raw versioning resources, keyed by release string.
    pub fn gmod_versioning_dto(&self) -> HashMap<String, GmodVersioningDto> {
        self.resources.gmod_versioning_dtos()
    }
}

impl GmodProvider for Vis {
    fn gmod(&self, version: VisVersion) -> Result<Arc<Gmod>, GmodError> {
        Vis::gmod(self, version).map_err(|error| match error {
            VisError::Gmod(gmod_error) => gmod_error,
            _ => GmodError::VersionNotAvailable(version),
        })
    }
}
