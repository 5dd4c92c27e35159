use super::builder::ModificationBuilder;
use super::error::RegistryError;
use super::store::ModificationStore;
use crate::core::io::catalog;
use crate::core::io::extension::{self, ExtensionLoadError};
use crate::core::io::resources::{DEFAULT_CATALOG, EmbeddedResources, ResourceProvider};
use crate::core::models::category::{ModificationCategory, OccurrenceType};
use crate::core::models::modification::ProteinModification;
use once_cell::unsync::Lazy;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

type CatalogLoader = Box<dyn FnOnce() -> ModificationStore + Send>;

/// A modification registry that fills itself from a catalog on first use.
///
/// Nothing is read until the first query or registration. At that point the
/// catalog resource is parsed and each entry registered through the builder.
/// A catalog that cannot be read or parsed is logged and skipped, so the
/// registry always answers queries, possibly with fewer definitions.
///
/// The loaded state lives in an unsynchronized [`Lazy`]; the registry can be
/// moved between threads but not shared without external locking.
#[derive(Debug)]
pub struct ModificationRegistry {
    resources: Arc<dyn ResourceProvider>,
    catalog_name: String,
    store: Lazy<ModificationStore, CatalogLoader>,
}

impl Default for ModificationRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModificationRegistry {
    /// Creates a registry backed by the catalog bundled with the library.
    pub fn new() -> Self {
        Self::with_resources(EmbeddedResources)
    }

    /// Creates a registry that reads its catalog from `resources`.
    pub fn with_resources(resources: impl ResourceProvider + 'static) -> Self {
        let resources: Arc<dyn ResourceProvider> = Arc::new(resources);
        let catalog_name = DEFAULT_CATALOG.to_string();
        let loader = catalog_loader(Arc::clone(&resources), catalog_name.clone());
        Self {
            store: Lazy::new(loader),
            resources,
            catalog_name,
        }
    }

    /// Overrides the catalog resource name, [`DEFAULT_CATALOG`] by default.
    ///
    /// Definitions already loaded are dropped; the named catalog is read on
    /// next use.
    pub fn with_catalog_name(mut self, name: impl Into<String>) -> Self {
        self.catalog_name = name.into();
        let loader = catalog_loader(Arc::clone(&self.resources), self.catalog_name.clone());
        self.store = Lazy::new(loader);
        self
    }

    pub fn catalog_name(&self) -> &str {
        &self.catalog_name
    }

    /// Whether the catalog has been loaded yet.
    pub fn is_loaded(&self) -> bool {
        Lazy::get(&self.store).is_some()
    }

    /// Loads the catalog if that has not happened yet and returns the store.
    pub fn ensure_loaded(&self) -> &ModificationStore {
        Lazy::force(&self.store)
    }

    fn store_mut(&mut self) -> &mut ModificationStore {
        Lazy::force_mut(&mut self.store)
    }

    /// Registers a new modification. See [`ModificationStore::register`].
    pub fn register(
        &mut self,
        id: impl Into<String>,
        category: ModificationCategory,
        occurrence_type: OccurrenceType,
    ) -> Result<ModificationBuilder<'_>, RegistryError> {
        let id = id.into();
        if id.is_empty() {
            return Err(RegistryError::EmptyId);
        }
        self.store_mut().register(id, category, occurrence_type)
    }

    /// Registers every definition of a TOML extension catalog.
    pub fn load_extension(&mut self, path: &Path) -> Result<usize, ExtensionLoadError> {
        extension::load_extension(self.store_mut(), path)
    }

    pub fn get_by_id(&self, id: &str) -> Option<&ProteinModification> {
        self.ensure_loaded().get_by_id(id)
    }

    pub fn get_by_resid_id(&self, resid_id: &str) -> Option<&ProteinModification> {
        self.ensure_loaded().get_by_resid_id(resid_id)
    }

    pub fn get_by_psimod_id(&self, psimod_id: &str) -> Option<&ProteinModification> {
        self.ensure_loaded().get_by_psimod_id(psimod_id)
    }

    /// All definitions sharing `pdbcc_id`, sorted by ID. Empty if none do.
    pub fn get_by_pdbcc_id(&self, pdbcc_id: &str) -> Vec<&ProteinModification> {
        self.ensure_loaded().get_by_pdbcc_id(pdbcc_id)
    }

    pub fn modifications(&self) -> impl Iterator<Item = &ProteinModification> {
        self.ensure_loaded().modifications()
    }

    pub fn len(&self) -> usize {
        self.ensure_loaded().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ensure_loaded().is_empty()
    }

    pub fn ids(&self) -> impl ExactSizeIterator<Item = &str> {
        self.ensure_loaded().ids()
    }

    pub fn pdbcc_ids(&self) -> impl ExactSizeIterator<Item = &str> {
        self.ensure_loaded().pdbcc_ids()
    }

    pub fn resid_ids(&self) -> impl ExactSizeIterator<Item = &str> {
        self.ensure_loaded().resid_ids()
    }

    pub fn psimod_ids(&self) -> impl ExactSizeIterator<Item = &str> {
        self.ensure_loaded().psimod_ids()
    }

    pub fn search(&self, query: &str) -> Vec<&ProteinModification> {
        self.ensure_loaded().search(query)
    }

    /// Consumes the registry, loading it first if needed.
    pub fn into_store(mut self) -> ModificationStore {
        std::mem::take(self.store_mut())
    }
}

fn catalog_loader(resources: Arc<dyn ResourceProvider>, catalog_name: String) -> CatalogLoader {
    Box::new(move || load_store(&*resources, &catalog_name))
}

fn load_store(resources: &dyn ResourceProvider, catalog_name: &str) -> ModificationStore {
    let mut store = ModificationStore::new();
    match catalog::load_catalog(&mut store, resources, catalog_name) {
        Ok(count) => info!(
            catalog = %catalog_name,
            count,
            "Loaded protein modification catalog"
        ),
        Err(e) => warn!(
            catalog = %catalog_name,
            registered = store.len(),
            "Failed to load protein modification catalog: {}",
            e
        ),
    }
    store
}
