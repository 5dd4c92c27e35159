pub mod export;
pub mod ids;
pub mod list;
pub mod search;
pub mod show;

use crate::config::AppConfig;
use crate::error::Result;
use protmod::core::io::resources::DirectoryResources;
use protmod::registry::ModificationRegistry;
use tracing::info;

/// Builds the registry described by `config` and applies its extension
/// catalogs. Extension errors are fatal; catalog errors are not.
pub fn build_registry(config: &AppConfig) -> Result<ModificationRegistry> {
    let registry = match &config.catalog_dir {
        Some(dir) => {
            info!(
                "Reading catalog '{}' from {:?}",
                config.catalog_resource, dir
            );
            ModificationRegistry::with_resources(DirectoryResources::new(dir))
        }
        None => ModificationRegistry::new(),
    };
    let mut registry = registry.with_catalog_name(config.catalog_resource.as_str());

    for path in &config.extensions {
        info!("Loading extension catalog {:?}", path);
        registry.load_extension(path)?;
    }
    Ok(registry)
}
