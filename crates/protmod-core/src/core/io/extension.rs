use super::catalog::{CatalogEntry, CrossReference};
use crate::core::models::category::{ModificationCategory, OccurrenceType, ParseLabelError};
use crate::core::utils::identifiers::IdScheme;
use crate::registry::{ModificationStore, RegistryError};
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ExtensionLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid entry in '{path}': {source}")]
    InvalidLabel {
        path: String,
        source: ParseLabelError,
    },
    #[error("Failed to register '{id}' from '{path}': {source}")]
    Registry {
        path: String,
        id: String,
        source: RegistryError,
    },
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct ExtensionFile {
    #[serde(default)]
    modification: Vec<RawModification>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct RawModification {
    id: String,
    category: String,
    occurrence: String,
    resid_id: Option<String>,
    resid_name: Option<String>,
    psimod_id: Option<String>,
    psimod_name: Option<String>,
    pdbcc_id: Option<String>,
    pdbcc_name: Option<String>,
    systematic_name: Option<String>,
    description: Option<String>,
    formula: Option<String>,
}

impl RawModification {
    fn into_entry(self) -> Result<CatalogEntry, ParseLabelError> {
        let category: ModificationCategory = self.category.parse()?;
        let occurrence: OccurrenceType = self.occurrence.parse()?;

        let mut entry = CatalogEntry::new(&self.id, category, occurrence);
        entry.description = self.description;
        entry.systematic_name = self.systematic_name;
        entry.formula = self.formula;

        let references = [
            (IdScheme::Resid, self.resid_id, self.resid_name),
            (IdScheme::Psimod, self.psimod_id, self.psimod_name),
            (IdScheme::Pdbcc, self.pdbcc_id, self.pdbcc_name),
        ];
        for (scheme, accession, name) in references {
            match accession {
                Some(accession) => entry.cross_references.push(CrossReference {
                    scheme,
                    accession,
                    name,
                }),
                None if name.is_some() => {
                    debug!(id = %entry.id, %scheme, "Ignoring {} name without an ID", scheme);
                }
                None => {}
            }
        }
        Ok(entry)
    }
}

/// Registers every `[[modification]]` table of the TOML file at `path`.
///
/// The whole file is parsed before anything is registered, so a syntax error
/// leaves `store` untouched. A registration failure stops the load and keeps
/// the tables before it; the failing table itself is not registered.
///
/// # Return
///
/// The number of definitions registered.
pub fn load_extension(
    store: &mut ModificationStore,
    path: &Path,
) -> Result<usize, ExtensionLoadError> {
    let path_str = path.to_string_lossy().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| ExtensionLoadError::Io {
        path: path_str.clone(),
        source: e,
    })?;
    let file: ExtensionFile = toml::from_str(&content).map_err(|e| ExtensionLoadError::Toml {
        path: path_str.clone(),
        source: e,
    })?;

    let entries = file
        .modification
        .into_iter()
        .map(RawModification::into_entry)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ExtensionLoadError::InvalidLabel {
            path: path_str.clone(),
            source: e,
        })?;

    let count = entries.len();
    for entry in entries {
        let id = entry.id.clone();
        entry
            .register_into(store)
            .map_err(|source| ExtensionLoadError::Registry {
                path: path_str.clone(),
                id,
                source,
            })?;
    }
    info!(path = %path_str, count, "Loaded extension catalog");
    Ok(count)
}
