use crate::cli::{Cli, OutputFormat};
use crate::error::{CliError, Result};
use clap::ValueEnum;
use directories::ProjectDirs;
use protmod::core::io::resources::DEFAULT_CATALOG;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialCatalogConfig {
    directory: Option<PathBuf>,
    resource: Option<String>,
    extensions: Option<Vec<PathBuf>>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
struct PartialOutputConfig {
    format: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    catalog: Option<PartialCatalogConfig>,
    output: Option<PartialOutputConfig>,
}

/// Fully resolved settings for one CLI invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory to read the catalog from; the bundled catalog when `None`.
    pub catalog_dir: Option<PathBuf>,
    pub catalog_resource: String,
    pub extensions: Vec<PathBuf>,
    pub format: OutputFormat,
}

pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("org", "protmod", "protmod").map(|dirs| dirs.config_dir().join("config.toml"))
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Reads `explicit` if given, otherwise the default config file when one
    /// exists. Without either, every setting falls back to its default.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }
        match default_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => {
                debug!("No configuration file found; using defaults.");
                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli(mut self, cli: &Cli) -> Result<AppConfig> {
        self.apply_set_values(&cli.set_values)?;

        let catalog = self.catalog.take().unwrap_or_default();
        let output = self.output.take().unwrap_or_default();

        let format = match output.format {
            Some(label) => OutputFormat::from_str(&label, true).map_err(|_| {
                CliError::Config(format!(
                    "Invalid value for output.format: '{}'. Expected text, toml or csv.",
                    label
                ))
            })?,
            None => OutputFormat::default(),
        };

        let mut extensions = catalog.extensions.unwrap_or_default();
        extensions.extend(cli.extensions.iter().cloned());

        Ok(AppConfig {
            catalog_dir: cli.catalog_dir.clone().or(catalog.directory),
            catalog_resource: catalog
                .resource
                .unwrap_or_else(|| DEFAULT_CATALOG.to_string()),
            extensions,
            format,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            match key {
                "catalog.directory" => {
                    self.catalog.get_or_insert_with(Default::default).directory =
                        Some(PathBuf::from(value));
                }
                "catalog.resource" => {
                    self.catalog.get_or_insert_with(Default::default).resource =
                        Some(value.to_string());
                }
                "output.format" => {
                    self.output.get_or_insert_with(Default::default).format =
                        Some(value.to_string());
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
