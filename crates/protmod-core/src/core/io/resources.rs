use std::fmt;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

/// Name of the modification catalog bundled with the library.
pub const DEFAULT_CATALOG: &str = "ptm_list.xml";

const PTM_LIST_XML: &str = include_str!("../../../data/ptm_list.xml");

/// Opens named resources as byte streams.
///
/// The registry reads its catalog through this trait so that the data can
/// come from the library itself, a directory on disk, or anywhere else a
/// caller chooses.
pub trait ResourceProvider: fmt::Debug + Send + Sync {
    /// Opens the resource called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`io::ErrorKind::NotFound`] if no such resource exists, or any
    /// error raised while opening it.
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>>;
}

/// Serves resources compiled into the library.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedResources;

impl EmbeddedResources {
    fn lookup(name: &str) -> Option<&'static str> {
        match name {
            DEFAULT_CATALOG => Some(PTM_LIST_XML),
            _ => None,
        }
    }
}

impl ResourceProvider for EmbeddedResources {
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        match Self::lookup(name) {
            Some(content) => Ok(Box::new(content.as_bytes())),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("No embedded resource named '{}'", name),
            )),
        }
    }
}

/// Serves resources from files under a root directory.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceProvider for DirectoryResources {
    fn open(&self, name: &str) -> io::Result<Box<dyn Read + '_>> {
        let file = File::open(self.root.join(name))?;
        Ok(Box::new(BufReader::new(file)))
    }
}
