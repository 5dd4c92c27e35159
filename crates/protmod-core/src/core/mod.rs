//! # Core Module
//!
//! The foundation layer of protmod: stateless data models, identifier
//! helpers, and the readers and writers that move modification definitions
//! in and out of the registry.
//!
//! - **Modification Representation** ([`models`]) - Definitions, categories, conditions, attachments
//! - **Catalog I/O** ([`io`]) - The bundled XML catalog, TOML extension catalogs, CSV export
//! - **Identifier Helpers** ([`utils`]) - Cross-reference vocabularies and accession formats

pub mod io;
pub mod models;
pub mod utils;
