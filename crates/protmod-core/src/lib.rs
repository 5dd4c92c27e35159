//! # protmod
//!
//! An in-memory registry of protein modification definitions, cross-referenced
//! by RESID, PSI-MOD and PDB Chemical Component identifiers.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless modification models, identifier
//!   helpers, and catalog readers and writers.
//!
//! - **[`registry`]: The Public API.** The store with its lookup indexes, the
//!   single-assignment builder used to populate it, and the lazily loaded
//!   [`ModificationRegistry`](registry::ModificationRegistry).
//!
//! ```
//! use protmod::registry::ModificationRegistry;
//!
//! let registry = ModificationRegistry::new();
//! let phosphoserine = registry.get_by_resid_id("AA0037").unwrap();
//! assert_eq!(phosphoserine.pdbcc_id(), Some("SEP"));
//! ```

pub mod core;
pub mod registry;
