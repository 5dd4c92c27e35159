//! # Registry Module
//!
//! Registration and lookup of protein modification definitions.
//!
//! ## Overview
//!
//! A definition is created with [`ModificationStore::register`], which fixes its
//! identifier, category and occurrence type, and completed through the returned
//! [`ModificationBuilder`]. Every optional attribute can be assigned once. The
//! store keeps four lookup indexes in step with the stored definitions:
//!
//! - by modification ID (one-to-one)
//! - by RESID ID (one-to-one)
//! - by PSI-MOD ID (one-to-one)
//! - by PDBCC ID (one-to-many; several definitions may share a chemical component)
//!
//! [`ModificationRegistry`] wraps a store and populates it from the bundled
//! catalog the first time it is used.

mod builder;
pub mod error;
mod lazy;
mod store;

pub use builder::ModificationBuilder;
pub use error::RegistryError;
pub use lazy::ModificationRegistry;
pub use store::ModificationStore;
