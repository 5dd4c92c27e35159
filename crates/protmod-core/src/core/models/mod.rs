//! # Core Models Module
//!
//! Data types describing protein modifications and where they occur.
//!
//! ## Key Components
//!
//! - [`modification`] - The [`ProteinModification`](modification::ProteinModification) definition and its optional fields
//! - [`category`] - Modification categories and occurrence types with label parsing
//! - [`condition`] - Structural conditions: components and the atom linkages between them
//! - [`attachment`] - The read-only view of one modification occurrence on a structure
//! - [`ids`] - Store keys for registered definitions

pub mod attachment;
pub mod category;
pub mod condition;
pub mod ids;
pub mod modification;
