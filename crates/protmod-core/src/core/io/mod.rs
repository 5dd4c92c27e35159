pub mod catalog;
pub mod export;
pub mod extension;
pub mod resources;
