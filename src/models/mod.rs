//! Model catalog
//!
//! Descriptors for the models a router may select, and the mapping from
//! routing tiers to catalog entries.

pub mod catalog;
pub mod descriptor;

pub use catalog::{ModelCatalog, TierAssignments, TierModels};
pub use descriptor::{ModelDescriptor, Provider};
