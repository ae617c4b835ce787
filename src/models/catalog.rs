//! Model catalog and tier resolution
//!
//! The catalog is the set of models a deployment knows about. A
//! [`TierAssignments`] table names one catalog entry per [`ModelTier`];
//! resolving it yields the [`TierModels`] a router is built from.

use super::ModelDescriptor;
use crate::error::{AppError, AppResult};
use crate::router::ModelTier;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Validated collection of model descriptors keyed by id
#[derive(Debug, Clone, Default)]
pub struct ModelCatalog {
    models: Vec<Arc<ModelDescriptor>>,
    by_id: HashMap<String, usize>,
}

impl ModelCatalog {
    /// Build a catalog, validating every descriptor
    ///
    /// # Errors
    /// Returns `AppError::Config` if a descriptor is invalid or two descriptors
    /// share an id.
    pub fn new(models: impl IntoIterator<Item = ModelDescriptor>) -> AppResult<Self> {
        let mut catalog = Self::default();

        for model in models {
            model.validate()?;
            if catalog.by_id.contains_key(model.id()) {
                return Err(AppError::Config(format!(
                    "Model id '{}' appears more than once in the catalog",
                    model.id()
                )));
            }
            catalog
                .by_id
                .insert(model.id().to_string(), catalog.models.len());
            catalog.models.push(Arc::new(model));
        }

        Ok(catalog)
    }

    /// Look up a model by id
    pub fn get(&self, id: &str) -> Option<&Arc<ModelDescriptor>> {
        self.by_id.get(id).map(|&index| &self.models[index])
    }

    /// Iterate models in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ModelDescriptor>> {
        self.models.iter()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Resolve each tier's model id against the catalog
    ///
    /// There is no fallback model: a tier whose id is missing is an error, as is
    /// a model assigned to more than one tier.
    pub fn resolve_tiers(&self, assignments: &TierAssignments) -> AppResult<TierModels> {
        let mut seen: HashMap<&str, ModelTier> = HashMap::new();

        for tier in ModelTier::ALL {
            let model_id = assignments.model_id(tier);
            if self.get(model_id).is_none() {
                return Err(AppError::MissingTierModel {
                    tier,
                    model_id: model_id.to_string(),
                });
            }
            if let Some(first) = seen.insert(model_id, tier) {
                return Err(AppError::DuplicateTierModel {
                    model_id: model_id.to_string(),
                    first,
                    second: tier,
                });
            }
        }

        // Every id was checked above
        let lookup = |tier: ModelTier| {
            self.get(assignments.model_id(tier))
                .cloned()
                .ok_or_else(|| AppError::MissingTierModel {
                    tier,
                    model_id: assignments.model_id(tier).to_string(),
                })
        };

        Ok(TierModels {
            low: lookup(ModelTier::Low)?,
            mid: lookup(ModelTier::Mid)?,
            high: lookup(ModelTier::High)?,
            superior: lookup(ModelTier::Superior)?,
        })
    }
}

/// Model id chosen for each tier
///
/// All four tiers are required; a missing key fails at deserialization time.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TierAssignments {
    low: String,
    mid: String,
    high: String,
    superior: String,
}

impl TierAssignments {
    pub fn new(
        low: impl Into<String>,
        mid: impl Into<String>,
        high: impl Into<String>,
        superior: impl Into<String>,
    ) -> Self {
        Self {
            low: low.into(),
            mid: mid.into(),
            high: high.into(),
            superior: superior.into(),
        }
    }

    /// Model id assigned to `tier`
    pub fn model_id(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Low => &self.low,
            ModelTier::Mid => &self.mid,
            ModelTier::High => &self.high,
            ModelTier::Superior => &self.superior,
        }
    }
}

/// Resolved descriptor for every tier
#[derive(Debug, Clone)]
pub struct TierModels {
    low: Arc<ModelDescriptor>,
    mid: Arc<ModelDescriptor>,
    high: Arc<ModelDescriptor>,
    superior: Arc<ModelDescriptor>,
}

impl TierModels {
    pub fn get(&self, tier: ModelTier) -> &Arc<ModelDescriptor> {
        match tier {
            ModelTier::Low => &self.low,
            ModelTier::Mid => &self.mid,
            ModelTier::High => &self.high,
            ModelTier::Superior => &self.superior,
        }
    }
}
