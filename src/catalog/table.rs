use crate::catalog::interface::{Catalog, LookupError};
use crate::catalog::model::{CatalogEntry, CatalogError, DuplicatePolicy};
use crate::plastic_loader;
use crate::utils::funcs::normalize_product;
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

/// Read-only product → waste-per-unit table.
///
/// A source that failed to load leaves the catalog `Unavailable`; the
/// process keeps running and every lookup reports the load failure.
#[derive(Debug, Clone)]
pub enum PlasticCatalog {
    Loaded(HashMap<String, f64>),
    Unavailable { reason: String },
}

impl PlasticCatalog {
    /// Loads the table at `path`, degrading to `Unavailable` on any failure.
    pub fn load(path: impl AsRef<Path>, policy: DuplicatePolicy) -> Self {
        let path = path.as_ref();
        match Self::try_load(path, policy) {
            Ok(catalog) => {
                tracing::info!(path = %path.display(), products = catalog.len(), "plastic catalog loaded");
                catalog
            }
            Err(e) => {
                tracing::error!(path = %path.display(), "cannot load plastic catalog: {e:#}");
                Self::Unavailable {
                    reason: format!("{e:#}"),
                }
            }
        }
    }

    pub fn try_load(path: impl AsRef<Path>, policy: DuplicatePolicy) -> Result<Self, CatalogError> {
        let records = plastic_loader::load(path)?;
        Self::from_entries(
            records
                .into_iter()
                .map(|r| CatalogEntry::new(r.product, r.total_plastic_waste)),
            policy,
        )
    }

    pub fn from_entries(
        entries: impl IntoIterator<Item = CatalogEntry>,
        policy: DuplicatePolicy,
    ) -> Result<Self, CatalogError> {
        let mut table = HashMap::new();

        for entry in entries {
            let key = normalize_product(&entry.product);
            if key.is_empty() {
                return Err(CatalogError::EmptyProduct);
            }
            let value = entry.plastic_waste_per_unit;
            if !value.is_finite() || value < 0.0 {
                return Err(CatalogError::InvalidWaste {
                    product: key,
                    value,
                });
            }

            match table.entry(key) {
                Entry::Vacant(slot) => {
                    slot.insert(value);
                }
                Entry::Occupied(mut slot) => {
                    tracing::warn!(product = %slot.key(), ?policy, "duplicate catalog product");
                    match policy {
                        DuplicatePolicy::FirstWins => {}
                        DuplicatePolicy::LastWins => {
                            slot.insert(value);
                        }
                        DuplicatePolicy::Reject => {
                            return Err(CatalogError::Duplicate(slot.key().clone()));
                        }
                    }
                }
            }
        }

        Ok(Self::Loaded(table))
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Loaded(table) => table.len(),
            Self::Unavailable { .. } => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Catalog for PlasticCatalog {
    fn lookup(&self, product: &str) -> Result<f64, LookupError> {
        match self {
            Self::Loaded(table) => {
                let key = normalize_product(product);
                table
                    .get(&key)
                    .copied()
                    .ok_or(LookupError::NotFound(key))
            }
            Self::Unavailable { reason } => Err(LookupError::Unavailable(reason.clone())),
        }
    }

    fn is_available(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }
}
