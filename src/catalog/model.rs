use std::str::FromStr;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub product: String,
    pub plastic_waste_per_unit: f64,
}

impl CatalogEntry {
    pub fn new(product: impl Into<String>, plastic_waste_per_unit: f64) -> Self {
        Self {
            product: product.into(),
            plastic_waste_per_unit,
        }
    }
}

/// What to do when the reference source lists a product twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep the first row, like a top-down scan of the table would.
    #[default]
    FirstWins,
    LastWins,
    /// Treat the source as malformed.
    Reject,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-wins" | "first" => Ok(Self::FirstWins),
            "last-wins" | "last" => Ok(Self::LastWins),
            "reject" => Ok(Self::Reject),
            other => Err(format!(
                "unknown duplicate policy '{other}' (expected first-wins, last-wins or reject)"
            )),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate product '{0}'")]
    Duplicate(String),

    #[error("product '{product}' has invalid waste per unit {value}")]
    InvalidWaste { product: String, value: f64 },

    #[error("empty product name")]
    EmptyProduct,

    #[error(transparent)]
    Source(#[from] anyhow::Error),
}
