/// Why a catalog lookup produced no value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LookupError {
    #[error("catalog unavailable: {0}")]
    Unavailable(String),

    #[error("product '{0}' not found")]
    NotFound(String),
}

pub trait Catalog {
    /// Plastic waste produced by one unit of `product`.
    ///
    /// Keys are compared after trimming and lowercasing.
    fn lookup(&self, product: &str) -> Result<f64, LookupError>;

    /// `false` when the reference source failed to load.
    fn is_available(&self) -> bool;
}
