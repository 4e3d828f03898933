pub mod interface;
pub mod model;
pub mod table;

pub use interface::{Catalog, LookupError};
pub use model::{CatalogEntry, CatalogError, DuplicatePolicy};
pub use table::PlasticCatalog;
