use serde::Serialize;

/// One row of the plastic reference table.
///
/// `quantity` and `production_allowed` are only present in sources that
/// were prepared for training. They stay as trimmed raw cells: the catalog
/// never reads them and the trainer validates them.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PlasticRecord {
    pub product: String,
    pub total_plastic_waste: f64,
    pub quantity: Option<String>,
    pub production_allowed: Option<String>,
}

/// Header-indexed cells read from a CSV file or the first sheet of a workbook.
#[derive(Debug, Default)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}
