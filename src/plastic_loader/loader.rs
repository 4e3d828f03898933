use crate::plastic_loader::model::{PlasticRecord, Table};
use crate::utils::funcs::normalize_product;
use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use std::io;
use std::path::Path;

const PRODUCT_COLUMN: &str = "product";
const WASTE_COLUMN: &str = "total_plastic_waste";
const QUANTITY_COLUMN: &str = "quantity";
const ALLOWED_COLUMN: &str = "production_allowed";

const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

fn data_to_string(dt: &Data) -> String {
    match dt {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            if (f.fract()).abs() < f64::EPSILON {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}

/// Reads the plastic reference table from a CSV file or a spreadsheet workbook.
pub fn load(path: impl AsRef<Path>) -> Result<Vec<PlasticRecord>> {
    let path = path.as_ref();
    let table = read_table(path)?;
    tracing::debug!(
        path = %path.display(),
        rows = table.rows.len(),
        cols = table.headers.len(),
        "read plastic table"
    );
    records_from_table(&table).with_context(|| format!("invalid plastic table '{}'", path.display()))
}

fn read_table(path: &Path) -> Result<Table> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .with_context(|| format!("'{}' has no file extension", path.display()))?;

    if extension == "csv" {
        let file = std::fs::File::open(path)
            .with_context(|| format!("cannot open csv '{}'", path.display()))?;
        return read_csv(file);
    }
    if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
        return read_workbook(path);
    }
    bail!("unsupported plastic table extension: .{extension}")
}

/// Reads a headed CSV stream into a [`Table`].
pub fn read_csv<R: io::Read>(reader: R) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .context("cannot read csv header")?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("malformed csv row {}", row_idx + 2))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(Table { headers, rows })
}

fn read_workbook(path: &Path) -> Result<Table> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("cannot open workbook '{}'", path.display()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .context("workbook has no sheets")?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("cannot find sheet '{sheet_name}'"))?;

    if range.is_empty() {
        return Ok(Table::default());
    }

    let mut rows = range
        .rows()
        .map(|row| row.iter().map(data_to_string).collect::<Vec<_>>());
    let headers = rows.next().unwrap_or_default();

    Ok(Table {
        headers,
        rows: rows.collect(),
    })
}

fn column_index(headers: &[String], name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
}

/// Turns raw cells into typed records.
///
/// `product` and `total_plastic_waste` columns are required and validated.
/// Training columns are carried through unparsed. Rows whose cells are all
/// blank are skipped; row numbers in errors count the header as row 1.
pub fn records_from_table(table: &Table) -> Result<Vec<PlasticRecord>> {
    let product_idx = column_index(&table.headers, PRODUCT_COLUMN)
        .with_context(|| format!("missing '{PRODUCT_COLUMN}' column"))?;
    let waste_idx = column_index(&table.headers, WASTE_COLUMN)
        .with_context(|| format!("missing '{WASTE_COLUMN}' column"))?;
    let quantity_idx = column_index(&table.headers, QUANTITY_COLUMN);
    let allowed_idx = column_index(&table.headers, ALLOWED_COLUMN);

    let mut records = Vec::with_capacity(table.rows.len());

    for (row_idx, row) in table.rows.iter().enumerate() {
        let line = row_idx + 2;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let cell = |idx: usize| row.get(idx).map(|c| c.trim()).unwrap_or("");

        let product = normalize_product(cell(product_idx));
        if product.is_empty() {
            bail!("row {line}: empty product name");
        }

        let total_plastic_waste = parse_number(cell(waste_idx))
            .with_context(|| format!("row {line}: bad {WASTE_COLUMN}"))?;

        let training_cell = |idx: Option<usize>| {
            idx.map(cell).filter(|c| !c.is_empty()).map(str::to_string)
        };

        records.push(PlasticRecord {
            product,
            total_plastic_waste,
            quantity: training_cell(quantity_idx),
            production_allowed: training_cell(allowed_idx),
        });
    }

    Ok(records)
}

pub fn parse_number(raw: &str) -> Result<f64> {
    let value: f64 = raw
        .parse()
        .with_context(|| format!("'{raw}' is not a number"))?;
    if !value.is_finite() || value < 0.0 {
        bail!("'{raw}' must be a finite non-negative number");
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(csv: &str) -> Table {
        read_csv(csv.as_bytes()).unwrap()
    }

    #[test]
    fn reads_catalog_columns_in_any_order() {
        let t = table("total_plastic_waste,Product\n100,Bottle\n2.5, straw \n");
        let records = records_from_table(&t).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].product, "bottle");
        assert_eq!(records[0].total_plastic_waste, 100.0);
        assert_eq!(records[1].product, "straw");
        assert_eq!(records[1].quantity, None);
    }

    #[test]
    fn reads_training_columns() {
        let t = table(
            "product,quantity,total_plastic_waste,production_allowed\n\
             bag,10,4,1\n\
             cup,3,80,no\n",
        );
        let records = records_from_table(&t).unwrap();

        assert_eq!(records[0].quantity.as_deref(), Some("10"));
        assert_eq!(records[0].production_allowed.as_deref(), Some("1"));
        assert_eq!(records[1].production_allowed.as_deref(), Some("no"));
    }

    #[test]
    fn junk_training_cells_do_not_block_catalog_columns() {
        let t = table(
            "product,quantity,total_plastic_waste,production_allowed
             cup,lots,45,maybe
             lid,,3,
",
        );
        let records = records_from_table(&t).unwrap();

        assert_eq!(records[0].total_plastic_waste, 45.0);
        assert_eq!(records[0].production_allowed.as_deref(), Some("maybe"));
        assert_eq!(records[1].quantity, None);
        assert_eq!(records[1].production_allowed, None);
    }

    #[test]
    fn skips_blank_rows() {
        let t = Table {
            headers: vec!["product".into(), "total_plastic_waste".into()],
            rows: vec![
                vec!["".into(), " ".into()],
                vec!["lid".into(), "3".into()],
            ],
        };
        assert_eq!(records_from_table(&t).unwrap().len(), 1);
    }

    #[test]
    fn rejects_missing_waste_column() {
        let t = table("product,weight\nbottle,3\n");
        let err = records_from_table(&t).unwrap_err();
        assert!(err.to_string().contains("total_plastic_waste"));
    }

    #[test]
    fn rejects_bad_numbers() {
        for bad in ["abc", "-1", "inf", "NaN"] {
            let t = table(&format!("product,total_plastic_waste\nbottle,{bad}\n"));
            assert!(records_from_table(&t).is_err(), "{bad} accepted");
        }
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load("catalog.parquet").unwrap_err();
        assert!(err.to_string().contains("unsupported"));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(load("does/not/exist.csv").is_err());
    }
}
