use crate::classifier::forest::{ForestParams, RandomForest, Sample};
use crate::plastic_loader::loader::parse_number;
use crate::plastic_loader::{self, PlasticRecord};
use crate::utils::funcs::parse_flag;
use anyhow::{Context, Result, anyhow, ensure};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub data_path: PathBuf,
    pub model_path: PathBuf,
    pub test_ratio: f64,
    pub params: ForestParams,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub products: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    /// `None` when the test partition is empty.
    pub test_accuracy: Option<f64>,
}

/// Reads the training table, fits the forest and writes the model artifact.
pub fn train(options: &TrainOptions) -> Result<TrainReport> {
    let records = plastic_loader::load(&options.data_path)?;
    let (forest, report) = fit_records(&records, options.test_ratio, options.params)?;
    forest.save(&options.model_path)?;

    tracing::info!(
        model = %options.model_path.display(),
        trees = forest.n_trees(),
        train_rows = report.train_rows,
        test_rows = report.test_rows,
        accuracy = ?report.test_accuracy,
        "model trained and saved"
    );
    Ok(report)
}

pub fn fit_records(
    records: &[PlasticRecord],
    test_ratio: f64,
    params: ForestParams,
) -> Result<(RandomForest, TrainReport)> {
    ensure!(
        (0.0..1.0).contains(&test_ratio),
        "test ratio must be in [0, 1), got {test_ratio}"
    );

    let product_codes = encode_products(records);
    let samples = records
        .iter()
        .enumerate()
        .map(|(i, r)| to_sample(r, &product_codes).with_context(|| format!("training row {}", i + 2)))
        .collect::<Result<Vec<_>>>()?;

    let (train_idx, test_idx) = split_indices(samples.len(), test_ratio, params.seed);
    ensure!(!train_idx.is_empty(), "training partition is empty");

    let train_set: Vec<Sample> = train_idx.iter().map(|&i| samples[i].clone()).collect();
    let forest = RandomForest::fit(product_codes.clone(), &train_set, params)?;

    let test_accuracy = (!test_idx.is_empty()).then(|| {
        let hits = test_idx
            .iter()
            .filter(|&&i| forest.predict(&samples[i].features) == samples[i].label)
            .count();
        hits as f64 / test_idx.len() as f64
    });

    let report = TrainReport {
        products: product_codes.len(),
        train_rows: train_idx.len(),
        test_rows: test_idx.len(),
        test_accuracy,
    };
    Ok((forest, report))
}

/// Codes are positions in the sorted set of distinct product names.
pub fn encode_products(records: &[PlasticRecord]) -> BTreeMap<String, u32> {
    records
        .iter()
        .map(|r| r.product.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .zip(0u32..)
        .collect()
}

/// Shuffled split: the first `ceil(n * test_ratio)` indices form the test set.
pub fn split_indices(n: usize, test_ratio: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));

    let n_test = ((n as f64) * test_ratio).ceil() as usize;
    let train = indices.split_off(n_test.min(n));
    (train, indices)
}

fn to_sample(record: &PlasticRecord, codes: &BTreeMap<String, u32>) -> Result<Sample> {
    let raw_quantity = record
        .quantity
        .as_deref()
        .ok_or_else(|| anyhow!("missing quantity for '{}'", record.product))?;
    let quantity = parse_number(raw_quantity).context("bad quantity")?;

    let raw_label = record
        .production_allowed
        .as_deref()
        .ok_or_else(|| anyhow!("missing production_allowed for '{}'", record.product))?;
    let label = parse_flag(raw_label)
        .ok_or_else(|| anyhow!("bad production_allowed '{raw_label}'"))?;

    let code = codes
        .get(&record.product)
        .copied()
        .ok_or_else(|| anyhow!("product '{}' has no code", record.product))?;

    Ok(Sample {
        features: [f64::from(code), quantity, record.total_plastic_waste],
        label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(product: &str, quantity: f64, waste: f64, allowed: bool) -> PlasticRecord {
        PlasticRecord {
            product: product.to_string(),
            total_plastic_waste: waste,
            quantity: Some(quantity.to_string()),
            production_allowed: Some(u8::from(allowed).to_string()),
        }
    }

    #[test]
    fn product_codes_follow_sorted_names() {
        let records = vec![
            record("straw", 1.0, 1.0, true),
            record("bag", 1.0, 1.0, true),
            record("straw", 2.0, 2.0, true),
        ];
        let codes = encode_products(&records);
        assert_eq!(codes.get("bag"), Some(&0));
        assert_eq!(codes.get("straw"), Some(&1));
    }

    #[test]
    fn split_rounds_test_size_up() {
        let (train, test) = split_indices(11, 0.2, 42);
        assert_eq!(test.len(), 3);
        assert_eq!(train.len(), 8);

        let mut all: Vec<usize> = train.iter().chain(&test).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..11).collect::<Vec<_>>());
    }

    #[test]
    fn split_is_reproducible() {
        assert_eq!(split_indices(50, 0.2, 42), split_indices(50, 0.2, 42));
    }

    #[test]
    fn missing_label_is_reported() {
        let mut bad = record("cup", 1.0, 1.0, true);
        bad.production_allowed = None;
        let err = fit_records(&[bad], 0.0, ForestParams::default()).unwrap_err();
        assert!(format!("{err:#}").contains("production_allowed"));
    }

    #[test]
    fn unreadable_training_cells_are_reported() {
        let mut bad_label = record("cup", 1.0, 1.0, true);
        bad_label.production_allowed = Some("maybe".to_string());
        let err = fit_records(&[bad_label], 0.0, ForestParams::default()).unwrap_err();
        assert!(format!("{err:#}").contains("'maybe'"));

        let mut bad_quantity = record("cup", 1.0, 1.0, true);
        bad_quantity.quantity = Some("-3".to_string());
        let err = fit_records(&[bad_quantity], 0.0, ForestParams::default()).unwrap_err();
        assert!(format!("{err:#}").contains("bad quantity"));
    }

    #[test]
    fn single_row_leaves_no_training_data() {
        let rows = vec![record("cup", 1.0, 1.0, true)];
        assert!(fit_records(&rows, 0.5, ForestParams::default()).is_err());
    }

    #[test]
    fn reports_accuracy_on_held_out_rows() {
        let rows: Vec<PlasticRecord> = (1..=30_i32)
            .map(|q| {
                let waste = f64::from(q) * 30.0;
                record(if q % 2 == 0 { "bottle" } else { "cup" }, f64::from(q), waste, waste <= 400.0)
            })
            .collect();
        let (_, report) = fit_records(&rows, 0.2, ForestParams::default()).unwrap();

        assert_eq!(report.products, 2);
        assert_eq!(report.test_rows, 6);
        assert_eq!(report.train_rows, 24);
        assert!(report.test_accuracy.is_some());
    }
}
