use crate::classifier::interface::Predictor;
use crate::utils::funcs::normalize_product;
use anyhow::{Context, Result, bail, ensure};
use rand::Rng;
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// product code, quantity, `total_plastic_waste` column
pub const FEATURES: usize = 3;

/// Code used for products that were not seen during training.
pub const UNKNOWN_PRODUCT: f64 = -1.0;

#[derive(Debug, Clone)]
pub struct Sample {
    pub features: [f64; FEATURES],
    pub label: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForestParams {
    pub n_trees: usize,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            seed: 42,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
enum Node {
    Leaf {
        allowed_ratio: f64,
    },
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

impl Node {
    fn allowed_ratio(&self, x: &[f64; FEATURES]) -> f64 {
        let mut node = self;
        loop {
            match node {
                Node::Leaf { allowed_ratio } => return *allowed_ratio,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] <= *threshold { left } else { right };
                }
            }
        }
    }
}

/// Bagged CART trees predicting whether a production run is allowed.
///
/// The artifact carries its own product encoding so that serving encodes
/// names exactly as training did.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RandomForest {
    product_codes: BTreeMap<String, u32>,
    trees: Vec<Node>,
}

impl RandomForest {
    pub fn fit(
        product_codes: BTreeMap<String, u32>,
        samples: &[Sample],
        params: ForestParams,
    ) -> Result<Self> {
        ensure!(!samples.is_empty(), "cannot fit a forest on zero samples");
        ensure!(params.n_trees > 0, "a forest needs at least one tree");

        let max_features = ((FEATURES as f64).sqrt() as usize).max(1);
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let n = samples.len();

        let trees = (0..params.n_trees)
            .map(|_| {
                let mut bootstrap: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                grow(samples, &mut bootstrap, max_features, &mut rng)
            })
            .collect();

        Ok(Self {
            product_codes,
            trees,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn product_code(&self, product: &str) -> f64 {
        self.product_codes
            .get(&normalize_product(product))
            .map_or(UNKNOWN_PRODUCT, |&code| f64::from(code))
    }

    /// Mean leaf ratio of allowed samples across all trees.
    pub fn probability(&self, x: &[f64; FEATURES]) -> f64 {
        let sum: f64 = self.trees.iter().map(|t| t.allowed_ratio(x)).sum();
        sum / self.trees.len() as f64
    }

    pub fn predict(&self, x: &[f64; FEATURES]) -> bool {
        self.probability(x) > 0.5
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("cannot create model file '{}'", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, self)
            .with_context(|| format!("cannot write model '{}'", path.display()))?;
        writer.flush()?;
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("cannot open model file '{}'", path.display()))?;
        let forest: Self = bincode::deserialize_from(BufReader::new(file))
            .with_context(|| format!("cannot decode model '{}'", path.display()))?;
        Ok(forest)
    }
}

impl Predictor for RandomForest {
    fn production_allowed(&self, product: &str, quantity: u64, waste_per_unit: f64) -> Result<bool> {
        if self.trees.is_empty() {
            bail!("model has no trees");
        }
        let x = [self.product_code(product), quantity as f64, waste_per_unit];
        Ok(self.predict(&x))
    }
}

fn gini(positives: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let p = positives as f64 / total as f64;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

fn grow(samples: &[Sample], idx: &mut [usize], max_features: usize, rng: &mut ChaCha8Rng) -> Node {
    let total = idx.len();
    let positives = idx.iter().filter(|&&i| samples[i].label).count();
    let leaf = Node::Leaf {
        allowed_ratio: positives as f64 / total as f64,
    };

    if positives == 0 || positives == total {
        return leaf;
    }

    let Some((feature, threshold)) = best_split(samples, idx, max_features, rng) else {
        return leaf;
    };

    let mut mid = 0;
    for i in 0..idx.len() {
        if samples[idx[i]].features[feature] <= threshold {
            idx.swap(i, mid);
            mid += 1;
        }
    }

    let (left, right) = idx.split_at_mut(mid);
    Node::Split {
        feature,
        threshold,
        left: Box::new(grow(samples, left, max_features, rng)),
        right: Box::new(grow(samples, right, max_features, rng)),
    }
}

/// Lowest weighted Gini split over up to `max_features` non-constant
/// features, drawn in random order.
fn best_split(
    samples: &[Sample],
    idx: &[usize],
    max_features: usize,
    rng: &mut ChaCha8Rng,
) -> Option<(usize, f64)> {
    let mut features: Vec<usize> = (0..FEATURES).collect();
    features.shuffle(rng);

    let total = idx.len();
    let total_positives = idx.iter().filter(|&&i| samples[i].label).count();
    let mut best: Option<(usize, f64, f64)> = None;
    let mut visited = 0;

    for feature in features {
        if visited == max_features {
            break;
        }

        let mut column: Vec<(f64, bool)> = idx
            .iter()
            .map(|&i| (samples[i].features[feature], samples[i].label))
            .collect();
        column.sort_by(|a, b| a.0.total_cmp(&b.0));

        if column[0].0 == column[total - 1].0 {
            continue;
        }
        visited += 1;

        let mut left_positives = 0;
        for i in 0..total - 1 {
            if column[i].1 {
                left_positives += 1;
            }
            let (lo, hi) = (column[i].0, column[i + 1].0);
            if lo == hi {
                continue;
            }

            let left = i + 1;
            let right = total - left;
            let impurity = (left as f64 * gini(left_positives, left)
                + right as f64 * gini(total_positives - left_positives, right))
                / total as f64;

            if best.map_or(true, |(_, _, b)| impurity < b) {
                let mut threshold = lo + (hi - lo) / 2.0;
                if threshold >= hi {
                    threshold = lo;
                }
                best = Some((feature, threshold, impurity));
            }
        }
    }

    best.map(|(feature, threshold, _)| (feature, threshold))
}
