pub mod forest;
pub mod interface;
pub mod trainer;

pub use forest::{ForestParams, RandomForest};
pub use interface::Predictor;
pub use trainer::{TrainOptions, TrainReport};
