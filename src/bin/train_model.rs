use clap::Parser;
use dotenv::dotenv;
use plastic_advisor::classifier::trainer::{self, TrainOptions};
use plastic_advisor::classifier::ForestParams;
use plastic_advisor::init_tracing;
use std::path::PathBuf;

/// Fits the production-allowed classifier from the plastic table.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Training table (CSV or workbook)
    #[arg(long, env = "PLASTIC_DATA_PATH", default_value = "plastic_data.csv")]
    data: PathBuf,

    /// Where to write the model artifact
    #[arg(long, env = "MODEL_PATH", default_value = "ai_model.bin")]
    output: PathBuf,

    #[arg(long, default_value_t = 100)]
    trees: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Share of rows held out for the accuracy check
    #[arg(long, default_value_t = 0.2)]
    test_ratio: f64,
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();
    init_tracing();

    let args = Args::parse();
    let options = TrainOptions {
        data_path: args.data,
        model_path: args.output,
        test_ratio: args.test_ratio,
        params: ForestParams {
            n_trees: args.trees,
            seed: args.seed,
        },
    };

    let report = trainer::train(&options)?;
    match report.test_accuracy {
        Some(accuracy) => println!(
            "model trained on {} rows, {:.1}% accurate on {} held-out rows, saved to {}",
            report.train_rows,
            accuracy * 100.0,
            report.test_rows,
            options.model_path.display()
        ),
        None => println!(
            "model trained on {} rows, saved to {}",
            report.train_rows,
            options.model_path.display()
        ),
    }
    Ok(())
}
