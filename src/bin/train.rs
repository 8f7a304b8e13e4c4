use anyhow::{bail, Context, Result};

use flight_delay::config::ModelConfig;
use flight_delay::io::flights_csv::read_flights_csv;
use flight_delay::model::DelayClassifier;
use flight_delay::preprocessing;

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(data_path) = args.next() else {
        bail!("usage: train <flights.csv> [model-path]");
    };
    let model_path = args.next().unwrap_or_else(|| "delay_model.json".to_string());

    let flights = read_flights_csv(&data_path)?;
    log::info!("loaded {} flights from {}", flights.len(), data_path);

    let (x, y) =
        preprocessing::preprocess_training(&flights).context("preprocessing failed")?;
    let delayed = y.iter().filter(|&&v| v == 1).count();
    log::info!("{} delayed / {} on time", delayed, y.len() - delayed);

    let config = ModelConfig::with_model_path(&model_path);
    let mut classifier = DelayClassifier::new(config)?;
    classifier.fit(&x, &y).context("training failed")?;
    log::info!("model trained and persisted to {}", model_path);
    Ok(())
}
