use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Booster hyper-parameters and model storage location.
///
/// The defaults reproduce the authoring-time training setup: a small fixed
/// learning rate and a seeded 67/33 train/held-out partition so the same
/// inputs yield the same model.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ModelConfig {
    pub learning_rate: f32,
    pub max_depth: u32,
    pub num_boost_round: u32,
    /// Fraction of the labeled batch used for fitting; the remainder is a
    /// held-out hook for external evaluation and is not scored internally.
    pub train_fraction: f32,
    /// Seed for the train/held-out partition.
    pub split_seed: u64,
    /// Storage location of the persisted booster.
    pub model_path: PathBuf,
}

impl ModelConfig {
    /// Default hyper-parameters with a caller-chosen storage location.
    pub fn with_model_path(path: impl Into<PathBuf>) -> Self {
        ModelConfig {
            model_path: path.into(),
            ..ModelConfig::default()
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            learning_rate: 0.01,
            max_depth: 6,
            num_boost_round: 100,
            train_fraction: 0.67,
            split_seed: 42,
            model_path: PathBuf::from("delay_model.json"),
        }
    }
}
