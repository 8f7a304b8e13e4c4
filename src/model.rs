//! Gradient-boosted delay classifier.
//!
//! Owns the single fitted booster for the process. Lifecycle: UNINITIALIZED
//! at construction unless persisted state loads, FITTED after a successful
//! `fit` (which persists before installing the new model) or after a lazy
//! reload triggered by `predict`.
use gbdt::config::Config;
use gbdt::decision_tree::{Data, DataVec};
use gbdt::gradient_boost::GBDT;
use log::{debug, info};
use ndarray::Array2;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::ModelConfig;
use crate::error::DelayError;
use crate::store;

/// Decision threshold on the boosted probability output.
const DECISION_THRESHOLD: f32 = 0.5;

/// gbdt's binary log-likelihood loss; trains on +1/-1 targets and predicts
/// a positive-class probability.
const LOSS_TYPE: &str = "LogLikelyhood";

pub struct DelayClassifier {
    model: Option<GBDT>,
    config: ModelConfig,
}

impl DelayClassifier {
    /// Create a classifier, loading any previously persisted booster from
    /// `config.model_path`.
    pub fn new(config: ModelConfig) -> Result<Self, DelayError> {
        let model = store::load(&config.model_path)?;
        if model.is_some() {
            info!(
                "loaded persisted delay model from {}",
                config.model_path.display()
            );
        }
        Ok(DelayClassifier { model, config })
    }

    pub fn is_fitted(&self) -> bool {
        self.model.is_some()
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Fit on encoded features and 0/1 labels, then persist.
    ///
    /// Rows are partitioned with a seeded shuffle; only the training fraction
    /// is fitted and the held-out remainder is left for external evaluation.
    /// The positive class is weighted by `count(0) / count(1)` over the full
    /// label set so the minority delayed class is not ignored by the
    /// ensemble. Persistence runs before the new model is installed: a fit
    /// whose save fails leaves the previous state untouched.
    pub fn fit(&mut self, x: &Array2<f32>, y: &[i32]) -> Result<(), DelayError> {
        assert_eq!(x.nrows(), y.len(), "feature rows and labels must align");

        let scale = positive_class_weight(y)?;
        debug!("positive-class weight = {:.4}", scale);

        let train_rows = self.training_partition(x.nrows());

        let mut train_data = DataVec::with_capacity(train_rows.len());
        for &row in &train_rows {
            let features = x.row(row).to_vec();
            let weight = if y[row] == 1 { scale } else { 1.0 };
            let target = if y[row] == 1 { 1.0 } else { -1.0 };
            train_data.push(Data::new_training_data(features, weight, target, None));
        }

        let mut conf = Config::new();
        conf.set_feature_size(x.ncols());
        conf.set_shrinkage(self.config.learning_rate);
        conf.set_max_depth(self.config.max_depth);
        conf.set_iterations(self.config.num_boost_round as usize);
        conf.set_loss(LOSS_TYPE);

        info!(
            "fitting booster on {} of {} rows ({} boost rounds, depth {})",
            train_data.len(),
            x.nrows(),
            self.config.num_boost_round,
            self.config.max_depth
        );
        let mut model = GBDT::new(&conf);
        model.fit(&mut train_data);

        store::save(&self.config.model_path, &model)?;
        self.model = Some(model);
        Ok(())
    }

    /// Predict 0/1 delay labels for an encoded batch, order preserving.
    ///
    /// Attempts one lazy reload from persisted state when no in-process
    /// model exists yet; if none is found the classifier is not ready.
    pub fn predict(&mut self, x: &Array2<f32>) -> Result<Vec<i32>, DelayError> {
        if self.model.is_none() {
            self.model = store::load(&self.config.model_path)?;
            if self.model.is_some() {
                info!("lazily reloaded persisted delay model");
            }
        }
        let model = self.model.as_ref().ok_or(DelayError::ModelNotReady)?;

        let mut batch = DataVec::with_capacity(x.nrows());
        for row in 0..x.nrows() {
            batch.push(Data::new_test_data(x.row(row).to_vec(), None));
        }
        let probabilities = model.predict(&batch);
        Ok(probabilities
            .iter()
            .map(|&p| if p > DECISION_THRESHOLD { 1 } else { 0 })
            .collect())
    }

    /// Seeded shuffle of row indices, truncated to the training fraction.
    fn training_partition(&self, n_samples: usize) -> Vec<usize> {
        let mut rng = StdRng::seed_from_u64(self.config.split_seed);
        let mut indices: Vec<usize> = (0..n_samples).collect();
        indices.shuffle(&mut rng);
        let n_train = ((n_samples as f32) * self.config.train_fraction).round() as usize;
        indices.truncate(n_train.max(1));
        indices
    }
}

/// `count(0) / count(1)` over the full training label set. Guarded: a batch
/// with zero positive labels is a domain error, not an arithmetic fault.
fn positive_class_weight(y: &[i32]) -> Result<f32, DelayError> {
    let n_pos = y.iter().filter(|&&v| v == 1).count();
    if n_pos == 0 {
        return Err(DelayError::Imbalance);
    }
    let n_neg = y.len() - n_pos;
    Ok(n_neg as f32 / n_pos as f32)
}
