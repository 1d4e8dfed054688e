use super::{Efficacy, EfficacyEstimator, EstimatorError};
use crate::config::EstimatorConfig;
use ndarray::{Array1, Array2, ArrayView1};
use rand::prelude::*;
use rand::rngs::StdRng;
use sha2::{Digest, Sha256};
use tracing::info;

/// Feature vector width (age, severity, symptom count, ... in spirit)
pub const FEATURE_COUNT: usize = 5;

/// Features considered per stump
const FEATURES_PER_STUMP: usize = 3;

/// One-split decision tree. Rows with `x[feature] <= threshold` go left.
#[derive(Debug, Clone)]
struct Stump {
    feature: usize,
    threshold: f64,
    left: Efficacy,
    right: Efficacy,
}

impl Stump {
    fn predict(&self, row: ArrayView1<f64>) -> Efficacy {
        if row[self.feature] <= self.threshold {
            self.left
        } else {
            self.right
        }
    }

    /// Fit on the rows in `sample`, choosing the split with the lowest
    /// weighted Gini impurity across `candidates`.
    fn fit(x: &Array2<f64>, y: &Array1<u8>, sample: &[usize], candidates: &[usize]) -> Self {
        let total = sample.len() as f64;
        let total_high = sample.iter().filter(|&&i| y[i] == 1).count() as f64;

        let mut best = Stump {
            feature: candidates.first().copied().unwrap_or(0),
            threshold: f64::INFINITY,
            left: majority(total_high, total),
            right: majority(total_high, total),
        };
        let mut best_impurity = gini(total_high, total);

        for &feature in candidates {
            let mut order: Vec<usize> = sample.to_vec();
            order.sort_by(|&a, &b| x[[a, feature]].total_cmp(&x[[b, feature]]));

            let mut left_high = 0.0;
            for (pos, pair) in order.windows(2).enumerate() {
                if y[pair[0]] == 1 {
                    left_high += 1.0;
                }
                let (lo, hi) = (x[[pair[0], feature]], x[[pair[1], feature]]);
                if lo == hi {
                    continue;
                }
                let left_n = (pos + 1) as f64;
                let right_n = total - left_n;
                let right_high = total_high - left_high;
                let impurity =
                    (left_n * gini(left_high, left_n) + right_n * gini(right_high, right_n)) / total;
                if impurity < best_impurity {
                    best_impurity = impurity;
                    best = Stump {
                        feature,
                        threshold: (lo + hi) / 2.0,
                        left: majority(left_high, left_n),
                        right: majority(right_high, right_n),
                    };
                }
            }
        }
        best
    }
}

fn gini(high: f64, n: f64) -> f64 {
    if n == 0.0 {
        return 0.0;
    }
    let p = high / n;
    1.0 - p * p - (1.0 - p) * (1.0 - p)
}

fn majority(high: f64, n: f64) -> Efficacy {
    if high * 2.0 > n {
        Efficacy::High
    } else {
        Efficacy::Low
    }
}

/// Synthetic training data: uniform features, label High when
/// `0.6 * x0 + 0.4 * x3` plus a little noise exceeds 0.5.
pub fn synthetic_dataset(samples: usize, rng: &mut impl Rng) -> (Array2<f64>, Array1<u8>) {
    let mut x = Array2::zeros((samples, FEATURE_COUNT));
    let mut y = Array1::zeros(samples);
    for i in 0..samples {
        for j in 0..FEATURE_COUNT {
            x[[i, j]] = rng.gen::<f64>();
        }
        let noise = rng.gen_range(-0.1..0.1);
        y[i] = u8::from(0.6 * x[[i, 0]] + 0.4 * x[[i, 3]] + noise > 0.5);
    }
    (x, y)
}

/// Deterministic features for a (treatment, patient) pair
pub fn pair_features(treatment: &str, patient: &str) -> Array1<f64> {
    let mut hasher = Sha256::new();
    hasher.update(treatment.as_bytes());
    hasher.update([0u8]);
    hasher.update(patient.as_bytes());
    let digest = hasher.finalize();

    Array1::from_iter(digest.chunks_exact(4).take(FEATURE_COUNT).map(|chunk| {
        let word = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        f64::from(word) / f64::from(u32::MAX)
    }))
}

/// Bagged ensemble of decision stumps, trained once and read-only after.
#[derive(Debug, Clone)]
pub struct ForestEstimator {
    stumps: Vec<Stump>,
    holdout_accuracy: f64,
}

impl ForestEstimator {
    /// Train on a fresh synthetic dataset with a random holdout split
    pub fn train(config: &EstimatorConfig) -> Result<Self, EstimatorError> {
        if config.trees == 0 {
            return Err(EstimatorError::Training("tree count must be positive".to_string()));
        }
        if config.samples < 2 {
            return Err(EstimatorError::Training(
                "need at least two samples to split train and test".to_string(),
            ));
        }
        if !(config.test_fraction > 0.0 && config.test_fraction < 1.0) {
            return Err(EstimatorError::Training(format!(
                "test fraction {} outside (0, 1)",
                config.test_fraction
            )));
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (x, y) = synthetic_dataset(config.samples, &mut rng);

        let mut indices: Vec<usize> = (0..config.samples).collect();
        indices.shuffle(&mut rng);
        let test_len = ((config.samples as f64 * config.test_fraction).round() as usize)
            .clamp(1, config.samples - 1);
        let (test, train) = indices.split_at(test_len);

        let features: Vec<usize> = (0..FEATURE_COUNT).collect();
        let stumps = (0..config.trees)
            .map(|_| {
                let bootstrap: Vec<usize> = (0..train.len())
                    .map(|_| train[rng.gen_range(0..train.len())])
                    .collect();
                let candidates: Vec<usize> = features
                    .choose_multiple(&mut rng, FEATURES_PER_STUMP)
                    .copied()
                    .collect();
                Stump::fit(&x, &y, &bootstrap, &candidates)
            })
            .collect();

        let mut model = Self {
            stumps,
            holdout_accuracy: 0.0,
        };
        model.holdout_accuracy = model.accuracy_on(&x, &y, test);
        info!(
            trees = config.trees,
            samples = config.samples,
            "Model accuracy: {:.3}",
            model.holdout_accuracy
        );
        Ok(model)
    }

    pub fn holdout_accuracy(&self) -> f64 {
        self.holdout_accuracy
    }

    pub fn tree_count(&self) -> usize {
        self.stumps.len()
    }

    /// Accuracy on a freshly generated synthetic set
    pub fn evaluate(&self, samples: usize, seed: u64) -> f64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let (x, y) = synthetic_dataset(samples, &mut rng);
        let rows: Vec<usize> = (0..samples).collect();
        self.accuracy_on(&x, &y, &rows)
    }

    fn accuracy_on(&self, x: &Array2<f64>, y: &Array1<u8>, rows: &[usize]) -> f64 {
        if rows.is_empty() {
            return 0.0;
        }
        let correct = rows
            .iter()
            .filter(|&&i| self.vote(x.row(i)).as_u8() == y[i])
            .count();
        correct as f64 / rows.len() as f64
    }

    /// Majority vote; ties go to Low
    fn vote(&self, row: ArrayView1<f64>) -> Efficacy {
        let high = self
            .stumps
            .iter()
            .filter(|stump| stump.predict(row) == Efficacy::High)
            .count();
        if high * 2 > self.stumps.len() {
            Efficacy::High
        } else {
            Efficacy::Low
        }
    }
}

impl EfficacyEstimator for ForestEstimator {
    fn predict(&self, treatment: &str, patient: &str) -> Result<Efficacy, EstimatorError> {
        if self.stumps.is_empty() {
            return Err(EstimatorError::Prediction("model has no trees".to_string()));
        }
        let features = pair_features(treatment, patient);
        Ok(self.vote(features.view()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(seed: u64) -> EstimatorConfig {
        EstimatorConfig {
            trees: 25,
            samples: 600,
            test_fraction: 0.2,
            seed: Some(seed),
            ..EstimatorConfig::default()
        }
    }

    #[test]
    fn test_training_beats_chance() {
        let model = ForestEstimator::train(&config(7)).unwrap();
        assert_eq!(model.tree_count(), 25);
        assert!(model.holdout_accuracy() > 0.6, "{}", model.holdout_accuracy());
        assert!(model.evaluate(500, 99) > 0.6);
    }

    #[test]
    fn test_prediction_is_deterministic() {
        let a = ForestEstimator::train(&config(42)).unwrap();
        let b = ForestEstimator::train(&config(42)).unwrap();
        for (treatment, patient) in [("Paracetamol", "Rohit"), ("Hydration", "Tanya"), ("Yoga", "")] {
            let first = a.predict(treatment, patient).unwrap();
            assert_eq!(first, a.predict(treatment, patient).unwrap());
            assert_eq!(first, b.predict(treatment, patient).unwrap());
        }
    }

    #[test]
    fn test_pair_features_separate_inputs() {
        let f = pair_features("Paracetamol", "Rohit");
        assert_eq!(f.len(), FEATURE_COUNT);
        assert!(f.iter().all(|v| (0.0..=1.0).contains(v)));
        // the separator keeps ("ab", "c") and ("a", "bc") apart
        assert_ne!(pair_features("ab", "c"), pair_features("a", "bc"));
    }

    #[test]
    fn test_invalid_training_config() {
        let mut bad = config(1);
        bad.trees = 0;
        assert!(matches!(ForestEstimator::train(&bad), Err(EstimatorError::Training(_))));

        let mut bad = config(1);
        bad.test_fraction = 1.0;
        assert!(ForestEstimator::train(&bad).is_err());
    }

    #[test]
    fn test_stump_finds_separating_threshold() {
        let x = Array2::from_shape_vec((4, 1), vec![0.1, 0.2, 0.8, 0.9]).unwrap();
        let y = Array1::from(vec![0u8, 0, 1, 1]);
        let stump = Stump::fit(&x, &y, &[0, 1, 2, 3], &[0]);
        assert!((stump.threshold - 0.5).abs() < 1e-9);
        assert_eq!(stump.left, Efficacy::Low);
        assert_eq!(stump.right, Efficacy::High);
    }
}
