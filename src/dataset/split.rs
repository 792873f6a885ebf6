//! Stratified dataset splitting.
//!
//! Partitions parallel image/label vectors into four disjoint subsets
//! (train, validation, test, hyperparameter-tuning) while preserving each
//! class's relative proportion. Deterministic for a fixed seed.

use std::collections::HashMap;

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::SplitConfig;
use crate::error::{EvoAugError, Result};
use crate::types::Image;

/// One split subset with parallel image and label vectors
#[derive(Debug, Default)]
pub struct Subset {
    pub images: Vec<Image>,
    pub labels: Vec<String>,
}

impl Subset {
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

/// The four disjoint subsets produced by a stratified split
#[derive(Debug)]
pub struct DatasetSplits {
    pub train: Subset,
    pub validation: Subset,
    pub test: Subset,
    pub hyper: Subset,
}

/// Which subset an index was assigned to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Assignment {
    Train,
    Validation,
    Test,
    Hyper,
}

impl DatasetSplits {
    /// Split parallel image/label vectors into four stratified subsets.
    ///
    /// Per class the indices are shuffled with a ChaCha8 RNG seeded from the
    /// config, then partitioned proportionally: test first, then validation,
    /// then hyper, with the remainder going to train. No guarantee is made
    /// that every class survives every subset beyond what proportional
    /// sampling provides.
    pub fn stratified(
        images: Vec<Image>,
        labels: Vec<String>,
        config: &SplitConfig,
    ) -> Result<Self> {
        config.ratios.validate()?;

        if images.len() != labels.len() {
            return Err(EvoAugError::Dataset(format!(
                "Image/label count mismatch: {} vs {}",
                images.len(),
                labels.len()
            )));
        }
        if images.is_empty() {
            return Err(EvoAugError::Dataset(
                "No images provided for splitting".to_string(),
            ));
        }

        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        // Group indices by class; iterate class names in sorted order so the
        // shuffle sequence is reproducible.
        let mut by_class: HashMap<&str, Vec<usize>> = HashMap::new();
        for (idx, label) in labels.iter().enumerate() {
            by_class.entry(label.as_str()).or_default().push(idx);
        }
        let mut class_names: Vec<&str> = by_class.keys().copied().collect();
        class_names.sort_unstable();

        let mut assignments = vec![Assignment::Train; images.len()];
        for name in class_names {
            let indices = by_class.get_mut(name).expect("grouped above");
            indices.shuffle(&mut rng);

            let n = indices.len();
            let n_test = (n as f64 * config.ratios.test).ceil() as usize;
            let n_val = (n as f64 * config.ratios.validation).ceil() as usize;
            let n_hyper = (n as f64 * config.ratios.hyper).ceil() as usize;

            for (pos, &idx) in indices.iter().enumerate() {
                assignments[idx] = if pos < n_test {
                    Assignment::Test
                } else if pos < n_test + n_val {
                    Assignment::Validation
                } else if pos < n_test + n_val + n_hyper {
                    Assignment::Hyper
                } else {
                    Assignment::Train
                };
            }
        }

        let mut splits = Self {
            train: Subset::default(),
            validation: Subset::default(),
            test: Subset::default(),
            hyper: Subset::default(),
        };
        for ((image, label), assignment) in images.into_iter().zip(labels).zip(assignments) {
            let subset = match assignment {
                Assignment::Train => &mut splits.train,
                Assignment::Validation => &mut splits.validation,
                Assignment::Test => &mut splits.test,
                Assignment::Hyper => &mut splits.hyper,
            };
            subset.images.push(image);
            subset.labels.push(label);
        }

        Ok(splits)
    }

    /// Summary counts for reporting and the optional JSON manifest.
    pub fn stats(&self) -> SplitStats {
        SplitStats {
            total: self.train.len() + self.validation.len() + self.test.len() + self.hyper.len(),
            train: self.train.len(),
            validation: self.validation.len(),
            test: self.test.len(),
            hyper: self.hyper.len(),
        }
    }
}

/// Statistics about dataset splits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitStats {
    pub total: usize,
    pub train: usize,
    pub validation: usize,
    pub test: usize,
    pub hyper: usize,
}

impl std::fmt::Display for SplitStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let pct = |n: usize| 100.0 * n as f64 / self.total.max(1) as f64;
        writeln!(f, "Dataset split statistics:")?;
        writeln!(f, "  Total images: {}", self.total)?;
        writeln!(f, "  Train:      {} ({:.1}%)", self.train, pct(self.train))?;
        writeln!(
            f,
            "  Validation: {} ({:.1}%)",
            self.validation,
            pct(self.validation)
        )?;
        writeln!(f, "  Test:       {} ({:.1}%)", self.test, pct(self.test))?;
        writeln!(f, "  Hyper:      {} ({:.1}%)", self.hyper, pct(self.hyper))
    }
}
