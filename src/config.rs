//! Configuration structures for dataset splitting and the genetic
//! augmentation loop.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{EvoAugError, Result};

/// Parameter ranges for the augmentation operations.
///
/// Each operation samples its parameters from these ranges exactly once at
/// construction time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmentConfig {
    /// Rotation range in degrees (an angle is drawn from +/- this value)
    pub rotation_range: f32,
    /// Brightness factor range
    pub brightness_range: (f32, f32),
    /// Contrast factor range
    pub contrast_range: (f32, f32),
    /// Zoom factor range
    pub zoom_range: (f32, f32),
    /// Probability that any single operation fires when applied
    pub prob: f64,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            rotation_range: 180.0,
            brightness_range: (0.7, 1.3),
            contrast_range: (0.7, 1.3),
            zoom_range: (0.9, 1.1),
            prob: 0.5,
        }
    }
}

impl AugmentConfig {
    /// Validates the parameter ranges
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.prob) {
            return Err(EvoAugError::Config(format!(
                "Operation probability must be in [0, 1], got {}",
                self.prob
            )));
        }
        for (name, (lo, hi)) in [
            ("brightness", self.brightness_range),
            ("contrast", self.contrast_range),
            ("zoom", self.zoom_range),
        ] {
            if lo <= 0.0 || hi < lo {
                return Err(EvoAugError::Config(format!(
                    "Invalid {} range ({}, {})",
                    name, lo, hi
                )));
            }
        }
        Ok(())
    }
}

/// Configuration for the generational augmentation loop
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneticConfig {
    /// Number of generations to run (fixed, no early stopping)
    pub generations: usize,
    /// Number of images to keep after each selection step
    /// (None = keep as many as the input set)
    pub keep: Option<usize>,
    /// How many surviving images to preview per generation (1-10)
    pub display_count: usize,
    /// Augmentation parameter ranges
    pub augment: AugmentConfig,
    /// Random seed for reproducibility
    pub seed: u64,
    /// Optional directory to write the final survivors to, per class
    pub save_dir: Option<PathBuf>,
}

impl Default for GeneticConfig {
    fn default() -> Self {
        Self {
            generations: 5,
            keep: None,
            display_count: 3,
            augment: AugmentConfig::default(),
            seed: 42,
            save_dir: None,
        }
    }
}

impl GeneticConfig {
    /// Validates the configuration before any work starts
    pub fn validate(&self) -> Result<()> {
        if self.generations == 0 {
            return Err(EvoAugError::Config(
                "Number of generations must be at least 1".to_string(),
            ));
        }
        if self.keep == Some(0) {
            return Err(EvoAugError::Config(
                "Keep count must be at least 1".to_string(),
            ));
        }
        if !(1..=10).contains(&self.display_count) {
            return Err(EvoAugError::Config(format!(
                "Display count must be between 1 and 10, got {}",
                self.display_count
            )));
        }
        self.augment.validate()
    }
}

/// Train/validation/test/hyperparameter split ratios
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SplitRatios {
    /// Training data ratio
    pub train: f64,
    /// Validation data ratio
    pub validation: f64,
    /// Test data ratio
    pub test: f64,
    /// Hyperparameter-tuning data ratio
    pub hyper: f64,
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: 0.70,
            validation: 0.15,
            test: 0.10,
            hyper: 0.05,
        }
    }
}

impl SplitRatios {
    /// Validates that ratios are positive and sum to 1.0
    pub fn validate(&self) -> Result<()> {
        for (name, ratio) in [
            ("train", self.train),
            ("validation", self.validation),
            ("test", self.test),
            ("hyper", self.hyper),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                return Err(EvoAugError::Config(format!(
                    "{} ratio must be between 0.0 and 1.0, got {}",
                    name, ratio
                )));
            }
        }
        let sum = self.train + self.validation + self.test + self.hyper;
        if (sum - 1.0).abs() > 1e-5 {
            return Err(EvoAugError::Config(format!(
                "Split ratios must sum to 1.0, got {}",
                sum
            )));
        }
        Ok(())
    }
}

/// Configuration for dataset splitting
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Subset ratios
    pub ratios: SplitRatios,
    /// Random seed for reproducibility
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            ratios: SplitRatios::default(),
            seed: 42,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_genetic_config_is_valid() {
        assert!(GeneticConfig::default().validate().is_ok());
    }

    #[test]
    fn test_display_count_bounds() {
        let mut config = GeneticConfig::default();
        config.display_count = 0;
        assert!(config.validate().is_err());

        config.display_count = 11;
        assert!(config.validate().is_err());

        config.display_count = 10;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_generations_rejected() {
        let mut config = GeneticConfig::default();
        config.generations = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_split_ratios_validation() {
        assert!(SplitRatios::default().validate().is_ok());

        let invalid = SplitRatios {
            train: 0.5,
            validation: 0.3,
            test: 0.1,
            hyper: 0.05,
        };
        assert!(invalid.validate().is_err());
    }

    #[test]
    fn test_augment_config_bad_prob() {
        let mut config = AugmentConfig::default();
        config.prob = 1.5;
        assert!(config.validate().is_err());
    }
}
