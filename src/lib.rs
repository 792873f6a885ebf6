//! # EvoAug
//!
//! Genetic image augmentation for class-per-directory datasets.
//!
//! The crate loads an image dataset from disk (one subdirectory per class),
//! splits it into train/validation/test/hyperparameter subsets with
//! stratified sampling, and runs a heuristic generational loop: mutate every
//! image through a fixed augmentation pipeline, score each mutant by mean
//! absolute pixel difference against its original, keep the most-different
//! ones, and average neighbouring survivors as a crossover step.
//!
//! ## Modules
//!
//! - `dataset`: loading, stratified splitting, balance checks, JPEG output
//! - `augment`: single operations and the fixed five-op pipeline
//! - `genetic`: fitness scoring and the generational loop
//! - `utils`: logging and terminal display helpers
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use evoaug::dataset::ImageDataset;
//! use evoaug::genetic::evolve;
//! use evoaug::GeneticConfig;
//!
//! let dataset = ImageDataset::new("data/leaves")?;
//! let (images, labels) = dataset.load_all()?;
//! let (augmented, labels) = evolve(&images, &labels, &GeneticConfig::default());
//! ```

pub mod augment;
pub mod config;
pub mod dataset;
pub mod error;
pub mod genetic;
pub mod types;
pub mod utils;

pub use augment::{AugmentationOp, OpKind, Pipeline};
pub use config::{AugmentConfig, GeneticConfig, SplitConfig, SplitRatios};
pub use dataset::{check_balance, class_counts, DatasetSplits, ImageDataset};
pub use error::{EvoAugError, Result};
pub use genetic::{evolve, fitness};
pub use types::{ClassMap, Image};

/// Side length every image is resized to
pub const IMAGE_SIZE: usize = 224;

/// Number of color channels
pub const CHANNELS: usize = 3;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
