//! Dataset handling: loading, splitting, balance checking, and writing.
//!
//! The on-disk layout is one subdirectory per class under the dataset root.
//! The loader decodes everything into parallel image/label vectors; the
//! splitter partitions those into train/validation/test/hyper subsets via
//! stratified sampling; the writer mirrors the class layout when saving
//! augmented images back out.

pub mod balance;
pub mod loader;
pub mod split;
pub mod writer;

pub use balance::{check_balance, class_counts};
pub use loader::{DatasetStats, ImageDataset, ImageSample};
pub use split::{DatasetSplits, SplitStats, Subset};
pub use writer::{save_all, save_image};
