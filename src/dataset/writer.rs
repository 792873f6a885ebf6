//! Writes augmented images to disk.
//!
//! Output layout mirrors the input: one directory per class, with filenames
//! derived from a hash of the image contents so re-runs do not produce
//! duplicate files for identical images.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{EvoAugError, Result};
use crate::types::Image;

/// Hash the denormalized RGB bytes into a 16-hex-digit filename stem.
fn content_hash(image: &Image) -> String {
    let mut hasher = DefaultHasher::new();
    image.to_rgb8().as_raw().hash(&mut hasher);
    format!("{:016x}", hasher.finish())
}

/// Save one image as `save_dir/<class_name>/<hash>.jpg`.
pub fn save_image(image: &Image, class_name: &str, save_dir: &Path) -> Result<PathBuf> {
    let class_dir = save_dir.join(class_name);
    std::fs::create_dir_all(&class_dir)?;

    let path = class_dir.join(format!("{}.jpg", content_hash(image)));
    image.to_rgb8().save(&path)?;
    Ok(path)
}

/// Save parallel image/label vectors under `save_dir`, one subdirectory per
/// class.
pub fn save_all(images: &[Image], labels: &[String], save_dir: &Path) -> Result<usize> {
    if images.len() != labels.len() {
        return Err(EvoAugError::Dataset(format!(
            "Image/label count mismatch: {} vs {}",
            images.len(),
            labels.len()
        )));
    }

    let mut written = 0;
    for (image, label) in images.iter().zip(labels) {
        save_image(image, label, save_dir)?;
        written += 1;
    }
    info!("Wrote {} images to {:?}", written, save_dir);
    Ok(written)
}
