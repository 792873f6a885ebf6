//! Dataset loader.
//!
//! Walks a class-per-subdirectory tree, infers labels from directory names,
//! and decodes images into normalized 224x224x3 float buffers.

use std::path::{Path, PathBuf};

use image::{imageops::FilterType, ImageReader};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{EvoAugError, Result};
use crate::types::{ClassMap, Image};
use crate::IMAGE_SIZE;

/// File extensions accepted as images
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "bmp"];

/// A single image file with its label and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageSample {
    /// Path to the image file
    pub path: PathBuf,
    /// Class label index
    pub label: usize,
    /// Class name, taken from the parent directory
    pub class_name: String,
}

/// An image dataset rooted at a directory with one subdirectory per class.
///
/// ```text
/// root_dir/
/// ├── class_a/
/// │   ├── image1.jpg
/// │   └── image2.jpg
/// └── class_b/
///     └── ...
/// ```
#[derive(Debug)]
pub struct ImageDataset {
    /// Root directory of the dataset
    pub root_dir: PathBuf,
    /// All samples in the dataset
    pub samples: Vec<ImageSample>,
    /// Class index/name mapping
    pub classes: ClassMap,
}

impl ImageDataset {
    /// Scan a dataset directory and index every image file.
    ///
    /// Class names are sorted so label indices are stable across runs.
    pub fn new<P: AsRef<Path>>(root_dir: P) -> Result<Self> {
        let root_dir = root_dir.as_ref().to_path_buf();
        info!("Loading dataset from: {:?}", root_dir);

        if !root_dir.exists() {
            return Err(EvoAugError::PathNotFound(root_dir));
        }

        let mut class_names: Vec<String> = Vec::new();
        for entry in std::fs::read_dir(&root_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                if let Some(name) = entry.file_name().to_str() {
                    class_names.push(name.to_string());
                }
            }
        }

        if class_names.is_empty() {
            return Err(EvoAugError::Dataset(format!(
                "No class directories found under {:?}",
                root_dir
            )));
        }

        let classes = ClassMap::new(class_names);
        info!("Found {} classes", classes.len());

        let mut samples = Vec::new();
        for class_name in classes.names() {
            let class_dir = root_dir.join(class_name);
            let label = classes
                .index(class_name)
                .expect("class map contains its own names");

            let before = samples.len();
            for entry in WalkDir::new(&class_dir)
                .min_depth(1)
                .max_depth(1)
                .into_iter()
                .filter_map(|e| e.ok())
            {
                let path = entry.path().to_path_buf();
                if let Some(ext) = path.extension() {
                    let ext = ext.to_string_lossy().to_lowercase();
                    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
                        samples.push(ImageSample {
                            path,
                            label,
                            class_name: class_name.clone(),
                        });
                    }
                }
            }
            debug!(
                "Class '{}' (label {}): {} images",
                class_name,
                label,
                samples.len() - before
            );
        }

        if samples.is_empty() {
            return Err(EvoAugError::Dataset(format!(
                "No image files found under {:?}",
                root_dir
            )));
        }

        info!("Indexed {} total samples", samples.len());

        Ok(Self {
            root_dir,
            samples,
            classes,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn num_classes(&self) -> usize {
        self.classes.len()
    }

    /// Decode one sample, resize to 224x224, and normalize to `[0, 1]`.
    pub fn load_image(&self, sample: &ImageSample) -> Result<Image> {
        let img = ImageReader::open(&sample.path)
            .map_err(|e| EvoAugError::ImageLoad(sample.path.clone(), e.to_string()))?
            .decode()
            .map_err(|e| EvoAugError::ImageLoad(sample.path.clone(), e.to_string()))?;

        let size = IMAGE_SIZE as u32;
        let resized = img.resize_exact(size, size, FilterType::Triangle);
        Ok(Image::from_rgb8(&resized.to_rgb8()))
    }

    /// Decode every sample into parallel image/label vectors.
    ///
    /// Files that fail to decode are logged and skipped rather than aborting
    /// the whole load.
    pub fn load_all(&self) -> Result<(Vec<Image>, Vec<String>)> {
        let mut images = Vec::with_capacity(self.samples.len());
        let mut labels = Vec::with_capacity(self.samples.len());

        for sample in &self.samples {
            match self.load_image(sample) {
                Ok(image) => {
                    images.push(image);
                    labels.push(sample.class_name.clone());
                }
                Err(e) => warn!("Skipping {:?}: {}", sample.path, e),
            }
        }

        if images.is_empty() {
            return Err(EvoAugError::Dataset(
                "Every image in the dataset failed to decode".to_string(),
            ));
        }

        info!("Loaded {} of {} images", images.len(), self.samples.len());
        Ok((images, labels))
    }

    /// Per-class counts and totals.
    pub fn stats(&self) -> DatasetStats {
        let mut class_counts = vec![0usize; self.num_classes()];
        for sample in &self.samples {
            class_counts[sample.label] += 1;
        }
        DatasetStats {
            total_samples: self.samples.len(),
            num_classes: self.num_classes(),
            class_counts,
            class_names: self.classes.names().to_vec(),
        }
    }
}

/// Statistics about the dataset
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetStats {
    pub total_samples: usize,
    pub num_classes: usize,
    pub class_counts: Vec<usize>,
    pub class_names: Vec<String>,
}

impl DatasetStats {
    /// Print statistics to the console with a bar per class
    pub fn print(&self) {
        println!("\nDataset statistics:");
        println!("  Total samples: {}", self.total_samples);
        println!("  Number of classes: {}", self.num_classes);
        println!("\n  Samples per class:");

        for (idx, name) in self.class_names.iter().enumerate() {
            let count = self.class_counts[idx];
            let bar_len = (count as f32 / self.total_samples as f32 * 40.0) as usize;
            let bar: String = "█".repeat(bar_len);
            println!("    {:3}. {:40} {:5} {}", idx, name, count, bar);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    fn write_test_dataset(root: &Path) {
        for (class, color) in [("healthy", [0u8, 200, 0]), ("blight", [120, 80, 0])] {
            let dir = root.join(class);
            std::fs::create_dir_all(&dir).unwrap();
            for i in 0..3 {
                let img = RgbImage::from_fn(32, 32, |_, _| Rgb(color));
                img.save(dir.join(format!("img_{}.png", i))).unwrap();
            }
        }
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let result = ImageDataset::new("/nonexistent/dataset/root");
        assert!(matches!(result, Err(EvoAugError::PathNotFound(_))));
    }

    #[test]
    fn test_loads_classes_and_samples() {
        let dir = std::env::temp_dir().join("evoaug_loader_test");
        let _ = std::fs::remove_dir_all(&dir);
        write_test_dataset(&dir);

        let dataset = ImageDataset::new(&dir).unwrap();
        assert_eq!(dataset.num_classes(), 2);
        assert_eq!(dataset.len(), 6);

        // Sorted class order: blight before healthy
        assert_eq!(dataset.classes.name(0), Some("blight"));
        assert_eq!(dataset.classes.name(1), Some("healthy"));

        let (images, labels) = dataset.load_all().unwrap();
        assert_eq!(images.len(), 6);
        assert_eq!(labels.len(), 6);
        assert!(images.iter().all(|img| img.has_standard_shape()));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_stats_counts_per_class() {
        let dir = std::env::temp_dir().join("evoaug_loader_stats_test");
        let _ = std::fs::remove_dir_all(&dir);
        write_test_dataset(&dir);

        let dataset = ImageDataset::new(&dir).unwrap();
        let stats = dataset.stats();
        assert_eq!(stats.class_counts, vec![3, 3]);
        assert_eq!(stats.total_samples, 6);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
