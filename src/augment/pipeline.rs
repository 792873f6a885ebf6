//! Fixed augmentation pipeline.
//!
//! Applies the five operations in a fixed order to one image and records
//! which of them actually fired.

use rand::Rng;

use crate::augment::operation::{AugmentationOp, OpKind};
use crate::config::AugmentConfig;
use crate::types::Image;

/// The fixed five-operation sequence: rotation, flip, zoom, brightness,
/// contrast.
///
/// Operation parameters are sampled once when the pipeline is built, so the
/// same pipeline applies the same candidate transforms to every image it
/// sees; per image, each operation independently fires with its configured
/// probability.
#[derive(Debug, Clone)]
pub struct Pipeline {
    ops: Vec<AugmentationOp>,
}

impl Pipeline {
    /// Build a pipeline, sampling every operation's parameters once.
    pub fn new<R: Rng>(config: &AugmentConfig, rng: &mut R) -> Self {
        let ops = OpKind::ALL
            .iter()
            .map(|&kind| AugmentationOp::from_kind(kind, config, rng))
            .collect();
        Self { ops }
    }

    /// Run the sequence over one image.
    ///
    /// Images that are not exactly 224x224x3 are passed through unchanged
    /// with a warning and an empty applied-ops label. For valid images the
    /// output always has the same shape as the input.
    pub fn apply<R: Rng>(&self, image: &Image, rng: &mut R) -> (Image, Vec<&'static str>) {
        if !image.has_standard_shape() {
            tracing::warn!(
                "Skipping augmentation for image of shape {}x{}x{}",
                image.width(),
                image.height(),
                image.channels()
            );
            return (image.clone(), Vec::new());
        }

        let mut current = image.clone();
        let mut applied = Vec::new();
        for op in &self.ops {
            let (next, fired) = op.apply(&current, rng);
            if fired {
                applied.push(op.kind().name());
            }
            current = next;
        }
        (current, applied)
    }

    pub fn ops(&self) -> &[AugmentationOp] {
        &self.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AugmentConfig;
    use image::{Rgb, RgbImage};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn standard_image() -> Image {
        let rgb = RgbImage::from_fn(224, 224, |x, y| Rgb([(x % 256) as u8, (y % 256) as u8, 64]));
        Image::from_rgb8(&rgb)
    }

    #[test]
    fn test_pipeline_holds_five_ops_in_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let pipeline = Pipeline::new(&AugmentConfig::default(), &mut rng);
        let kinds: Vec<_> = pipeline.ops().iter().map(|op| op.kind().name()).collect();
        assert_eq!(
            kinds,
            vec!["rotation", "flip", "zoom", "brightness", "contrast"]
        );
    }

    #[test]
    fn test_pipeline_preserves_shape() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let pipeline = Pipeline::new(&AugmentConfig::default(), &mut rng);
        let image = standard_image();

        for _ in 0..10 {
            let (out, _) = pipeline.apply(&image, &mut rng);
            assert!(out.has_standard_shape());
        }
    }

    #[test]
    fn test_wrong_shape_passes_through_unchanged() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let pipeline = Pipeline::new(&AugmentConfig::default(), &mut rng);

        let rgb = RgbImage::from_fn(64, 48, |_, _| Rgb([10, 20, 30]));
        let small = Image::from_rgb8(&rgb);

        let (out, applied) = pipeline.apply(&small, &mut rng);
        assert_eq!(out, small);
        assert!(applied.is_empty());
    }

    #[test]
    fn test_applied_label_matches_firing() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = AugmentConfig {
            prob: 1.0,
            ..AugmentConfig::default()
        };
        let pipeline = Pipeline::new(&config, &mut rng);
        let image = standard_image();

        let (_, applied) = pipeline.apply(&image, &mut rng);
        assert_eq!(applied.len(), 5);
    }
}
