//! Fitness scoring for augmented images.

use crate::error::{EvoAugError, Result};
use crate::types::Image;

/// Mean absolute pixel difference between an original and an augmented
/// image.
///
/// Higher means "more different", which the genetic loop uses as a proxy for
/// augmentation diversity. An image scored against itself is exactly 0.
/// There is no weighting beyond the mean.
pub fn fitness(original: &Image, augmented: &Image) -> Result<f32> {
    let a = original.data();
    let b = augmented.data();
    if a.len() != b.len() {
        return Err(EvoAugError::Dataset(format!(
            "Cannot score images of different sizes ({} vs {})",
            a.len(),
            b.len()
        )));
    }

    let sum: f32 = a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).sum();
    Ok(sum / a.len() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_identical_images_score_zero() {
        let rgb = RgbImage::from_fn(16, 16, |x, y| Rgb([(x * 16) as u8, (y * 16) as u8, 77]));
        let img = Image::from_rgb8(&rgb);
        assert_eq!(fitness(&img, &img).unwrap(), 0.0);
    }

    #[test]
    fn test_different_images_score_positive() {
        let black = Image::from_rgb8(&RgbImage::from_fn(8, 8, |_, _| Rgb([0, 0, 0])));
        let white = Image::from_rgb8(&RgbImage::from_fn(8, 8, |_, _| Rgb([255, 255, 255])));

        let score = fitness(&black, &white).unwrap();
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_score_is_the_mean_difference() {
        // Half the pixels differ by exactly 1.0, so the mean is 0.5.
        let left = Image::from_rgb8(&RgbImage::from_fn(2, 1, |_, _| Rgb([0, 0, 0])));
        let right = Image::from_rgb8(&RgbImage::from_fn(2, 1, |x, _| {
            if x == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        }));

        let score = fitness(&left, &right).unwrap();
        assert!((score - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_size_mismatch_is_an_error() {
        let small = Image::from_rgb8(&RgbImage::new(2, 2));
        let large = Image::zeros();
        assert!(fitness(&small, &large).is_err());
    }
}
