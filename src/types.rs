//! Core type definitions shared across the crate.

use std::collections::HashMap;

use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};

use crate::error::{EvoAugError, Result};
use crate::{CHANNELS, IMAGE_SIZE};

/// A decoded image as a flat buffer of normalized floats in HWC order.
///
/// Pixel values live in `[0, 1]`. The buffer has no identity beyond its
/// contents: the loader creates it, augmentation consumes it, and selection
/// discards it. Most of the crate expects the standard 224x224x3 shape, but
/// the struct carries its own dimensions so malformed inputs can be detected
/// rather than silently reinterpreted.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    data: Vec<f32>,
    width: u32,
    height: u32,
    channels: u32,
}

impl Image {
    /// Create an image from raw normalized data.
    ///
    /// The buffer length must match `width * height * channels`.
    pub fn from_data(data: Vec<f32>, width: u32, height: u32, channels: u32) -> Result<Self> {
        let expected = (width * height * channels) as usize;
        if data.len() != expected {
            return Err(EvoAugError::Dataset(format!(
                "Buffer length {} does not match {}x{}x{}",
                data.len(),
                width,
                height,
                channels
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            channels,
        })
    }

    /// All-zero image of the standard shape.
    pub fn zeros() -> Self {
        let size = IMAGE_SIZE as u32;
        Self {
            data: vec![0.0; (size * size * CHANNELS as u32) as usize],
            width: size,
            height: size,
            channels: CHANNELS as u32,
        }
    }

    /// Normalize an 8-bit RGB image into a float buffer.
    pub fn from_rgb8(rgb: &RgbImage) -> Self {
        let (width, height) = rgb.dimensions();
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for pixel in rgb.pixels() {
            data.push(pixel[0] as f32 / 255.0);
            data.push(pixel[1] as f32 / 255.0);
            data.push(pixel[2] as f32 / 255.0);
        }
        Self {
            data,
            width,
            height,
            channels: 3,
        }
    }

    /// Denormalize back to an 8-bit RGB image, clamping to `[0, 255]`.
    pub fn to_rgb8(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| {
            let base = ((y * self.width + x) * self.channels) as usize;
            Rgb([
                (self.data[base] * 255.0).clamp(0.0, 255.0) as u8,
                (self.data[base + 1] * 255.0).clamp(0.0, 255.0) as u8,
                (self.data[base + 2] * 255.0).clamp(0.0, 255.0) as u8,
            ])
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Whether this image has the standard 224x224x3 shape.
    pub fn has_standard_shape(&self) -> bool {
        self.width == IMAGE_SIZE as u32
            && self.height == IMAGE_SIZE as u32
            && self.channels == CHANNELS as u32
    }

    /// Raw normalized pixel data in HWC order.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Elementwise average of two images of identical shape.
    ///
    /// Used as the crossover step of the genetic loop: the offspring of two
    /// parents is their pixelwise mean.
    pub fn blend(&self, other: &Self) -> Result<Self> {
        if self.data.len() != other.data.len() {
            return Err(EvoAugError::Dataset(format!(
                "Cannot blend images of different sizes ({} vs {})",
                self.data.len(),
                other.data.len()
            )));
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(a, b)| (a + b) / 2.0)
            .collect();
        Ok(Self {
            data,
            width: self.width,
            height: self.height,
            channels: self.channels,
        })
    }
}

/// Bidirectional mapping between class indices and class names.
///
/// Passed explicitly to every function that needs to resolve a label to a
/// directory or display name; there is no ambient global lookup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassMap {
    names: Vec<String>,
    indices: HashMap<String, usize>,
}

impl ClassMap {
    /// Build a class map from sorted class names.
    pub fn new(mut names: Vec<String>) -> Self {
        names.sort();
        let indices = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.clone(), idx))
            .collect();
        Self { names, indices }
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn index(&self, name: &str) -> Option<usize> {
        self.indices.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_has_standard_shape() {
        let img = Image::zeros();
        assert!(img.has_standard_shape());
        assert_eq!(img.data().len(), IMAGE_SIZE * IMAGE_SIZE * CHANNELS);
    }

    #[test]
    fn test_from_data_rejects_bad_length() {
        let result = Image::from_data(vec![0.0; 10], 224, 224, 3);
        assert!(result.is_err());
    }

    #[test]
    fn test_rgb8_round_trip() {
        let rgb = RgbImage::from_fn(4, 4, |x, y| Rgb([(x * 60) as u8, (y * 60) as u8, 128]));
        let img = Image::from_rgb8(&rgb);
        assert_eq!(img.width(), 4);
        assert!(!img.has_standard_shape());

        let back = img.to_rgb8();
        assert_eq!(back.get_pixel(3, 0)[0], 180);
        assert_eq!(back.get_pixel(0, 3)[1], 180);
    }

    #[test]
    fn test_blend_identical_images_is_identity() {
        let rgb = RgbImage::from_fn(8, 8, |x, _| Rgb([(x * 30) as u8, 0, 255]));
        let img = Image::from_rgb8(&rgb);
        let blended = img.blend(&img).unwrap();

        for (a, b) in img.data().iter().zip(blended.data().iter()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_blend_shape_mismatch() {
        let a = Image::zeros();
        let b = Image::from_rgb8(&RgbImage::new(2, 2));
        assert!(a.blend(&b).is_err());
    }

    #[test]
    fn test_class_map_is_sorted() {
        let map = ClassMap::new(vec!["b".to_string(), "a".to_string(), "c".to_string()]);
        assert_eq!(map.name(0), Some("a"));
        assert_eq!(map.index("c"), Some(2));
        assert_eq!(map.len(), 3);
    }
}
