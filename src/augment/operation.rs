//! Single augmentation operations.
//!
//! An [`AugmentationOp`] pairs a transform kind with parameters drawn once at
//! construction. Applying the same op twice therefore performs the identical
//! transform; only the probability gate is re-rolled per application.

use std::str::FromStr;

use image::{imageops, DynamicImage, ImageBuffer, Rgb};
use rand::Rng;

use crate::config::AugmentConfig;
use crate::error::{EvoAugError, Result};
use crate::types::Image;

/// The transform families an operation can be built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Rotation,
    Flip,
    Zoom,
    Brightness,
    Contrast,
}

impl OpKind {
    /// All kinds in the fixed order the pipeline applies them.
    pub const ALL: [OpKind; 5] = [
        OpKind::Rotation,
        OpKind::Flip,
        OpKind::Zoom,
        OpKind::Brightness,
        OpKind::Contrast,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OpKind::Rotation => "rotation",
            OpKind::Flip => "flip",
            OpKind::Zoom => "zoom",
            OpKind::Brightness => "brightness",
            OpKind::Contrast => "contrast",
        }
    }
}

impl FromStr for OpKind {
    type Err = EvoAugError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "rotation" | "rotate" => Ok(OpKind::Rotation),
            "flip" => Ok(OpKind::Flip),
            "zoom" => Ok(OpKind::Zoom),
            "brightness" => Ok(OpKind::Brightness),
            "contrast" => Ok(OpKind::Contrast),
            other => Err(EvoAugError::Augmentation(format!(
                "Unknown augmentation type '{}'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Flip axis, sampled once per operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipDirection {
    Horizontal,
    Vertical,
}

/// Parameters drawn at construction for one operation
#[derive(Debug, Clone, Copy, PartialEq)]
enum Params {
    Rotation { angle: f32 },
    Flip { direction: FlipDirection },
    Zoom { factor: f32 },
    Brightness { factor: f32 },
    Contrast { factor: f32 },
}

/// One named transform with frozen parameters and an application probability.
#[derive(Debug, Clone)]
pub struct AugmentationOp {
    kind: OpKind,
    params: Params,
    prob: f64,
}

impl AugmentationOp {
    /// Build an operation from a type name, sampling its parameters once.
    ///
    /// Unknown type names fail immediately; they are never deferred to apply
    /// time.
    pub fn new<R: Rng>(name: &str, config: &AugmentConfig, rng: &mut R) -> Result<Self> {
        let kind = name.parse::<OpKind>()?;
        Ok(Self::from_kind(kind, config, rng))
    }

    /// Build an operation for a known kind, sampling its parameters once.
    pub fn from_kind<R: Rng>(kind: OpKind, config: &AugmentConfig, rng: &mut R) -> Self {
        let params = match kind {
            OpKind::Rotation => Params::Rotation {
                angle: rng.gen_range(-config.rotation_range..=config.rotation_range),
            },
            OpKind::Flip => Params::Flip {
                direction: if rng.gen_bool(0.5) {
                    FlipDirection::Horizontal
                } else {
                    FlipDirection::Vertical
                },
            },
            OpKind::Zoom => Params::Zoom {
                factor: rng.gen_range(config.zoom_range.0..=config.zoom_range.1),
            },
            OpKind::Brightness => Params::Brightness {
                factor: rng.gen_range(config.brightness_range.0..=config.brightness_range.1),
            },
            OpKind::Contrast => Params::Contrast {
                factor: rng.gen_range(config.contrast_range.0..=config.contrast_range.1),
            },
        };
        Self {
            kind,
            params,
            prob: config.prob,
        }
    }

    pub fn kind(&self) -> OpKind {
        self.kind
    }

    /// Apply the operation with probability `prob`.
    ///
    /// Returns the (possibly unchanged) image and whether the transform
    /// actually fired.
    pub fn apply<R: Rng>(&self, image: &Image, rng: &mut R) -> (Image, bool) {
        if !rng.gen_bool(self.prob) {
            return (image.clone(), false);
        }
        (self.transform(image), true)
    }

    /// Apply the transform unconditionally, bypassing the probability gate.
    pub fn transform(&self, image: &Image) -> Image {
        let rgb = image.to_rgb8();
        let out = match self.params {
            Params::Rotation { angle } => rotate(&rgb, angle),
            Params::Flip { direction } => match direction {
                FlipDirection::Horizontal => imageops::flip_horizontal(&rgb),
                FlipDirection::Vertical => imageops::flip_vertical(&rgb),
            },
            Params::Zoom { factor } => zoom(&rgb, factor),
            Params::Brightness { factor } => adjust_brightness(&rgb, factor),
            Params::Contrast { factor } => adjust_contrast(&rgb, factor),
        };
        Image::from_rgb8(&out)
    }
}

/// Rotate by the nearest quarter turn.
///
/// Angles within 45 degrees of zero leave the image unchanged.
fn rotate(rgb: &ImageBuffer<Rgb<u8>, Vec<u8>>, angle: f32) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    let normalized = ((angle % 360.0 + 360.0) % 360.0) as i32;
    match normalized {
        45..=135 => imageops::rotate90(rgb),
        136..=225 => imageops::rotate180(rgb),
        226..=315 => imageops::rotate270(rgb),
        _ => rgb.clone(),
    }
}

/// Center-crop to `1/factor` of each dimension, then resize back.
///
/// Factors at or below 1.0 zoom out by shrinking onto the same canvas, which
/// for the crop formulation means cropping more than the full frame is not
/// possible; those factors are treated as identity.
fn zoom(rgb: &ImageBuffer<Rgb<u8>, Vec<u8>>, factor: f32) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    let (width, height) = rgb.dimensions();
    let crop_width = (width as f32 / factor) as u32;
    let crop_height = (height as f32 / factor) as u32;

    if crop_width == 0 || crop_height == 0 || crop_width >= width || crop_height >= height {
        return rgb.clone();
    }

    let x = (width - crop_width) / 2;
    let y = (height - crop_height) / 2;

    let cropped = DynamicImage::ImageRgb8(rgb.clone()).crop_imm(x, y, crop_width, crop_height);
    cropped
        .resize_exact(width, height, imageops::FilterType::Lanczos3)
        .to_rgb8()
}

/// Scale every channel by `factor`, clamped to the valid range.
fn adjust_brightness(
    rgb: &ImageBuffer<Rgb<u8>, Vec<u8>>,
    factor: f32,
) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    let (width, height) = rgb.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let pixel = rgb.get_pixel(x, y);
        Rgb([
            (pixel[0] as f32 * factor).clamp(0.0, 255.0) as u8,
            (pixel[1] as f32 * factor).clamp(0.0, 255.0) as u8,
            (pixel[2] as f32 * factor).clamp(0.0, 255.0) as u8,
        ])
    })
}

/// Scale the distance of every channel from the mean intensity by `factor`.
fn adjust_contrast(
    rgb: &ImageBuffer<Rgb<u8>, Vec<u8>>,
    factor: f32,
) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    let (width, height) = rgb.dimensions();
    let total_pixels = (width * height) as f32;

    let mut sum = 0.0;
    for pixel in rgb.pixels() {
        sum += (pixel[0] as f32 + pixel[1] as f32 + pixel[2] as f32) / 3.0;
    }
    let mean = sum / total_pixels;

    ImageBuffer::from_fn(width, height, |x, y| {
        let pixel = rgb.get_pixel(x, y);
        Rgb([
            (mean + factor * (pixel[0] as f32 - mean)).clamp(0.0, 255.0) as u8,
            (mean + factor * (pixel[1] as f32 - mean)).clamp(0.0, 255.0) as u8,
            (mean + factor * (pixel[2] as f32 - mean)).clamp(0.0, 255.0) as u8,
        ])
    })
}
