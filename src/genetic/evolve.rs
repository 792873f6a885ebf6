//! The generational augmentation loop.
//!
//! Each generation mutates every image in the pool through the fixed
//! pipeline, scores the mutants against their own pre-mutation originals,
//! keeps the top-N most-different, previews a handful, and appends
//! neighbour-averaged crossover offspring before the next generation. The
//! pool is truncated back to N before returning.

use std::cmp::Ordering;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{error, info};

use crate::augment::Pipeline;
use crate::config::GeneticConfig;
use crate::dataset::writer::save_all;
use crate::error::{EvoAugError, Result};
use crate::genetic::fitness::fitness;
use crate::types::Image;
use crate::utils::display;

/// One member of the evolving pool: an image and the class label that
/// follows it through selection and crossover.
#[derive(Debug, Clone)]
struct Individual {
    image: Image,
    label: String,
}

/// Run the genetic augmentation loop over parallel image/label vectors.
///
/// The loop runs a fixed number of generations with no early stopping. On
/// any internal failure the error is logged and the original, unaugmented
/// images and labels are returned unchanged, so the caller always gets back
/// as many images as it passed in (for the default `keep`).
pub fn evolve(
    images: &[Image],
    labels: &[String],
    config: &GeneticConfig,
) -> (Vec<Image>, Vec<String>) {
    match run(images, labels, config) {
        Ok(result) => result,
        Err(e) => {
            error!("Genetic augmentation failed: {}; returning original images", e);
            (images.to_vec(), labels.to_vec())
        }
    }
}

fn run(
    images: &[Image],
    labels: &[String],
    config: &GeneticConfig,
) -> Result<(Vec<Image>, Vec<String>)> {
    config.validate()?;

    if images.len() != labels.len() {
        return Err(EvoAugError::Dataset(format!(
            "Image/label count mismatch: {} vs {}",
            images.len(),
            labels.len()
        )));
    }
    if images.is_empty() {
        return Err(EvoAugError::Dataset(
            "No images provided for augmentation".to_string(),
        ));
    }

    let keep = config.keep.unwrap_or(images.len()).min(images.len());
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    let pipeline = Pipeline::new(&config.augment, &mut rng);

    let mut pool: Vec<Individual> = images
        .iter()
        .zip(labels)
        .map(|(image, label)| Individual {
            image: image.clone(),
            label: label.clone(),
        })
        .collect();

    for generation in 0..config.generations {
        // Mutate and score. Every mutant is paired with its own
        // pre-mutation original, so scoring never relies on positional
        // correspondence.
        let mut scored: Vec<(Individual, f32, Vec<&'static str>)> =
            Vec::with_capacity(pool.len());
        for individual in &pool {
            let (augmented, applied) = pipeline.apply(&individual.image, &mut rng);
            let score = fitness(&individual.image, &augmented)?;
            scored.push((
                Individual {
                    image: augmented,
                    label: individual.label.clone(),
                },
                score,
                applied,
            ));
        }

        // Select the top-N most-different mutants. The sort is stable, so
        // ties keep dataset order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scored.truncate(keep);

        let best = scored.first().map(|(_, score, _)| *score).unwrap_or(0.0);
        let mean =
            scored.iter().map(|(_, score, _)| score).sum::<f32>() / scored.len().max(1) as f32;
        info!(
            "Generation {}/{}: pool {}, best fitness {:.4}, mean {:.4}",
            generation + 1,
            config.generations,
            scored.len(),
            best,
            mean
        );

        for (idx, (individual, score, applied)) in
            scored.iter().take(config.display_count).enumerate()
        {
            display::summary(idx, &individual.label, *score, applied);
            display::preview(&individual.image);
        }

        // Crossover: every survivor is averaged with its right neighbour
        // (wrapping), and the offspring inherits the left parent's label.
        let survivors: Vec<Individual> = scored
            .into_iter()
            .map(|(individual, _, _)| individual)
            .collect();
        let n = survivors.len();
        let mut offspring = Vec::with_capacity(n);
        for i in 0..n {
            let child = survivors[i].image.blend(&survivors[(i + 1) % n].image)?;
            offspring.push(Individual {
                image: child,
                label: survivors[i].label.clone(),
            });
        }

        pool = survivors;
        pool.extend(offspring);
    }

    // The final pool holds survivors followed by offspring; keep the first N.
    pool.truncate(keep);
    let (out_images, out_labels): (Vec<Image>, Vec<String>) = pool
        .into_iter()
        .map(|individual| (individual.image, individual.label))
        .unzip();

    if let Some(save_dir) = &config.save_dir {
        save_all(&out_images, &out_labels, save_dir)?;
    }

    Ok((out_images, out_labels))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AugmentConfig;
    use image::{Rgb, RgbImage};

    fn test_pool(count: usize) -> (Vec<Image>, Vec<String>) {
        let images = (0..count)
            .map(|i| {
                let shade = (i * 40 % 256) as u8;
                let rgb = RgbImage::from_fn(224, 224, |x, _| {
                    Rgb([shade, (x % 256) as u8, 255 - shade])
                });
                Image::from_rgb8(&rgb)
            })
            .collect();
        let labels = (0..count).map(|i| format!("class_{}", i % 2)).collect();
        (images, labels)
    }

    fn quiet_config() -> GeneticConfig {
        GeneticConfig {
            generations: 3,
            keep: None,
            display_count: 1,
            augment: AugmentConfig::default(),
            seed: 42,
            save_dir: None,
        }
    }

    #[test]
    fn test_output_count_equals_input_count() {
        let (images, labels) = test_pool(6);
        let (out_images, out_labels) = evolve(&images, &labels, &quiet_config());

        assert_eq!(out_images.len(), images.len());
        assert_eq!(out_labels.len(), labels.len());
        assert!(out_images.iter().all(|img| img.has_standard_shape()));
    }

    #[test]
    fn test_keep_limits_output() {
        let (images, labels) = test_pool(8);
        let config = GeneticConfig {
            keep: Some(4),
            ..quiet_config()
        };
        let (out_images, _) = evolve(&images, &labels, &config);
        assert_eq!(out_images.len(), 4);
    }

    #[test]
    fn test_invalid_config_degrades_to_originals() {
        let (images, labels) = test_pool(4);
        let config = GeneticConfig {
            display_count: 99,
            ..quiet_config()
        };

        let (out_images, out_labels) = evolve(&images, &labels, &config);
        assert_eq!(out_images, images);
        assert_eq!(out_labels, labels);
    }

    #[test]
    fn test_empty_input_degrades_to_originals() {
        let (out_images, out_labels) = evolve(&[], &[], &quiet_config());
        assert!(out_images.is_empty());
        assert!(out_labels.is_empty());
    }

    #[test]
    fn test_same_seed_is_reproducible() {
        let (images, labels) = test_pool(5);
        let config = quiet_config();

        let (a, _) = evolve(&images, &labels, &config);
        let (b, _) = evolve(&images, &labels, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn test_labels_stay_parallel_to_images() {
        let (images, labels) = test_pool(6);
        let (out_images, out_labels) = evolve(&images, &labels, &quiet_config());
        assert_eq!(out_images.len(), out_labels.len());
        assert!(out_labels.iter().all(|l| l.starts_with("class_")));
    }
}
