//! EvoAug CLI
//!
//! Command-line entry point for the genetic image augmentation pipeline.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use evoaug::config::{AugmentConfig, GeneticConfig, SplitConfig, SplitRatios};
use evoaug::dataset::{check_balance, class_counts, DatasetSplits, ImageDataset};
use evoaug::genetic::evolve;
use evoaug::utils::logging::{init_logging, LogConfig};

/// Genetic image augmentation for class-per-directory datasets
#[derive(Parser, Debug)]
#[command(name = "evoaug")]
#[command(version)]
#[command(about = "Genetic image augmentation", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the generational augmentation loop over a dataset
    Augment {
        /// Path to the dataset directory (one subdirectory per class)
        #[arg(short, long)]
        data_dir: PathBuf,

        /// Number of generations to run
        #[arg(short, long, default_value = "5")]
        generations: usize,

        /// Number of images to keep per selection step (default: input count)
        #[arg(short, long)]
        keep: Option<usize>,

        /// How many surviving images to preview per generation (1-10)
        #[arg(long, default_value = "3")]
        display_count: usize,

        /// Probability that each augmentation operation fires
        #[arg(long, default_value = "0.5")]
        prob: f64,

        /// Random seed for reproducibility
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Directory to write the augmented images to, per class
        #[arg(short, long)]
        save_dir: Option<PathBuf>,
    },

    /// Split a dataset into train/validation/test/hyper subsets
    Split {
        /// Path to the dataset directory
        #[arg(short, long)]
        data_dir: PathBuf,

        /// Training data ratio
        #[arg(long, default_value = "0.70")]
        train: f64,

        /// Validation data ratio
        #[arg(long, default_value = "0.15")]
        validation: f64,

        /// Test data ratio
        #[arg(long, default_value = "0.10")]
        test: f64,

        /// Hyperparameter-tuning data ratio
        #[arg(long, default_value = "0.05")]
        hyper: f64,

        /// Random seed for reproducibility
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Optional path to write the split statistics as JSON
        #[arg(short, long)]
        manifest: Option<PathBuf>,
    },

    /// Print dataset statistics and the class balance check
    Stats {
        /// Path to the dataset directory
        #[arg(short, long)]
        data_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_config = if cli.verbose {
        LogConfig::verbose()
    } else {
        LogConfig::default()
    };
    init_logging(&log_config).map_err(anyhow::Error::msg)?;

    match cli.command {
        Commands::Augment {
            data_dir,
            generations,
            keep,
            display_count,
            prob,
            seed,
            save_dir,
        } => cmd_augment(
            data_dir,
            GeneticConfig {
                generations,
                keep,
                display_count,
                augment: AugmentConfig {
                    prob,
                    ..AugmentConfig::default()
                },
                seed,
                save_dir,
            },
        ),
        Commands::Split {
            data_dir,
            train,
            validation,
            test,
            hyper,
            seed,
            manifest,
        } => cmd_split(
            data_dir,
            SplitConfig {
                ratios: SplitRatios {
                    train,
                    validation,
                    test,
                    hyper,
                },
                seed,
            },
            manifest,
        ),
        Commands::Stats { data_dir } => cmd_stats(data_dir),
    }
}

fn cmd_augment(data_dir: PathBuf, config: GeneticConfig) -> Result<()> {
    config.validate()?;

    println!("{}", "EvoAug — genetic augmentation".bold().green());
    let dataset = ImageDataset::new(&data_dir)?;
    dataset.stats().print();

    let (images, labels) = dataset.load_all()?;
    info!(
        "Running {} generations over {} images",
        config.generations,
        images.len()
    );

    let (augmented, _) = evolve(&images, &labels, &config);
    println!(
        "\n{} {} augmented images",
        "Done:".bold().green(),
        augmented.len()
    );

    if let Some(save_dir) = &config.save_dir {
        println!("Saved to {}", save_dir.to_string_lossy().cyan());
    }
    Ok(())
}

fn cmd_split(data_dir: PathBuf, config: SplitConfig, manifest: Option<PathBuf>) -> Result<()> {
    config.ratios.validate()?;

    let dataset = ImageDataset::new(&data_dir)?;
    let (images, labels) = dataset.load_all()?;

    let splits = DatasetSplits::stratified(images, labels, &config)?;
    let stats = splits.stats();
    println!("{}", stats);

    if let Some(path) = manifest {
        std::fs::write(&path, serde_json::to_string_pretty(&stats)?)?;
        println!("Manifest written to {}", path.to_string_lossy().cyan());
    }
    Ok(())
}

fn cmd_stats(data_dir: PathBuf) -> Result<()> {
    let dataset = ImageDataset::new(&data_dir)?;
    dataset.stats().print();

    let labels: Vec<String> = dataset
        .samples
        .iter()
        .map(|s| s.class_name.clone())
        .collect();
    let counts = class_counts(&labels);

    if check_balance(&counts) {
        println!("\nClass balance: {}", "ok".bold().green());
    } else {
        println!(
            "\nClass balance: {} (largest class exceeds 1.1x the smallest)",
            "skewed".bold().yellow()
        );
    }
    Ok(())
}
