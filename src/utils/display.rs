//! Terminal display helpers for visual inspection of images.
//!
//! Renders a heavily downscaled ANSI preview so a human can eyeball what a
//! generation's survivors look like without leaving the terminal.

use colored::Colorize;

use crate::types::Image;

/// Character-grid width of the preview
const PREVIEW_COLS: u32 = 32;
/// Character-grid height of the preview (terminal cells are ~2:1)
const PREVIEW_ROWS: u32 = 16;

/// Render a small ANSI-color preview of an image to stdout.
///
/// Each character cell shows the pixel nearest its position in the
/// downscaled grid as a truecolor background.
pub fn preview(image: &Image) {
    let rgb = image.to_rgb8();
    let (width, height) = rgb.dimensions();

    for row in 0..PREVIEW_ROWS {
        let mut line = String::new();
        for col in 0..PREVIEW_COLS {
            let x = col * width / PREVIEW_COLS;
            let y = row * height / PREVIEW_ROWS;
            let pixel = rgb.get_pixel(x.min(width - 1), y.min(height - 1));
            line.push_str(&format!(
                "{}",
                "  ".on_truecolor(pixel[0], pixel[1], pixel[2])
            ));
        }
        println!("{}", line);
    }
}

/// Print a one-line summary for a surviving image.
pub fn summary(index: usize, label: &str, score: f32, applied: &[&str]) {
    let ops = if applied.is_empty() {
        "none".to_string()
    } else {
        applied.join("+")
    };
    let tag = format!("[{}]", index);
    println!(
        "  {} {} (fitness {:.4}, ops: {})",
        tag.as_str().bold(),
        label.green(),
        score,
        ops.as_str().cyan()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_does_not_panic_on_standard_image() {
        preview(&Image::zeros());
    }

    #[test]
    fn test_preview_does_not_panic_on_tiny_image() {
        let rgb = image::RgbImage::new(2, 2);
        preview(&Image::from_rgb8(&rgb));
    }
}
