// Hand-off from a filled grid to image buffers and PNG bytes.
// The grid is only read here.

use std::io::Write;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, GrayImage, ImageEncoder, ImageFormat, ImageResult, Luma};

use crate::grid::{Grid, Height};

// One gray pixel per sample
pub fn to_gray_image(grid: &Grid) -> GrayImage {
    let size = grid.size();
    let samples = grid.samples();
    GrayImage::from_fn(grid.width(), grid.height(), |x, y| {
        Luma([samples[y as usize * size + x as usize]])
    })
}

// Convert a flat sample buffer into an RGB byte buffer with R = G = B
pub fn to_rgb_buffer(samples: &[Height]) -> Vec<u8> {
    let mut buf = Vec::with_capacity(samples.len() * 3);
    for &h in samples {
        buf.extend_from_slice(&[h, h, h]);
    }
    buf
}

// Encode as 8 bit grayscale PNG into any writer (file, stdout, Vec)
pub fn write_png<W: Write>(grid: &Grid, writer: W) -> ImageResult<()> {
    PngEncoder::new(writer).write_image(
        grid.samples(),
        grid.width(),
        grid.height(),
        ExtendedColorType::L8,
    )
}

pub fn save_png(grid: &Grid, path: impl AsRef<Path>) -> ImageResult<()> {
    to_gray_image(grid).save_with_format(path, ImageFormat::Png)
}
