use std::num::NonZeroU32;
use std::path::Path;

use image::RgbImage;

use crate::models::Tile;

/// Split an image into non-overlapping tiles of at most `tile_size` pixels
/// per edge.
///
/// Tiles are produced row by row, left to right, and numbered in that order.
/// Tiles on the right and bottom edges are clipped to the image instead of
/// padded, so they may be smaller than interior tiles.
pub fn split_image(image: &RgbImage, tile_size: NonZeroU32, source: &Path) -> Vec<Tile> {
    let (width, height) = image.dimensions();
    let step = tile_size.get();
    let mut tiles = Vec::new();

    for offset_y in (0..height).step_by(step as usize) {
        for offset_x in (0..width).step_by(step as usize) {
            let tile_width = step.min(width - offset_x);
            let tile_height = step.min(height - offset_y);

            let part = image::imageops::crop_imm(image, offset_x, offset_y, tile_width, tile_height)
                .to_image();

            tiles.push(Tile {
                image: part,
                index: tiles.len(),
                source: source.to_path_buf(),
                origin: (offset_x, offset_y),
            });
        }
    }

    tiles
}

/// Number of tiles `split_image` produces for an image of this size
pub fn tile_count(width: u32, height: u32, tile_size: NonZeroU32) -> usize {
    let columns = width.div_ceil(tile_size.get());
    let rows = height.div_ceil(tile_size.get());
    (columns as usize) * (rows as usize)
}
