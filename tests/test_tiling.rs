//! Integration tests for image tiling.
//!
//! Tests cover:
//! - Tile counts for exact multiples, remainders and images smaller than a tile
//! - Exact coverage without overlap
//! - Row-major, zero-based tile indices
//! - Tiles holding copies of the right source pixels

use std::num::NonZeroU32;
use std::path::Path;

use astrotiles::split_image;
use astrotiles::tiling::tile_count;
use image::{Rgb, RgbImage};

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
    })
}

fn size(n: u32) -> NonZeroU32 {
    NonZeroU32::new(n).unwrap()
}

#[test]
fn test_tile_counts_and_coverage() {
    let cases = [(1234, 1001, 500), (1000, 500, 500), (499, 20, 500), (7, 9, 3), (1, 1, 500)];

    for (width, height, t) in cases {
        let img = gradient(width, height);
        let tiles = split_image(&img, size(t), Path::new("sky.jpg"));

        let expected = (width.div_ceil(t) * height.div_ceil(t)) as usize;
        assert_eq!(tiles.len(), expected, "{width}x{height} / {t}");
        assert_eq!(tile_count(width, height, size(t)), expected);

        let pixels: u64 = tiles.iter().map(|t| t.width() as u64 * t.height() as u64).sum();
        assert_eq!(pixels, width as u64 * height as u64);

        let mut covered = vec![0u8; (width * height) as usize];
        for tile in &tiles {
            let (ox, oy) = tile.origin;
            for y in oy..oy + tile.height() {
                for x in ox..ox + tile.width() {
                    covered[(y * width + x) as usize] += 1;
                }
            }
        }
        assert!(covered.iter().all(|&c| c == 1), "gap or overlap in {width}x{height}");
    }
}

#[test]
fn test_indices_are_row_major() {
    let img = gradient(1234, 1001);
    let tiles = split_image(&img, size(500), Path::new("sky.jpg"));

    let indices: Vec<usize> = tiles.iter().map(|t| t.index).collect();
    assert_eq!(indices, (0..9).collect::<Vec<_>>());

    let origins: Vec<(u32, u32)> = tiles.iter().map(|t| t.origin).collect();
    assert_eq!(
        origins,
        vec![
            (0, 0),
            (500, 0),
            (1000, 0),
            (0, 500),
            (500, 500),
            (1000, 500),
            (0, 1000),
            (500, 1000),
            (1000, 1000),
        ]
    );

    // Edge tiles are clipped, not padded
    assert_eq!(tiles[2].image.dimensions(), (234, 500));
    assert_eq!(tiles[6].image.dimensions(), (500, 1));
    assert_eq!(tiles[8].image.dimensions(), (234, 1));
}

#[test]
fn test_tiles_copy_source_pixels() {
    let img = gradient(730, 610);
    let tiles = split_image(&img, size(300), Path::new("data/m31.jpg"));

    for tile in &tiles {
        assert_eq!(tile.source_name(), "m31.jpg");
        let (ox, oy) = tile.origin;
        for (x, y, p) in tile.image.enumerate_pixels() {
            assert_eq!(p, img.get_pixel(ox + x, oy + y));
        }
    }
}
