use std::path::{Path, PathBuf};

use astrotiles::{ObjectRecord, Tile};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;

/// A filled disc: center, radius and gray level
#[derive(Debug, Clone, Copy)]
pub struct Disc {
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub level: u8,
}

pub const fn disc(x: i32, y: i32, radius: i32, level: u8) -> Disc {
    Disc {
        x,
        y,
        radius,
        level,
    }
}

/// Uniform gray background with the given discs painted on top, in order
pub fn disc_image(width: u32, height: u32, background: u8, discs: &[Disc]) -> RgbImage {
    let mut img = RgbImage::from_pixel(width, height, Rgb([background; 3]));
    for d in discs {
        draw_filled_circle_mut(&mut img, (d.x, d.y), d.radius, Rgb([d.level; 3]));
    }
    img
}

/// Black background with colored discs given as `(x, y, radius, color)`
pub fn color_disc_image(width: u32, height: u32, discs: &[(i32, i32, i32, Rgb<u8>)]) -> RgbImage {
    let mut img = RgbImage::new(width, height);
    for &(x, y, radius, color) in discs {
        draw_filled_circle_mut(&mut img, (x, y), radius, color);
    }
    img
}

pub fn make_tile(image: RgbImage, index: usize, source: &str) -> Tile {
    Tile {
        image,
        index,
        source: PathBuf::from(source),
        origin: (0, 0),
    }
}

/// Save `img` as a JPEG named `name` inside `dir`
pub fn write_jpeg(dir: &Path, name: &str, img: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    img.save_with_format(&path, image::ImageFormat::Jpeg)
        .expect("Failed to save test image");
    path
}

/// Records in a run-independent order
pub fn sorted(mut records: Vec<ObjectRecord>) -> Vec<ObjectRecord> {
    records.sort_by(|a, b| {
        a.image_name
            .cmp(&b.image_name)
            .then(a.tile_index.cmp(&b.tile_index))
            .then(a.x.total_cmp(&b.x))
            .then(a.y.total_cmp(&b.y))
    });
    records
}

/// Number of regular files in `dir` with the given extension
pub fn count_files(dir: &Path, extension: &str) -> usize {
    std::fs::read_dir(dir)
        .expect("Failed to list directory")
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|ext| ext == extension))
        .count()
}
