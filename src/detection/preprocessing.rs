use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::map::map_colors;

/// 5-tap binomial approximation of a Gaussian (sigma ~1.1)
const GAUSSIAN_5: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// BT.601 luma, rounded to nearest
pub fn luma(p: Rgb<u8>) -> u8 {
    let [r, g, b] = p.0;
    let y = (299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000;
    y as u8
}

/// Convert image to single-channel luminance (BT.601 weights)
pub fn to_grayscale(img: &RgbImage) -> GrayImage {
    map_colors(img, |p| Luma([luma(p)]))
}

/// Mirror an out-of-range index back into `0..len` without repeating the
/// edge sample (`dcb|abcd|cba`)
fn reflect_101(i: i64, len: i64) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let mut i = i.rem_euclid(period);
    if i >= len {
        i = period - i;
    }
    i as usize
}

/// Apply a 5x5 Gaussian blur to suppress pixel-level noise.
///
/// Both passes run in `f32`; the result is rounded once. Borders mirror
/// without repeating the edge pixel.
pub fn apply_blur(img: &GrayImage) -> GrayImage {
    let (width, height) = img.dimensions();
    let (w, h) = (width as i64, height as i64);
    let radius = (GAUSSIAN_5.len() / 2) as i64;

    let mut horizontal = vec![0f32; (width * height) as usize];
    for y in 0..height {
        for x in 0..w {
            let mut acc = 0.0;
            for (k, weight) in GAUSSIAN_5.iter().enumerate() {
                let sx = reflect_101(x + k as i64 - radius, w);
                acc += weight * img.get_pixel(sx as u32, y)[0] as f32;
            }
            horizontal[(y as usize) * width as usize + x as usize] = acc;
        }
    }

    GrayImage::from_fn(width, height, |x, y| {
        let mut acc = 0.0;
        for (k, weight) in GAUSSIAN_5.iter().enumerate() {
            let sy = reflect_101(y as i64 + k as i64 - radius, h);
            acc += weight * horizontal[sy * width as usize + x as usize];
        }
        Luma([acc.round().clamp(0.0, 255.0) as u8])
    })
}

/// Fixed binary threshold: pixels at or above `threshold` become 255,
/// everything else 0
pub fn binarize(img: &GrayImage, threshold: u8) -> GrayImage {
    let mut binary = img.clone();
    for p in binary.pixels_mut() {
        if p.0[0] >= threshold {
            *p = Luma([255]);
        } else {
            *p = Luma([0]);
        }
    }
    binary
}
