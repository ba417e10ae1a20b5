use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;
use imageproc::point::Point;

use super::circles::min_enclosing_circle;
use super::contours::{Moments, RegionContour};
use crate::models::{DetectedRegion, ObjectType};

/// Regions larger than this are galaxies regardless of brightness
pub const GALAXY_MIN_AREA: f64 = 300.0;

/// Regions dimmer than this (and not galaxies) are planets
pub const PLANET_MAX_BRIGHTNESS: f64 = 155.0;

/// First matching rule wins: area, then brightness
pub fn classify(area: f64, mean_brightness: f64) -> ObjectType {
    if area > GALAXY_MIN_AREA {
        ObjectType::Galaxy
    } else if mean_brightness < PLANET_MAX_BRIGHTNESS {
        ObjectType::Planet
    } else {
        ObjectType::Star
    }
}

/// Rasterize a contour into a filled mask the size of `width` x `height`.
/// Boundary pixels are always part of the mask.
pub fn region_mask(points: &[Point<i32>], width: u32, height: u32) -> GrayImage {
    let mut mask = GrayImage::new(width, height);
    let on = Luma([255u8]);

    // draw_polygon_mut rejects polygons whose first and last points coincide
    if points.len() >= 3 && points.first() != points.last() {
        draw_polygon_mut(&mut mask, points, on);
    }
    for p in points {
        if p.x >= 0 && p.y >= 0 && (p.x as u32) < width && (p.y as u32) < height {
            mask.put_pixel(p.x as u32, p.y as u32, on);
        }
    }

    mask
}

/// Mean of `gray` over the non-zero pixels of `mask`; 0 for an empty mask
pub fn masked_mean(gray: &GrayImage, mask: &GrayImage) -> f64 {
    let mut sum: u64 = 0;
    let mut count: u64 = 0;

    for (value, m) in gray.pixels().zip(mask.pixels()) {
        if m[0] != 0 {
            sum += value[0] as u64;
            count += 1;
        }
    }

    if count > 0 {
        sum as f64 / count as f64
    } else {
        0.0
    }
}

/// Measure and classify one retained contour against its tile's luminance
pub fn measure_region(contour: RegionContour, gray: &GrayImage) -> DetectedRegion {
    let mask = region_mask(&contour.points, gray.width(), gray.height());
    let mean_brightness = masked_mean(gray, &mask);
    let circle = min_enclosing_circle(&contour.points);
    let centroid = Moments::of_polygon(&contour.points).centroid();
    let object_type = classify(contour.area, mean_brightness);

    DetectedRegion {
        contour: contour.points,
        area: contour.area,
        mean_brightness,
        circle,
        centroid,
        object_type,
    }
}
