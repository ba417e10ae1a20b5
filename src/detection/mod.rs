pub mod circles;
pub mod classify;
pub mod contours;
pub mod preprocessing;

use image::{GrayImage, RgbImage};
use log::debug;

use crate::models::DetectedRegion;
use contours::RegionContour;

/// Luminance at or above this value is foreground
pub const BINARY_THRESHOLD: u8 = 100;

/// Contours enclosing less area than this are ignored
pub const MIN_REGION_AREA: f64 = 2.0;

/// Fixed-order bright-object detector
///
/// grayscale -> 5x5 blur -> binary threshold -> external contours ->
/// area filter -> per-region measurement and classification.
#[derive(Debug, Clone)]
pub struct Detector {
    pub threshold: u8,
    pub min_area: f64,
}

impl Detector {
    pub fn new() -> Self {
        Self {
            threshold: BINARY_THRESHOLD,
            min_area: MIN_REGION_AREA,
        }
    }

    /// Run the full detection on a tile's pixels. Brightness is measured
    /// on the unsmoothed luminance.
    pub fn detect(&self, img: &RgbImage) -> Vec<DetectedRegion> {
        let luminance = preprocessing::to_grayscale(img);
        let blurred = preprocessing::apply_blur(&luminance);
        let binary = preprocessing::binarize(&blurred, self.threshold);

        let found = self.contours_from_binary(&binary);
        debug!("Found {} regions with area >= {}", found.len(), self.min_area);

        found
            .into_iter()
            .map(|c| classify::measure_region(c, &luminance))
            .collect()
    }

    /// Retained contours of an already-binarized image
    pub fn contours_from_binary(&self, binary: &GrayImage) -> Vec<RegionContour> {
        contours::find_external_contours(binary, self.min_area)
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}
