use std::fmt;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};
use imageproc::point::Point;
use serde::Serialize;

/// A rectangular piece of a source image, the unit of parallel work.
///
/// The pixel buffer is an owned copy so a worker can draw on it without
/// touching any other tile.
#[derive(Debug, Clone)]
pub struct Tile {
    pub image: RgbImage,
    /// Row-major sequence number within the source image, starting at 0
    pub index: usize,
    pub source: PathBuf,
    /// Top-left corner of the tile in the source image
    pub origin: (u32, u32),
}

impl Tile {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// File name of the source image, e.g. `m31.jpg`
    pub fn source_name(&self) -> String {
        file_name(&self.source)
    }

    /// Source file name without extension, e.g. `m31`
    pub fn source_stem(&self) -> String {
        self.source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Human-readable name used in progress messages
    pub fn chunk_name(&self) -> String {
        format!("{}_chunk_{}", self.source_stem(), self.index)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnclosingCircle {
    pub center_x: f64,
    pub center_y: f64,
    pub radius: f64,
}

impl EnclosingCircle {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.center_x;
        let dy = y - self.center_y;
        // Relative slack so points on the rim count as inside
        (dx * dx + dy * dy).sqrt() <= self.radius * (1.0 + 1e-9) + 1e-9
    }
}

/// Object category assigned by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ObjectType {
    Galaxy,
    Planet,
    Star,
}

impl ObjectType {
    pub fn label(&self) -> &'static str {
        match self {
            ObjectType::Galaxy => "Galaxy",
            ObjectType::Planet => "Planet",
            ObjectType::Star => "Star",
        }
    }

    /// Outline and label color used by the annotator
    pub fn color(&self) -> Rgb<u8> {
        match self {
            ObjectType::Galaxy => Rgb([0, 0, 255]),
            ObjectType::Planet => Rgb([0, 255, 0]),
            ObjectType::Star => Rgb([255, 0, 0]),
        }
    }
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A connected bright component found in one tile, with its measurements
#[derive(Debug, Clone)]
pub struct DetectedRegion {
    /// Outer boundary, in tile pixel coordinates
    pub contour: Vec<Point<i32>>,
    pub area: f64,
    /// Mean luminance over the filled contour
    pub mean_brightness: f64,
    pub circle: EnclosingCircle,
    /// Polygon moment center; `None` when the zeroth moment is zero
    pub centroid: Option<(f64, f64)>,
    pub object_type: ObjectType,
}

/// One classified object, as handed to the report writer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectRecord {
    #[serde(rename = "image")]
    pub image_name: String,
    pub tile_index: usize,
    pub x: f64,
    pub y: f64,
    pub brightness: f64,
    pub object_type: ObjectType,
    pub area: f64,
    pub radius: f64,
}

impl ObjectRecord {
    pub fn from_region(tile: &Tile, region: &DetectedRegion) -> Self {
        Self {
            image_name: tile.source_name(),
            tile_index: tile.index,
            x: region.circle.center_x,
            y: region.circle.center_y,
            brightness: region.mean_brightness,
            object_type: region.object_type,
            area: region.area,
            radius: region.circle.radius,
        }
    }
}
