use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use crate::models::Tile;

/// Edge length of a square tile, in pixels
pub const TILE_SIZE: NonZeroU32 = NonZeroU32::new(500).unwrap();

/// Only files with this extension are picked up from the input directory
pub const IMAGE_EXTENSION: &str = "jpg";

/// How annotated tiles are named in the output directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputNaming {
    /// `<source stem>_<tile index>.jpg`
    #[default]
    SourceAndTile,
    /// `<tile index>.jpg`. Tiles with the same index from different
    /// source images overwrite each other.
    TileIndex,
}

/// Everything a run needs, passed in explicitly by the caller
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub tile_size: NonZeroU32,
    /// Worker thread count; `None` means one per available CPU
    pub workers: Option<usize>,
    pub output_naming: OutputNaming,
}

impl PipelineConfig {
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            tile_size: TILE_SIZE,
            workers: None,
            output_naming: OutputNaming::default(),
        }
    }

    pub fn with_tile_size(mut self, tile_size: NonZeroU32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers.max(1));
        self
    }

    pub fn with_output_naming(mut self, naming: OutputNaming) -> Self {
        self.output_naming = naming;
        self
    }

    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
        })
    }

    /// Where the annotated copy of `tile` is written
    pub fn tile_output_path(&self, tile: &Tile) -> PathBuf {
        let name = match self.output_naming {
            OutputNaming::SourceAndTile => {
                format!("{}_{}.{}", tile.source_stem(), tile.index, IMAGE_EXTENSION)
            }
            OutputNaming::TileIndex => format!("{}.{}", tile.index, IMAGE_EXTENSION),
        };
        self.output_dir.join(name)
    }
}

/// Whether `path` carries the input image extension (case-insensitive)
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(IMAGE_EXTENSION))
}
