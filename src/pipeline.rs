use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;
use image::{ImageReader, RgbImage};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use rayon::prelude::*;

use crate::annotate;
use crate::config::{PipelineConfig, has_image_extension};
use crate::detection::Detector;
use crate::error::{PipelineError, TileError};
use crate::models::{ObjectRecord, ObjectType, Tile};
use crate::report::ReportWriter;
use crate::tiling::split_image;

/// What one tile task produces
pub struct TileOutcome {
    /// Records in contour discovery order
    pub records: Vec<ObjectRecord>,
    /// The tile's pixels with all markers drawn
    pub annotated: RgbImage,
}

/// Per-tile work run by each worker
pub trait TileProcessor: Send + Sync {
    /// Detect, classify and annotate one tile. The tile is owned so its
    /// buffer can be drawn on in place.
    fn process(&self, tile: Tile) -> Result<TileOutcome>;

    /// Human-readable name for this processor (used in log output)
    fn name(&self) -> &str;
}

/// Detector + classifier + annotator
#[derive(Debug, Clone, Default)]
pub struct AstroTileProcessor {
    pub detector: Detector,
}

impl TileProcessor for AstroTileProcessor {
    fn process(&self, tile: Tile) -> Result<TileOutcome> {
        let regions = self.detector.detect(&tile.image);

        let records = regions
            .iter()
            .map(|region| ObjectRecord::from_region(&tile, region))
            .collect();

        let mut annotated = tile.image;
        annotate::annotate_tile(&mut annotated, &regions);

        Ok(TileOutcome { records, annotated })
    }

    fn name(&self) -> &str {
        "Astronomical Object Detection"
    }
}

/// Run-wide, append-only record store shared by all workers
#[derive(Debug, Default)]
pub struct ResultCollection {
    records: Mutex<Vec<ObjectRecord>>,
}

impl ResultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append all records of one tile under a single lock, so they stay
    /// contiguous and in order
    pub fn append_tile(&self, records: Vec<ObjectRecord>) {
        if records.is_empty() {
            return;
        }
        self.records.lock().extend(records);
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_records(self) -> Vec<ObjectRecord> {
        self.records.into_inner()
    }
}

/// Outcome of the Processing phase
#[derive(Debug, Default)]
pub struct ProcessingSummary {
    pub records: Vec<ObjectRecord>,
    pub tiles_total: usize,
    pub tiles_failed: usize,
    pub writes_failed: usize,
}

/// Everything a completed run produced
#[derive(Debug, Default)]
pub struct RunReport {
    pub records: Vec<ObjectRecord>,
    pub images_loaded: usize,
    pub images_skipped: usize,
    pub tiles_total: usize,
    pub tiles_failed: usize,
    pub writes_failed: usize,
    /// Where the report was written, if it was
    pub report_path: Option<PathBuf>,
}

impl RunReport {
    pub fn count_by_type(&self) -> BTreeMap<ObjectType, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.object_type).or_insert(0) += 1;
        }
        counts
    }

    fn log_summary(&self) {
        info!(
            "Run finished: {} images ({} skipped), {} tiles ({} failed, {} not written), {} objects",
            self.images_loaded,
            self.images_skipped,
            self.tiles_total,
            self.tiles_failed,
            self.writes_failed,
            self.records.len()
        );
        for (object_type, count) in self.count_by_type() {
            info!("  {}: {}", object_type, count);
        }
    }
}

/// Tiles from every loadable image, in enumeration order
struct LoadedTiles {
    tiles: Vec<Tile>,
    images_loaded: usize,
    images_skipped: usize,
}

/// Tiles a directory of images and analyzes all tiles on a worker pool
pub struct Pipeline {
    config: PipelineConfig,
    processor: Arc<dyn TileProcessor>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self {
            config,
            processor: Arc::new(AstroTileProcessor::default()),
        }
    }

    /// Replace the per-tile processor
    pub fn with_processor(mut self, processor: Arc<dyn TileProcessor>) -> Self {
        self.processor = processor;
        self
    }

    /// Loading -> Tiling -> Processing. Nothing is reported until every
    /// tile has finished.
    pub fn run(&self) -> Result<RunReport, PipelineError> {
        info!("Loading images from {}", self.config.input_dir.display());
        let image_paths = self.list_images()?;
        if image_paths.is_empty() {
            warn!(
                "No .{} images found in {}",
                crate::config::IMAGE_EXTENSION,
                self.config.input_dir.display()
            );
        }

        std::fs::create_dir_all(&self.config.output_dir).map_err(|source| {
            PipelineError::OutputDir {
                path: self.config.output_dir.clone(),
                source,
            }
        })?;

        let loaded = self.load_and_tile(&image_paths);
        let summary = self.process_tiles(loaded.tiles)?;

        Ok(RunReport {
            records: summary.records,
            images_loaded: loaded.images_loaded,
            images_skipped: loaded.images_skipped,
            tiles_total: summary.tiles_total,
            tiles_failed: summary.tiles_failed,
            writes_failed: summary.writes_failed,
            report_path: None,
        })
    }

    /// Full run followed by the Reporting phase. A report that cannot be
    /// written is logged; the records stay in the returned `RunReport`.
    pub fn run_and_report(&self, writer: &dyn ReportWriter) -> Result<RunReport, PipelineError> {
        let mut report = self.run()?;
        info!("Reporting {} records via {}", report.records.len(), writer.name());
        report.report_path = crate::report::persist_report(writer, &report.records);
        report.log_summary();
        Ok(report)
    }

    /// Image files in the input directory, sorted by name
    pub fn list_images(&self) -> Result<Vec<PathBuf>, PipelineError> {
        let input_error = |source| PipelineError::InputDir {
            path: self.config.input_dir.clone(),
            source,
        };

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(&self.config.input_dir).map_err(input_error)? {
            let path = entry.map_err(input_error)?.path();
            if path.is_file() && has_image_extension(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }

    fn load_and_tile(&self, image_paths: &[PathBuf]) -> LoadedTiles {
        let mut loaded = LoadedTiles {
            tiles: Vec::new(),
            images_loaded: 0,
            images_skipped: 0,
        };

        for path in image_paths {
            let image = match load_image(path) {
                Ok(image) => image,
                Err(e) => {
                    warn!("Skipping {}: {:#}", path.display(), e);
                    loaded.images_skipped += 1;
                    continue;
                }
            };

            let tiles = split_image(&image, self.config.tile_size, path);
            info!(
                "Tiled {} ({}x{}) into {} tiles",
                path.display(),
                image.width(),
                image.height(),
                tiles.len()
            );
            loaded.tiles.extend(tiles);
            loaded.images_loaded += 1;
        }

        loaded
    }

    /// Processing phase: fan the tiles out over a fixed-size pool and wait
    /// for all of them.
    ///
    /// The pool lives only for this call. A failing or panicking tile is
    /// logged and contributes no records; the other tiles are unaffected.
    pub fn process_tiles(&self, tiles: Vec<Tile>) -> Result<ProcessingSummary, PipelineError> {
        let workers = self.config.worker_count();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("tile-worker-{i}"))
            .build()?;

        let tiles_total = tiles.len();
        info!(
            "Processing {} tiles on {} workers with {}",
            tiles_total,
            workers,
            self.processor.name()
        );

        let results = ResultCollection::new();
        let tiles_failed = AtomicUsize::new(0);
        let writes_failed = AtomicUsize::new(0);

        pool.install(|| {
            tiles.into_par_iter().for_each(|tile| {
                let image_name = tile.source_name();
                let index = tile.index;
                let output_path = self.config.tile_output_path(&tile);

                match self.run_tile(tile) {
                    Ok(outcome) => {
                        results.append_tile(outcome.records);
                        if let Err(e) = outcome.annotated.save(&output_path) {
                            warn!(
                                "Failed to write tile {} of {} to {}: {}",
                                index,
                                image_name,
                                output_path.display(),
                                e
                            );
                            writes_failed.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                    Err(e) => {
                        error!("Tile {} of {} failed: {}", index, image_name, e);
                        tiles_failed.fetch_add(1, Ordering::Relaxed);
                    }
                }
            });
        });

        info!("All tiles done, {} objects collected", results.len());
        let records = results.into_records();

        Ok(ProcessingSummary {
            records,
            tiles_total,
            tiles_failed: tiles_failed.into_inner(),
            writes_failed: writes_failed.into_inner(),
        })
    }

    /// One tile task, with panics turned into errors
    fn run_tile(&self, tile: Tile) -> Result<TileOutcome, TileError> {
        let chunk_name = tile.chunk_name();
        debug!("working on {}", chunk_name);

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.processor.process(tile)))
            .map_err(|payload| TileError::Panicked(panic_message(payload.as_ref())))?
            .map_err(TileError::Processing)?;

        debug!("DONE working on {} ({} objects)", chunk_name, outcome.records.len());
        Ok(outcome)
    }
}

fn load_image(path: &Path) -> Result<RgbImage> {
    let img = ImageReader::open(path)?
        .decode()
        .map_err(|e| anyhow::anyhow!("Failed to decode image: {}", e))?;
    Ok(img.to_rgb8())
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
