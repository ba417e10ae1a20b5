pub mod annotate;
pub mod config;
pub mod detection;
pub mod error;
pub mod logging;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod tiling;

pub use config::{OutputNaming, PipelineConfig};
pub use detection::Detector;
pub use error::{PipelineError, TileError};
pub use models::{DetectedRegion, EnclosingCircle, ObjectRecord, ObjectType, Tile};
pub use pipeline::{
    AstroTileProcessor, Pipeline, ResultCollection, RunReport, TileOutcome, TileProcessor,
};
pub use report::{CsvReport, JsonReport, ReportFormat, ReportWriter};
pub use tiling::split_image;
