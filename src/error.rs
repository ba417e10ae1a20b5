use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a run before any tile is dispatched
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Cannot read input directory {path}: {source}")]
    InputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

/// Failures confined to a single tile task
#[derive(Error, Debug)]
pub enum TileError {
    #[error("processing failed: {0:#}")]
    Processing(anyhow::Error),
    #[error("processing panicked: {0}")]
    Panicked(String),
}
