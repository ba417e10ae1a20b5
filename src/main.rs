use std::path::PathBuf;

use clap::Parser;
use log::info;

use astrotiles::logging::setup_logging;
use astrotiles::{OutputNaming, Pipeline, PipelineConfig, ReportFormat};

#[derive(Parser)]
#[command(name = "astrotiles")]
#[command(about = "Detect and classify bright objects in tiled astronomical images")]
struct Cli {
    /// Directory containing the .jpg images to analyze
    #[arg(value_name = "INPUT_DIR")]
    input_dir: PathBuf,

    /// Directory for annotated tiles and the report
    #[arg(value_name = "OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Number of worker threads (default: one per CPU)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Name annotated tiles by tile index only; tiles from different
    /// images with the same index overwrite each other
    #[arg(long)]
    legacy_tile_names: bool,

    /// Report file format
    #[arg(long, value_enum, default_value_t = ReportFormat::Csv)]
    format: ReportFormat,

    /// Log level (overridden by RUST_LOG)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Write logs to rotating files in this directory
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let _logger = setup_logging(&args.log_level, args.log_dir.as_deref())?;

    let naming = if args.legacy_tile_names {
        OutputNaming::TileIndex
    } else {
        OutputNaming::SourceAndTile
    };

    let mut config = PipelineConfig::new(&args.input_dir, &args.output_dir)
        .with_output_naming(naming);
    if let Some(workers) = args.workers {
        config = config.with_workers(workers);
    }

    let writer = args.format.writer(&config.output_dir);
    let pipeline = Pipeline::new(config);
    let report = pipeline.run_and_report(writer.as_ref())?;

    if report.report_path.is_none() {
        info!(
            "{} records were analyzed but not saved; re-run to retry the report",
            report.records.len()
        );
    }

    Ok(())
}
