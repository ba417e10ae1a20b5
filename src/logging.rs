use std::path::Path;

use flexi_logger::{Duplicate, FileSpec, Logger, LoggerHandle};

/// Start the global logger. `RUST_LOG` overrides `base_level`.
///
/// Logs go to stderr, or to rotating files in `log_dir` with warnings
/// duplicated to stderr. Keep the returned handle alive for the whole run.
pub fn setup_logging(base_level: &str, log_dir: Option<&Path>) -> anyhow::Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str(base_level)?;

    let logger = match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir).basename("astrotiles"))
            .duplicate_to_stderr(Duplicate::Warn)
            .rotate(
                flexi_logger::Criterion::Size(1024 * 1024), //1MB
                flexi_logger::Naming::Timestamps,
                flexi_logger::Cleanup::KeepLogFiles(5),
            ),
        None => logger.log_to_stderr(),
    };

    Ok(logger.start()?)
}
