//! Logging bootstrap.
//!
//! # Invariants
//! - Initialization happens at most once per process; later calls with the
//!   same spec are no-ops and calls with a different spec are rejected.
//! - Initialization never panics.

use std::path::{Path, PathBuf};

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use thiserror::Error;

const LOG_FILE_BASENAME: &str = "timeline";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

static LOGGING_STATE: OnceCell<LoggingState> = OnceCell::new();

struct LoggingState {
    spec: String,
    log_dir: Option<PathBuf>,
    _logger: LoggerHandle,
}

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log spec '{spec}': {reason}")]
    InvalidSpec { spec: String, reason: String },
    #[error("failed to create log directory '{path}': {source}")]
    LogDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start logger: {0}")]
    Start(String),
    #[error("logging already initialized with '{0}'")]
    AlreadyInitialized(String),
}

/// Start logging to stderr and, when `log_dir` is given, to rotating files.
///
/// `spec` is a flexi_logger spec such as `info` or
/// `warn,rust_timeline_editor=debug`; `RUST_LOG` overrides it when set.
pub fn init_logging(spec: &str, log_dir: Option<&Path>) -> Result<(), LoggingError> {
    let spec = spec.trim();
    let spec = if spec.is_empty() { "info" } else { spec };

    if let Some(state) = LOGGING_STATE.get() {
        if state.spec == spec && state.log_dir.as_deref() == log_dir {
            return Ok(());
        }
        return Err(LoggingError::AlreadyInitialized(state.spec.clone()));
    }

    LOGGING_STATE
        .get_or_try_init(|| -> Result<LoggingState, LoggingError> {
            let logger = Logger::try_with_env_or_str(spec).map_err(|err| LoggingError::InvalidSpec {
                spec: spec.to_string(),
                reason: err.to_string(),
            })?;

            let logger = match log_dir {
                Some(dir) => {
                    std::fs::create_dir_all(dir).map_err(|source| LoggingError::LogDir {
                        path: dir.to_path_buf(),
                        source,
                    })?;
                    logger
                        .log_to_file(FileSpec::default().directory(dir).basename(LOG_FILE_BASENAME))
                        .rotate(
                            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
                            Naming::Numbers,
                            Cleanup::KeepLogFiles(MAX_LOG_FILES),
                        )
                        .write_mode(WriteMode::BufferAndFlush)
                        .append()
                        .format_for_files(flexi_logger::detailed_format)
                        .duplicate_to_stderr(Duplicate::Warn)
                }
                None => logger.log_to_stderr(),
            };

            let handle = logger
                .start()
                .map_err(|err| LoggingError::Start(err.to_string()))?;

            info!(
                "event=app_start module=logging status=ok platform={} version={} log_dir={}",
                std::env::consts::OS,
                env!("CARGO_PKG_VERSION"),
                log_dir.map(|d| d.display().to_string()).unwrap_or_else(|| "-".into())
            );

            Ok(LoggingState {
                spec: spec.to_string(),
                log_dir: log_dir.map(Path::to_path_buf),
                _logger: handle,
            })
        })
        .map(|_| ())
}
