use simplelog::{
    ColorChoice, CombinedLogger, ConfigBuilder, LevelFilter, SharedLogger, TermLogger,
    TerminalMode, WriteLogger,
};
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const MAX_LOG_SIZE: u64 = 1024 * 1024;

/// Append-only log file that is reopened if it disappears while running.
struct ResilientFileWriter {
    path: PathBuf,
    file: Mutex<Option<File>>,
}

impl ResilientFileWriter {
    fn new(path: PathBuf) -> io::Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            path,
            file: Mutex::new(Some(file)),
        })
    }

    fn ensure_file(&self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if !self.path.exists() {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.path)?;
            *guard = Some(file);
        }

        Ok(())
    }
}

impl Write for ResilientFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.ensure_file()?;
        let mut guard = self
            .file
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        match guard.as_mut() {
            Some(file) => file.write(buf),
            None => Err(io::Error::other("log file not available")),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        guard.as_mut().map_or(Ok(()), File::flush)
    }
}

/// Keep the newer half of the log, cut at a line boundary.
fn trim_log_file_if_oversized(log_path: &Path, max_log_size: u64) {
    if let Ok(metadata) = std::fs::metadata(log_path)
        && metadata.len() > max_log_size
        && let Ok(contents) = std::fs::read(log_path)
    {
        let half = contents.len() / 2;
        let keep_from = contents[half..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(half, |pos| half + pos + 1);
        let _ = std::fs::write(log_path, &contents[keep_from..]);
    }
}

/// Install the global logger.
///
/// Nothing is recorded unless `verbose` is set. When it is, records go to
/// stderr and, if the managed root is known, to `log_path`.
pub fn init_logging(verbose: bool, log_path: Option<PathBuf>) {
    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .add_filter_allow_str("lenv")
        .build();

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();

    if verbose {
        loggers.push(TermLogger::new(
            LevelFilter::Debug,
            config.clone(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ));

        if let Some(path) = log_path.as_deref() {
            trim_log_file_if_oversized(path, MAX_LOG_SIZE);
            match ResilientFileWriter::new(path.to_path_buf()) {
                Ok(writer) => loggers.push(WriteLogger::new(LevelFilter::Debug, config, writer)),
                Err(e) => eprintln!("Cannot open log file {}: {e}", path.display()),
            }
        }
    }

    let _ = CombinedLogger::init(loggers);
    set_logging_enabled(verbose);

    if verbose && let Some(path) = log_path {
        log::debug!("Debug logging enabled, log file: {}", path.display());
    }
}

pub fn set_logging_enabled(enabled: bool) {
    if enabled {
        log::set_max_level(log::LevelFilter::Debug);
    } else {
        log::set_max_level(log::LevelFilter::Off);
    }
}
