//! Rolling File Logger
//!
//! Installs a `tracing` subscriber that appends formatted events to
//! `{app_name}.log`, rotates the file to `{app_name}.log.1` once it grows past
//! a size cap, and keeps the most recent lines in a circular buffer so the
//! shell can show them without touching the disk.
//!
//! `log` records are bridged into the same sink.

use std::collections::VecDeque;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock};

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Default size cap before the log file is rotated (1 MiB)
pub const DEFAULT_MAX_FILE_BYTES: u64 = 1024 * 1024;
/// Default number of lines kept in memory
pub const DEFAULT_RING_CAPACITY: usize = 500;

static SINK: OnceLock<Arc<RollingSink>> = OnceLock::new();

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    #[error("failed to prepare log file: {0}")]
    Io(#[from] io::Error),
    #[error("logger already initialized")]
    AlreadyInitialized,
    #[error("logger not initialized")]
    NotInitialized,
}

/// Logger settings
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub max_file_bytes: u64,
    pub ring_capacity: usize,
    pub level: LevelFilter,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
            ring_capacity: DEFAULT_RING_CAPACITY,
            level: LevelFilter::INFO,
        }
    }
}

/// Initialize the global logger with default settings.
///
/// Returns the path of the active log file.
pub fn init_logger(log_dir: impl AsRef<Path>, app_name: &str) -> Result<PathBuf, LoggerError> {
    init_with(log_dir, app_name, LoggerConfig::default())
}

/// Initialize the global logger with explicit settings.
pub fn init_with(
    log_dir: impl AsRef<Path>,
    app_name: &str,
    config: LoggerConfig,
) -> Result<PathBuf, LoggerError> {
    if SINK.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let sink = Arc::new(RollingSink::open(
        log_dir.as_ref(),
        app_name,
        config.max_file_bytes,
        config.ring_capacity,
    )?);
    let path = sink.path.clone();

    let layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_timer(ChronoLocal)
        .with_writer(RollingMakeWriter(sink.clone()));

    tracing_subscriber::registry()
        .with(config.level)
        .with(layer)
        .try_init()
        .map_err(|_| LoggerError::AlreadyInitialized)?;

    SINK.set(sink).map_err(|_| LoggerError::AlreadyInitialized)?;
    Ok(path)
}

pub fn info(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::info!("{}", msg);
    Ok(())
}

pub fn warn(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::warn!("{}", msg);
    Ok(())
}

pub fn error(msg: &str) -> Result<(), LoggerError> {
    ensure_initialized()?;
    log::error!("{}", msg);
    Ok(())
}

/// Most recent log lines, oldest first. Empty before initialization.
pub fn recent_lines() -> Vec<String> {
    SINK.get().map(|sink| sink.recent_lines()).unwrap_or_default()
}

fn ensure_initialized() -> Result<(), LoggerError> {
    SINK.get().map(|_| ()).ok_or(LoggerError::NotInitialized)
}

/// Local wall-clock timestamps
struct ChronoLocal;

impl FormatTime for ChronoLocal {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))
    }
}

struct SinkState {
    file: File,
    written: u64,
    ring: VecDeque<String>,
    partial: String,
}

/// File + ring buffer shared by every writer handed to the fmt layer
struct RollingSink {
    path: PathBuf,
    rotated: PathBuf,
    max_bytes: u64,
    capacity: usize,
    state: Mutex<SinkState>,
}

impl RollingSink {
    fn open(dir: &Path, app_name: &str, max_bytes: u64, capacity: usize) -> Result<Self, LoggerError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.log", app_name));
        let rotated = dir.join(format!("{}.log.1", app_name));
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path,
            rotated,
            max_bytes,
            capacity,
            state: Mutex::new(SinkState {
                file,
                written,
                ring: VecDeque::with_capacity(capacity),
                partial: String::new(),
            }),
        })
    }

    fn write_bytes(&self, buf: &[u8]) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log sink poisoned"))?;

        if state.written > 0 && state.written + buf.len() as u64 > self.max_bytes {
            state.file.flush()?;
            fs::rename(&self.path, &self.rotated)?;
            state.file = OpenOptions::new().create(true).append(true).open(&self.path)?;
            state.written = 0;
        }

        state.file.write_all(buf)?;
        state.written += buf.len() as u64;

        let text = String::from_utf8_lossy(buf);
        state.partial.push_str(&text);
        while let Some(pos) = state.partial.find('\n') {
            let line: String = state.partial.drain(..=pos).collect();
            let line = line.trim_end().to_string();
            if self.capacity == 0 {
                continue;
            }
            if state.ring.len() == self.capacity {
                state.ring.pop_front();
            }
            state.ring.push_back(line);
        }
        Ok(())
    }

    fn flush(&self) -> io::Result<()> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "log sink poisoned"))?;
        state.file.flush()
    }

    fn recent_lines(&self) -> Vec<String> {
        match self.state.lock() {
            Ok(state) => state.ring.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }
}

struct RollingMakeWriter(Arc<RollingSink>);

impl<'a> MakeWriter<'a> for RollingMakeWriter {
    type Writer = SinkWriter;

    fn make_writer(&'a self) -> Self::Writer {
        SinkWriter(self.0.clone())
    }
}

struct SinkWriter(Arc<RollingSink>);

impl Write for SinkWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.flush()
    }
}
