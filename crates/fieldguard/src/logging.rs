//! Named loggers backed by `tracing`.
//!
//! Each [`Logger`] owns its own [`Dispatch`] with a size-rotating file sink at
//! `{dir}/{name}.log` and, optionally, stderr. Lines look like
//! `2026-01-02 10:00:00,123 - main - INFO - Starting application`.
//!
//! [`get_logger`] keeps a registry keyed by name, so asking for the same logger twice
//! never attaches a second set of sinks.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{Dispatch, Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;

use crate::config::Config;

static LOGGERS: Lazy<Mutex<HashMap<String, Logger>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// Return the logger registered under `name`, creating it on first use
///
/// Later calls ignore `config` and hand back the existing logger.
pub fn get_logger(name: &str, config: &Config) -> Result<Logger> {
    let mut loggers = LOGGERS.lock().unwrap_or_else(PoisonError::into_inner);

    if let Some(logger) = loggers.get(name) {
        return Ok(logger.clone());
    }

    let logger = Logger::build(name, config)?;
    loggers.insert(name.to_string(), logger.clone());
    Ok(logger)
}

/// Whether a logger has already been created for `name`
pub fn is_initialized(name: &str) -> bool {
    LOGGERS
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(name)
}

/// Leveled message sink for one named component
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    path: PathBuf,
    dispatch: Dispatch,
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("path", &self.path)
            .finish()
    }
}

impl Logger {
    fn build(name: &str, config: &Config) -> Result<Self> {
        let name: Arc<str> = Arc::from(name);
        let logging = &config.logging;
        let path = logging.dir.join(format!("{}.log", name));

        let file = RotatingFile::open(&path, logging.max_bytes, logging.max_files)
            .with_context(|| format!("Failed to open log file: {:?}", path))?;

        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .event_format(LineFormat::new(name.clone()))
            .with_writer(file);

        let console_layer = logging.console.then(|| {
            tracing_subscriber::fmt::layer()
                .event_format(LineFormat::new(name.clone()))
                .with_writer(io::stderr)
        });

        let subscriber = tracing_subscriber::registry()
            .with(LevelFilter::from_level(config.log_level()))
            .with(file_layer)
            .with(console_layer);

        Ok(Self {
            name,
            path,
            dispatch: Dispatch::new(subscriber),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the active log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn debug(&self, message: impl fmt::Display) {
        tracing::dispatcher::with_default(&self.dispatch, || tracing::debug!("{}", message));
    }

    pub fn info(&self, message: impl fmt::Display) {
        tracing::dispatcher::with_default(&self.dispatch, || tracing::info!("{}", message));
    }

    pub fn warn(&self, message: impl fmt::Display) {
        tracing::dispatcher::with_default(&self.dispatch, || tracing::warn!("{}", message));
    }

    pub fn error(&self, message: impl fmt::Display) {
        tracing::dispatcher::with_default(&self.dispatch, || tracing::error!("{}", message));
    }

    /// Run `f` with this logger as the active subscriber, so plain `tracing`
    /// events (such as record validation events) reach its sinks
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.dispatch, f)
    }
}

/// `{time} - {name} - {LEVEL} - {message}`
struct LineFormat {
    name: Arc<str>,
}

impl LineFormat {
    fn new(name: Arc<str>) -> Self {
        Self { name }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f");
        write!(writer, "{} - {} - {} - ", now, self.name, event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Log file that rolls over to `{path}.1 .. {path}.N` once it reaches a size limit
pub struct RotatingFile {
    path: PathBuf,
    max_bytes: u64,
    max_files: u32,
    state: Mutex<FileState>,
}

struct FileState {
    file: File,
    written: u64,
}

impl RotatingFile {
    /// Open (or create) the file in append mode, creating parent directories
    pub fn open(path: impl Into<PathBuf>, max_bytes: u64, max_files: u32) -> io::Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let written = file.metadata()?.len();

        Ok(Self {
            path,
            max_bytes,
            max_files,
            state: Mutex::new(FileState { file, written }),
        })
    }

    pub fn backup_path(&self, index: u32) -> PathBuf {
        let mut name = self.path.clone().into_os_string();
        name.push(format!(".{}", index));
        PathBuf::from(name)
    }

    /// Write one complete record, rotating first if it would overflow the file
    pub fn write_record(&self, buf: &[u8]) -> io::Result<()> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        if self.should_rotate(state.written, buf.len()) {
            self.rotate(&mut state)?;
        }

        state.file.write_all(buf)?;
        state.written += buf.len() as u64;
        Ok(())
    }

    fn should_rotate(&self, written: u64, incoming: usize) -> bool {
        self.max_bytes > 0 && written > 0 && written + incoming as u64 > self.max_bytes
    }

    fn rotate(&self, state: &mut FileState) -> io::Result<()> {
        state.file.flush()?;

        if self.max_files == 0 {
            state.file = OpenOptions::new()
                .write(true)
                .truncate(true)
                .create(true)
                .open(&self.path)?;
            state.written = 0;
            return Ok(());
        }

        for index in (1..self.max_files).rev() {
            let from = self.backup_path(index);
            if from.exists() {
                fs::rename(&from, self.backup_path(index + 1))?;
            }
        }
        fs::rename(&self.path, self.backup_path(1))?;

        state.file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        state.written = 0;
        Ok(())
    }
}

/// Writer handed to the fmt layer for a single event
pub struct RotatingWriter<'a> {
    file: &'a RotatingFile,
}

impl Write for RotatingWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_record(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .file
            .flush()
    }
}

impl<'a> MakeWriter<'a> for RotatingFile {
    type Writer = RotatingWriter<'a>;

    fn make_writer(&'a self) -> Self::Writer {
        RotatingWriter { file: self }
    }
}
