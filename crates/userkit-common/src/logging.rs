//! Structured logging for userkit
//!
//! Writes ISO-timestamped key=value lines to stderr or to a log file
//! under `.userkit/logs`, with a configurable minimum level and cleanup
//! of old log files. Loggers carry a set of tags that are prepended to
//! every line they emit.
//!
//! [`init`] also installs a `tracing` subscriber that forwards every
//! `tracing` event into this logger, so code logging through the
//! `tracing` macros honors the configured level and destination.

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::field::{Field, Visit};
use tracing::{span, Event, Metadata, Subscriber};

/// Minimum number of log files kept after cleanup
const KEEP_LOG_FILES: usize = 10;

/// Log levels, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    /// Parse log level from a case-insensitive string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Some(LogLevel::Debug),
            "INFO" => Some(LogLevel::Info),
            "WARN" => Some(LogLevel::Warn),
            "ERROR" => Some(LogLevel::Error),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

/// Logging configuration
pub struct LogOptions {
    /// Print to stderr instead of a file
    pub print: bool,
    /// Minimum log level
    pub level: Option<LogLevel>,
}

/// Structured field tags attached to log lines
pub type Tags = HashMap<String, serde_json::Value>;

struct LoggerState {
    min_level: LogLevel,
    file_writer: Mutex<Option<File>>,
    log_path: Option<PathBuf>,
}

/// Logger handle carrying a fixed set of tags
pub struct Logger {
    tags: Tags,
    state: Arc<LoggerState>,
}

impl Logger {
    pub fn debug(&self, message: &str, extra: Option<Tags>) {
        self.log(LogLevel::Debug, message, extra);
    }

    pub fn info(&self, message: &str, extra: Option<Tags>) {
        self.log(LogLevel::Info, message, extra);
    }

    pub fn warn(&self, message: &str, extra: Option<Tags>) {
        self.log(LogLevel::Warn, message, extra);
    }

    pub fn error(&self, message: &str, extra: Option<Tags>) {
        self.log(LogLevel::Error, message, extra);
    }

    /// Clone this logger with an additional tag
    pub fn with_tag(&self, key: impl Into<String>, value: serde_json::Value) -> Self {
        let mut tags = self.tags.clone();
        tags.insert(key.into(), value);
        Logger {
            tags,
            state: Arc::clone(&self.state),
        }
    }

    fn log(&self, level: LogLevel, message: &str, extra: Option<Tags>) {
        if level < self.state.min_level {
            return;
        }

        let mut fields = self.tags.clone();
        if let Some(extra) = extra {
            fields.extend(extra);
        }

        let mut rendered: Vec<String> = fields
            .iter()
            .filter_map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    serde_json::Value::Null => return None,
                    other => other.to_string(),
                };
                Some(format!("{}={}", key, value))
            })
            .collect();
        rendered.sort();

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S").to_string();

        let parts: Vec<String> = [
            level.as_str().to_string(),
            timestamp,
            rendered.join(" "),
            message.to_string(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect();
        let line = format!("{}\n", parts.join(" "));

        if let Some(writer) = self.state.file_writer.lock().unwrap().as_mut() {
            let _ = writer.write_all(line.as_bytes());
            let _ = writer.flush();
        } else {
            eprint!("{}", line);
        }
    }
}

static GLOBAL_STATE: Mutex<Option<Arc<LoggerState>>> = Mutex::new(None);

fn tracing_level(level: &tracing::Level) -> LogLevel {
    match *level {
        tracing::Level::ERROR => LogLevel::Error,
        tracing::Level::WARN => LogLevel::Warn,
        tracing::Level::INFO => LogLevel::Info,
        _ => LogLevel::Debug,
    }
}

/// Forwards `tracing` events into the global logger
///
/// Consults [`GLOBAL_STATE`] per event, so re-running [`init`] changes
/// the level and destination for subsequent events without the
/// subscriber being reinstalled.
struct TracingBridge;

impl Subscriber for TracingBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        match GLOBAL_STATE.lock().unwrap().as_ref() {
            Some(state) => tracing_level(metadata.level()) >= state.min_level,
            None => false,
        }
    }

    fn new_span(&self, _attrs: &span::Attributes<'_>) -> span::Id {
        span::Id::from_u64(1)
    }

    fn record(&self, _span: &span::Id, _values: &span::Record<'_>) {}

    fn record_follows_from(&self, _span: &span::Id, _follows: &span::Id) {}

    fn event(&self, event: &Event<'_>) {
        let state = match GLOBAL_STATE.lock().unwrap().as_ref() {
            Some(state) => Arc::clone(state),
            None => return,
        };

        struct Collector {
            message: String,
            tags: Tags,
        }
        impl Collector {
            fn put(&mut self, field: &Field, rendered: String) {
                if field.name() == "message" {
                    self.message = rendered;
                } else {
                    self.tags
                        .insert(field.name().to_string(), serde_json::Value::String(rendered));
                }
            }
        }
        impl Visit for Collector {
            fn record_str(&mut self, field: &Field, value: &str) {
                self.put(field, value.to_string());
            }

            fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
                self.put(field, format!("{:?}", value));
            }
        }

        let mut collector = Collector {
            message: String::new(),
            tags: Tags::new(),
        };
        event.record(&mut collector);

        let logger = Logger {
            tags: Tags::new(),
            state,
        };
        logger.log(
            tracing_level(event.metadata().level()),
            &collector.message,
            Some(collector.tags),
        );
    }

    fn enter(&self, _span: &span::Id) {}

    fn exit(&self, _span: &span::Id) {}
}

/// Initialize the logging system
///
/// Safe to call more than once: later calls replace the global state,
/// which keeps hot-reload-style re-execution of wiring code harmless.
pub fn init(options: LogOptions) -> std::io::Result<()> {
    let min_level = options.level.unwrap_or(LogLevel::Info);

    let log_path = if options.print {
        None
    } else {
        let log_dir = std::env::current_dir()?.join(".userkit").join("logs");
        fs::create_dir_all(&log_dir)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S").to_string();
        let path = log_dir.join(format!("{}.log", timestamp));
        File::create(&path)?;
        cleanup(&log_dir)?;
        Some(path)
    };

    let file_writer = match &log_path {
        Some(path) => Some(File::options().append(true).open(path)?),
        None => None,
    };

    let state = Arc::new(LoggerState {
        min_level,
        file_writer: Mutex::new(file_writer),
        log_path,
    });
    *GLOBAL_STATE.lock().unwrap() = Some(state);

    // The bridge reads the global state per event, so only the first
    // install matters; later calls already see the swapped state.
    let _ = tracing::subscriber::set_global_default(TracingBridge);
    Ok(())
}

/// Path of the current log file, if logging to a file
pub fn file() -> Option<PathBuf> {
    GLOBAL_STATE
        .lock()
        .unwrap()
        .as_ref()
        .and_then(|state| state.log_path.clone())
}

/// Create a logger with optional tags
///
/// Panics when [`init`] has not been called.
pub fn create(tags: Option<Tags>) -> Logger {
    let state = GLOBAL_STATE
        .lock()
        .unwrap()
        .as_ref()
        .expect("logging not initialized")
        .clone();
    Logger {
        tags: tags.unwrap_or_default(),
        state,
    }
}

/// Delete log files beyond the newest [`KEEP_LOG_FILES`]
fn cleanup(log_dir: &Path) -> std::io::Result<()> {
    let mut log_files: Vec<_> = fs::read_dir(log_dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension()? == "log" {
                let modified = fs::metadata(&path).ok()?.modified().ok()?;
                Some((path, modified))
            } else {
                None
            }
        })
        .collect();

    log_files.sort_by(|a, b| b.1.cmp(&a.1));
    for (path, _) in log_files.iter().skip(KEEP_LOG_FILES) {
        let _ = fs::remove_file(path);
    }
    Ok(())
}

/// Render an error together with its cause chain
pub fn format_error(error: &dyn std::error::Error) -> String {
    const MAX_DEPTH: usize = 10;

    let mut rendered = error.to_string();
    let mut source = error.source();
    let mut depth = 0;
    while let Some(cause) = source {
        if depth >= MAX_DEPTH {
            break;
        }
        rendered = format!("{} Caused by: {}", rendered, cause);
        source = cause.source();
        depth += 1;
    }
    rendered
}
