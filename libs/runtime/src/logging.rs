use crate::config::{LoggingConfig, Section};
use std::{
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{filter::Targets, fmt, layer::SubscriberExt, Layer, Registry};

use file_rotate::{
    compression::Compression,
    suffix::{AppendTimestamp, FileLimit},
    ContentLimit, FileRotate,
};

const DEFAULT_MAX_SIZE_MB: u64 = 100;
const DEFAULT_MAX_BACKUPS: usize = 3;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

// -------- level helpers --------

/// `None` disables the sink; unknown strings fall back to INFO.
fn parse_level(s: &str) -> Option<LevelFilter> {
    match s.trim().to_ascii_lowercase().as_str() {
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" | "" => Some(LevelFilter::INFO),
        "warn" => Some(LevelFilter::WARN),
        "error" => Some(LevelFilter::ERROR),
        "off" | "none" => None,
        _ => Some(LevelFilter::INFO),
    }
}

// -------- rotating writer for files --------

#[derive(Clone)]
struct RotWriter(Arc<Mutex<FileRotate<AppendTimestamp>>>);

impl<'a> fmt::MakeWriter<'a> for RotWriter {
    type Writer = RotWriter;
    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

impl Write for RotWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log writer lock poisoned"))?
            .write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.0
            .lock()
            .map_err(|_| std::io::Error::other("log writer lock poisoned"))?
            .flush()
    }
}

/// Resolve a log file path against `base_dir` (home_dir).
fn resolve_log_path(file: &str, base_dir: &Path) -> PathBuf {
    let p = Path::new(file);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}

/// Rotation threshold in bytes; saturates instead of overflowing.
fn max_bytes(section: &Section) -> usize {
    let bytes = section
        .max_size_mb
        .unwrap_or(DEFAULT_MAX_SIZE_MB)
        .saturating_mul(1024 * 1024);
    usize::try_from(bytes).unwrap_or(usize::MAX)
}

/// Create a size-rotated writer, ensuring the parent directory exists.
fn create_rotating_writer(section: &Section, base_dir: &Path) -> std::io::Result<RotWriter> {
    let log_path = resolve_log_path(&section.file, base_dir);
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let backups = section.max_backups.unwrap_or(DEFAULT_MAX_BACKUPS);
    let rot = FileRotate::new(
        &log_path,
        AppendTimestamp::default(FileLimit::MaxFiles(backups)),
        ContentLimit::BytesSurpassed(max_bytes(section)),
        Compression::None,
        #[cfg(unix)]
        None,
    );
    Ok(RotWriter(Arc::new(Mutex::new(rot))))
}

// -------- filters --------

/// Split config into the "default" section and per-crate sections.
fn split_sections(cfg: &LoggingConfig) -> (Option<&Section>, Vec<(&str, &Section)>) {
    let mut crates: Vec<(&str, &Section)> = cfg
        .iter()
        .filter(|(k, _)| k.as_str() != "default")
        .map(|(k, v)| (k.as_str(), v))
        .collect();
    crates.sort_by_key(|(k, _)| *k);
    (cfg.get("default"), crates)
}

/// Console filter: per-crate levels, default section level for everything else.
fn console_targets(default: Option<&Section>, crates: &[(&str, &Section)]) -> Targets {
    let default_level = default
        .and_then(|s| parse_level(&s.console_level))
        .unwrap_or(LevelFilter::OFF);
    crates.iter().fold(
        Targets::new().with_default(default_level),
        |t, (name, s)| {
            t.with_target(*name, parse_level(&s.console_level).unwrap_or(LevelFilter::OFF))
        },
    )
}

/// File filter for the default sink: crates with their own section are excluded.
fn default_file_targets(default: &Section, crates: &[(&str, &Section)]) -> Targets {
    let level = parse_level(&default.file_level).unwrap_or(LevelFilter::OFF);
    crates.iter().fold(Targets::new().with_default(level), |t, (name, _)| {
        t.with_target(*name, LevelFilter::OFF)
    })
}

fn crate_file_targets(name: &str, section: &Section) -> Targets {
    Targets::new()
        .with_default(LevelFilter::OFF)
        .with_target(name, parse_level(&section.file_level).unwrap_or(LevelFilter::OFF))
}

fn json_file_layer(writer: RotWriter, filter: Targets) -> BoxedLayer {
    fmt::layer()
        .json()
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_writer(writer)
        .with_filter(filter)
        .boxed()
}

fn build_layers(cfg: &LoggingConfig, base_dir: &Path) -> Vec<BoxedLayer> {
    let (default, crates) = split_sections(cfg);

    // stdout is reserved for command output
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_filter(console_targets(default, &crates))
        .boxed();
    let mut layers = vec![console];

    let with_file = |name: &str, section: &Section| -> Option<RotWriter> {
        if section.file.trim().is_empty() {
            return None;
        }
        match create_rotating_writer(section, base_dir) {
            Ok(w) => Some(w),
            Err(e) => {
                eprintln!(
                    "Failed to init log file for '{}': {} ({})",
                    name, section.file, e
                );
                None
            }
        }
    };

    if let Some(section) = default {
        if let Some(w) = with_file("default", section) {
            layers.push(json_file_layer(w, default_file_targets(section, &crates)));
        }
    }
    for (name, section) in &crates {
        if let Some(w) = with_file(name, section) {
            layers.push(json_file_layer(w, crate_file_targets(name, section)));
        }
    }
    layers
}

// -------- public init --------

/// Install the global subscriber from the `logging` config section.
///
/// `base_dir` resolves relative log file paths (normally `home_dir`).
/// Calling this twice is harmless; the second call is a no-op.
pub fn init_logging_from_config(cfg: &LoggingConfig, base_dir: &Path) {
    // Bridge `log` → `tracing` before installing the subscriber
    let _ = tracing_log::LogTracer::init();

    if cfg.is_empty() {
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(fmt::time::UtcTime::rfc_3339())
            .try_init();
        return;
    }

    let subscriber = Registry::default().with(build_layers(cfg, base_dir));
    let _ = tracing::subscriber::set_global_default(subscriber);
}

// =================== tests ===================
