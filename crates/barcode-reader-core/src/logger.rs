//! Stderr logger for engine call outcomes.
//!
//! Each line reads `[elapsed LEVEL thread target] message`, e.g.
//!
//! ```text
//! [  0.012s  WARN barcode-video barcode_reader::video] frame 4 failed: Recognition timeout.
//! ```
//!
//! The thread column tells calls made by the host apart from frames decoded
//! on the video worker. Records from other crates are dropped unless the
//! logger is configured with `all_targets`.
//!
//! [`init_from_env`] reads [`LOG_ENV`]: a level name, optionally followed by
//! `,all` (for example `BARCODE_READER_LOG=debug,all`).

use std::fmt;
use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::EnvFilter;

/// Environment variable read by [`init_from_env`] and [`init_tracing`].
pub const LOG_ENV: &str = "BARCODE_READER_LOG";

const OWN_TARGET: &str = "barcode_reader";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoggerConfig {
    pub level: LevelFilter,
    /// Also print records from crates other than `barcode_reader*`.
    pub all_targets: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LevelFilter::Info,
            all_targets: false,
        }
    }
}

impl LoggerConfig {
    /// Parse `level[,all]`; `None` for anything else.
    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split(',').map(str::trim);
        let level = parts.next()?.parse().ok()?;
        let all_targets = match parts.next() {
            None => false,
            Some(flag) if flag.eq_ignore_ascii_case("all") => true,
            Some(_) => return None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(Self { level, all_targets })
    }

    /// Configuration from [`LOG_ENV`], or the default when it is unset or
    /// unreadable.
    pub fn from_env() -> Self {
        std::env::var(LOG_ENV)
            .ok()
            .and_then(|value| Self::parse(&value))
            .unwrap_or_default()
    }

    fn accepts(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
            && (self.all_targets || metadata.target().starts_with(OWN_TARGET))
    }
}

fn format_line(
    elapsed: f64,
    level: log::Level,
    thread: &str,
    target: &str,
    args: &fmt::Arguments,
) -> String {
    format!("[{elapsed:7.3}s {level:>5} {thread} {target}] {args}")
}

struct EngineLogger {
    config: LoggerConfig,
    started: Instant,
}

impl Log for EngineLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        self.config.accepts(metadata)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let current = std::thread::current();
        let line = format_line(
            self.started.elapsed().as_secs_f64(),
            record.level(),
            current.name().unwrap_or("-"),
            record.target(),
            record.args(),
        );
        let _ = writeln!(std::io::stderr().lock(), "{line}");
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<EngineLogger> = OnceLock::new();

/// Install the logger. Later calls keep the first configuration.
pub fn init(config: LoggerConfig) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| EngineLogger {
        config,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(logger.config.level);
    Ok(())
}

/// Install the logger for `barcode_reader*` records at `level`.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    init(LoggerConfig {
        level,
        ..LoggerConfig::default()
    })
}

/// Install the logger configured by [`LOG_ENV`].
pub fn init_from_env() -> Result<(), log::SetLoggerError> {
    init(LoggerConfig::from_env())
}

/// Install a `tracing` subscriber filtered by [`LOG_ENV`], then `RUST_LOG`,
/// then `barcode_reader=info`. Decode spans are reported when they close.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(format!("{OWN_TARGET}=info")));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_thread_names(true);
    let _ = if json {
        builder.json().flatten_event(true).finish().try_init()
    } else {
        builder.compact().finish().try_init()
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    fn metadata(level: Level, target: &str) -> Metadata<'_> {
        Metadata::builder().level(level).target(target).build()
    }

    #[test]
    fn parses_level_and_target_scope() {
        assert_eq!(
            LoggerConfig::parse("debug"),
            Some(LoggerConfig {
                level: LevelFilter::Debug,
                all_targets: false
            })
        );
        assert_eq!(
            LoggerConfig::parse("WARN, all"),
            Some(LoggerConfig {
                level: LevelFilter::Warn,
                all_targets: true
            })
        );
        assert_eq!(LoggerConfig::parse("verbose"), None);
        assert_eq!(LoggerConfig::parse("info,some"), None);
        assert_eq!(LoggerConfig::parse("info,all,more"), None);
    }

    #[test]
    fn foreign_targets_need_all_targets() {
        let own = LoggerConfig {
            level: LevelFilter::Debug,
            all_targets: false,
        };
        assert!(own.accepts(&metadata(Level::Debug, "barcode_reader::reader")));
        assert!(own.accepts(&metadata(Level::Info, "barcode_reader_core::settings")));
        assert!(!own.accepts(&metadata(Level::Trace, "barcode_reader::video")));
        assert!(!own.accepts(&metadata(Level::Error, "hyper::client")));

        let all = LoggerConfig {
            all_targets: true,
            ..own
        };
        assert!(all.accepts(&metadata(Level::Error, "hyper::client")));
    }

    #[test]
    fn line_carries_thread_and_target() {
        let line = format_line(
            1.5,
            Level::Warn,
            "barcode-video",
            "barcode_reader::video",
            &format_args!("frame {} failed: {}", 4, "Recognition timeout."),
        );
        assert_eq!(
            line,
            "[  1.500s  WARN barcode-video barcode_reader::video] frame 4 failed: Recognition timeout."
        );
    }

    #[test]
    fn second_install_keeps_the_first_level() {
        init_with_level(LevelFilter::Debug).expect("first install");
        init(LoggerConfig {
            level: LevelFilter::Trace,
            all_targets: true,
        })
        .expect("second install");
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }
}
