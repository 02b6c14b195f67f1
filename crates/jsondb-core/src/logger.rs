use std::fmt;

use tracing::level_filters::LevelFilter;
use tracing::Level;

/// Leveled logging capability injected into a store.
///
/// Messages arrive pre-formatted as [`fmt::Arguments`], so implementations
/// decide whether to render them at all. Logging is observational: a store
/// never changes what it returns based on what a logger does.
pub trait Logger: Send + Sync {
    fn fatal(&self, args: fmt::Arguments<'_>);
    fn error(&self, args: fmt::Arguments<'_>);
    fn warn(&self, args: fmt::Arguments<'_>);
    fn info(&self, args: fmt::Arguments<'_>);
    fn debug(&self, args: fmt::Arguments<'_>);
    fn trace(&self, args: fmt::Arguments<'_>);
}

/// Default console logger.
///
/// Forwards every message at or above its threshold to the matching
/// `tracing` macro; the subscriber installed by the binary decides where
/// it ends up. `fatal` is reported as an error event tagged `fatal = true`
/// and never aborts the process.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    /// Create a console logger that emits messages at `level` and above.
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    /// The threshold this logger was created with.
    pub fn level(&self) -> LevelFilter {
        self.level
    }

    fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(LevelFilter::INFO)
    }
}

impl Logger for ConsoleLogger {
    fn fatal(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::ERROR) {
            tracing::error!(fatal = true, "{}", args);
        }
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::ERROR) {
            tracing::error!("{}", args);
        }
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::WARN) {
            tracing::warn!("{}", args);
        }
    }

    fn info(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::INFO) {
            tracing::info!("{}", args);
        }
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::DEBUG) {
            tracing::debug!("{}", args);
        }
    }

    fn trace(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::TRACE) {
            tracing::trace!("{}", args);
        }
    }
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {
        $logger.warn(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {
        $logger.info(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {
        $logger.debug(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! log_trace {
    ($logger:expr, $($arg:tt)+) => {
        $logger.trace(format_args!($($arg)+))
    };
}
