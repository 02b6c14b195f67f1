use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jsondb_core::LevelFilter;

/// Configuration for the jsondb command-line tool.
#[derive(Parser, Debug, Clone)]
#[command(name = "jsondb")]
#[command(about = "Directory-backed JSON document store", version)]
pub struct Config {
    /// Root directory of the database
    #[arg(long, env = "JSONDB_DIR")]
    pub dir: Option<PathBuf>,

    /// Minimum level to log (overridden by RUST_LOG when set)
    #[arg(long, default_value = "info", env = "JSONDB_LOG")]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a JSON value as COLLECTION/RESOURCE, replacing any previous record
    Write {
        collection: String,
        resource: String,
        /// The record, as a JSON document
        json: String,
    },
    /// Print one record
    Read { collection: String, resource: String },
    /// Print every record in a collection
    List { collection: String },
    /// Remove one record
    Delete { collection: String, resource: String },
}

impl Config {
    /// Get the effective database directory.
    pub fn effective_dir(&self) -> PathBuf {
        self.dir.clone().unwrap_or_else(|| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("jsondb")
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}
