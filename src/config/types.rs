//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing.
//! Every probe binary shares the same option set.

use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::DEFAULT_TIMEOUT_SECS;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Command-line options shared by every probe.
///
/// The URL is the only required argument. The remaining flags control the
/// deadline and diagnostics; log records always go to stderr so they never
/// mix with the probe report on stdout.
#[derive(Debug, Clone, Parser)]
#[command(version, about = "Single-request HTTPS diagnostic probe")]
pub struct Opt {
    /// Target URL (for example https://example.com/)
    pub url: String,

    /// Overall deadline in seconds for name resolution and the transfer
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_seconds: u64,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl Opt {
    /// Builds options for `url` with every other field at its default.
    pub fn for_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            log_level: LogLevel::Warn,
            log_format: LogFormat::Plain,
        }
    }

    /// The overall deadline as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_parse_url_only_uses_defaults() {
        let opt = Opt::try_parse_from(["packets", "https://example.com/"]).unwrap();
        assert_eq!(opt.url, "https://example.com/");
        assert_eq!(opt.timeout_seconds, DEFAULT_TIMEOUT_SECS);
        assert_eq!(opt.log_level, LogLevel::Warn);
        assert_eq!(opt.log_format, LogFormat::Plain);
    }

    #[test]
    fn test_parse_all_flags() {
        let opt = Opt::try_parse_from([
            "tls",
            "https://example.com/",
            "--timeout-seconds",
            "5",
            "--log-level",
            "debug",
            "--log-format",
            "json",
        ])
        .unwrap();
        assert_eq!(opt.timeout(), Duration::from_secs(5));
        assert_eq!(opt.log_level, LogLevel::Debug);
        assert_eq!(opt.log_format, LogFormat::Json);
    }

    #[test]
    fn test_parse_missing_url_is_an_error() {
        let err = Opt::try_parse_from(["packets"]).unwrap_err();
        assert_eq!(
            err.kind(),
            clap::error::ErrorKind::MissingRequiredArgument
        );
    }

    #[test]
    fn test_parse_rejects_zero_timeout() {
        assert!(Opt::try_parse_from(["dns", "example.com", "--timeout-seconds", "0"]).is_err());
    }

    #[test]
    fn test_for_url_matches_parsed_defaults() {
        let built = Opt::for_url("https://example.com/");
        let parsed = Opt::try_parse_from(["dns", "https://example.com/"]).unwrap();
        assert_eq!(built.url, parsed.url);
        assert_eq!(built.timeout_seconds, parsed.timeout_seconds);
        assert_eq!(built.log_level, parsed.log_level);
        assert_eq!(built.log_format, parsed.log_format);
    }
}
