use std::io;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use spdlog::sink::{RotatingFileSink, RotationPolicy, StdStream, StdStreamSink};
use spdlog::{Level, LevelFilter, Logger, LoggerBuilder};

use crate::config::{Config, LogLevel};

/// Days of log files kept around.
const MAX_LOG_FILES: usize = 30;

impl From<LogLevel> for Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Critical => Level::Critical,
            LogLevel::Error => Level::Error,
            LogLevel::Warn => Level::Warn,
            LogLevel::Info => Level::Info,
            LogLevel::Debug => Level::Debug,
            LogLevel::Trace => Level::Trace,
        }
    }
}

fn add_console_sinks(builder: &mut LoggerBuilder) -> spdlog::Result<()> {
    // Warnings and errors go to stderr, the rest to stdout
    let stdout = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stdout)
        .level_filter(LevelFilter::MoreVerbose(Level::Warn))
        .build()?);

    let stderr = Arc::new(StdStreamSink::builder()
        .std_stream(StdStream::Stderr)
        .level_filter(LevelFilter::MoreSevereEqual(Level::Warn))
        .build()?);

    builder.sink(stdout).sink(stderr);
    Ok(())
}

fn build_logger(location: &Path, level: Level, log_to_console: bool) -> spdlog::Result<Arc<Logger>> {
    let daily_sink = Arc::new(RotatingFileSink::builder()
        .base_path(location)
        .rotation_policy(RotationPolicy::Daily { hour: 0, minute: 0 })
        .max_files(MAX_LOG_FILES)
        .rotate_on_open(false)
        .build()?);

    let mut builder = Logger::builder();
    builder.sink(daily_sink);
    if log_to_console {
        add_console_sinks(&mut builder)?;
    }

    let logger = Arc::new(builder.build()?);
    logger.set_flush_level_filter(LevelFilter::MoreSevereEqual(Level::Info));
    logger.set_flush_period(Some(Duration::from_secs(2)));
    logger.set_level_filter(LevelFilter::MoreSevereEqual(level));
    Ok(logger)
}

/// Replaces the default console logger when the `[log]` section is present.
pub fn configure_logger(config: &Config) -> io::Result<()> {
    let Some(ref log) = config.log else {
        return Ok(());
    };

    let Some(ref location) = log.location else {
        return Err(io::Error::new(ErrorKind::InvalidInput, "Log location is not set"));
    };

    let logger = match build_logger(location, log.level.into(), log.log_to_console) {
        Ok(logger) => logger,
        Err(e) => return Err(io::Error::new(ErrorKind::Other,
            format!("Error creating log sinks at {}: {}", location.display(), e))),
    };

    spdlog::set_default_logger(logger);
    Ok(())
}
