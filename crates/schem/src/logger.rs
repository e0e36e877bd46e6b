//! File-based logging for the editor.
//!
//! Each run writes to `~/.schem/logs/{timestamp}_{uuid}/log` and mirrors every
//! line to stderr. The level comes from `SCHEM_LOG` (`error` through `trace`)
//! and defaults to `info`.

use anyhow::{Context, Result};
use chrono::Local;
use dirs::home_dir;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{create_dir_all, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Environment variable holding the log level.
pub const LOG_LEVEL_VAR: &str = "SCHEM_LOG";

pub struct SchemLogger {
    level: LevelFilter,
    file: Arc<Mutex<File>>,
    run_id: String,
    log_path: PathBuf,
}

impl SchemLogger {
    pub fn new(level: LevelFilter) -> Result<Self> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let uuid_string = Uuid::new_v4().to_string();
        let uuid = uuid_string.split('-').next().unwrap_or("unknown");
        let run_id = format!("{timestamp}_{uuid}");

        let log_dir = Self::log_dir(&run_id)?;
        create_dir_all(&log_dir)
            .with_context(|| format!("Failed to create log directory: {}", log_dir.display()))?;

        let log_path = log_dir.join("log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

        Ok(Self {
            level,
            file: Arc::new(Mutex::new(file)),
            run_id,
            log_path,
        })
    }

    /// Returns the path to the log directory for this run
    pub fn log_dir(run_id: &str) -> Result<PathBuf> {
        let home = home_dir().ok_or_else(|| anyhow::anyhow!("Could not find home directory"))?;
        Ok(home.join(".schem").join("logs").join(run_id))
    }

    /// Install the logger at the level named by `SCHEM_LOG`.
    pub fn init_from_env() -> Result<()> {
        let level = level_from(std::env::var(LOG_LEVEL_VAR).ok().as_deref());
        Self::init(level)
    }

    pub fn init(level: LevelFilter) -> Result<()> {
        let logger = Self::new(level)?;
        let run_id = logger.run_id.clone();
        let log_path = logger.log_path.clone();

        log::set_boxed_logger(Box::new(logger))
            .map(|()| log::set_max_level(level))
            .map_err(|e| anyhow::anyhow!("Failed to set logger: {}", e))?;

        log::info!("Schem logger initialized. Run ID: {}", run_id);
        log::info!("Log file: {}", log_path.display());
        Ok(())
    }
}

/// Parse a level name, falling back to `info` for anything unrecognized.
fn level_from(value: Option<&str>) -> LevelFilter {
    value
        .and_then(|value| value.trim().parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::Info)
}

impl Log for SchemLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S%.3f").to_string();
            let message = format!(
                "{} {} [{}] {}",
                timestamp,
                record.level(),
                record.target(),
                record.args()
            );

            if let Ok(mut file) = self.file.lock() {
                let _ = writeln!(file, "{}", message);
                let _ = file.flush();
            }

            eprintln!("{}", message);
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_env_value() {
        assert_eq!(level_from(Some("debug")), LevelFilter::Debug);
        assert_eq!(level_from(Some(" TRACE ")), LevelFilter::Trace);
        assert_eq!(level_from(Some("off")), LevelFilter::Off);
    }

    #[test]
    fn test_level_defaults_to_info() {
        assert_eq!(level_from(None), LevelFilter::Info);
        assert_eq!(level_from(Some("loud")), LevelFilter::Info);
    }

    #[test]
    fn test_log_dir_is_per_run() {
        let Ok(dir) = SchemLogger::log_dir("20260101_000000_abcd") else {
            return;
        };
        assert!(dir.ends_with(".schem/logs/20260101_000000_abcd"));
    }
}
