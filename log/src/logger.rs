use crate::{LogError, LogLevel, Logger, set_logger};
use dirs::data_dir;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

/// Console logger with an optional on-disk copy.
///
/// When a log file is configured, an existing file from a previous run is
/// rotated aside under a timestamped name and compressed to `.7z` before a
/// fresh file is created.
pub struct AdvancedLogger {
    level: AtomicU8,
    log_file: Option<PathBuf>,
}

impl AdvancedLogger {
    pub fn new(level: LogLevel, log_file: Option<PathBuf>) -> Self {
        if let Some(file) = &log_file {
            prepare_log_file(file);
        }
        AdvancedLogger {
            level: AtomicU8::new(level.severity()),
            log_file,
        }
    }

    /// Installs an `AdvancedLogger` writing to the per-user data directory
    /// as the global logger.
    pub fn init(level: LogLevel) -> Result<(), LogError> {
        let log_file = data_dir().map(|dir| dir.join("mira").join("latest.log"));
        set_logger(Arc::new(AdvancedLogger::new(level, log_file)))
    }

    fn threshold(&self) -> LogLevel {
        LogLevel::from_severity(self.level.load(Ordering::Relaxed))
    }
}

fn prepare_log_file(file: &Path) {
    if file.exists() {
        let mut rotated = file.to_path_buf();
        rotated.set_file_name(format!(
            "{}.log",
            chrono::Local::now().format("%d%m%Y_%H%M%S")
        ));

        if let Err(e) = std::fs::rename(file, &rotated) {
            eprintln!("Failed to rotate existing log file: {e}");
        } else {
            let mut compressed = rotated.clone();
            compressed.set_extension("7z");

            if let Err(e) = sevenz_rust2::compress_to_path(&rotated, &compressed) {
                eprintln!("Failed to compress rotated log: {e}");
            } else if let Err(e) = std::fs::remove_file(&rotated) {
                eprintln!("Failed to remove rotated log: {e}");
            }
        }
    }

    if let Some(parent) = file.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                eprintln!("Failed to create log directory: {e}");
            });
        }
    }

    if let Err(e) = std::fs::File::create(file) {
        eprintln!("Failed to create log file: {e}");
    }
}

fn log_to_file(log_file: &Path, message: &str) -> std::io::Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(log_file)?;
    writeln!(file, "{message}")?;
    Ok(())
}

impl Logger for AdvancedLogger {
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn critical(&self, message: &str) {
        self.log(LogLevel::Critical, message);
    }

    fn log(&self, level: LogLevel, message: &str) {
        if level >= self.threshold() {
            let timestamp = chrono::Local::now().format("%d%m%Y %H:%M:%S");
            println!("{timestamp} - [{level}] - {message}");
            if let Some(file) = &self.log_file {
                let line = format!("{} - [{}] - {}", timestamp, level.raw_str(), message);
                log_to_file(file, &line).unwrap_or_else(|e| {
                    eprintln!("Failed to write to log file: {e}");
                });
            }
        }
    }

    fn set_level(&self, level: LogLevel) {
        self.level.store(level.severity(), Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_logging_respects_threshold() {
        let path = std::env::temp_dir().join(format!("mira-logger-test-{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);

        let logger = AdvancedLogger::new(LogLevel::Info, Some(path.clone()));
        assert!(path.exists());

        logger.log(LogLevel::Debug, "filtered out");
        logger.log(LogLevel::Warning, "kept warning");

        logger.set_level(LogLevel::Debug);
        logger.log(LogLevel::Debug, "kept after set_level");

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(!content.contains("filtered out"));
        assert!(content.contains("kept warning"));
        assert!(content.contains("kept after set_level"));

        std::fs::remove_file(&path).unwrap();
    }
}
