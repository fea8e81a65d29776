use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// `log` backend: one `[timestamp] LEVEL: message` line per record, echoed
/// to stdout and appended to an optional file.
pub struct LineLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

impl LineLogger {
    pub fn new(level: LevelFilter, path: Option<&Path>) -> Self {
        // an unopenable log file degrades to stdout only
        let file = path
            .and_then(|p| OpenOptions::new().create(true).append(true).open(p).ok())
            .map(Mutex::new);
        Self { level, file }
    }

    pub fn format_line(record: &Record) -> String {
        format!(
            "[{}] {}: {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.args()
        )
    }
}

impl Log for LineLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = Self::format_line(record);
        print!("{line}");
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                // write errors are dropped so logging never stops a run
                let _ = f.write_all(line.as_bytes());
            }
        }
    }

    fn flush(&self) {
        let _ = std::io::stdout().flush();
        if let Some(file) = &self.file {
            if let Ok(mut f) = file.lock() {
                let _ = f.flush();
            }
        }
    }
}

/// Installs [`LineLogger`] as the global logger.
pub fn init(level: LevelFilter, path: Option<&Path>) -> Result<(), SetLoggerError> {
    log::set_boxed_logger(Box::new(LineLogger::new(level, path)))?;
    log::set_max_level(level);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn line_format() {
        let line = LineLogger::format_line(
            &Record::builder()
                .args(format_args!("Score: {}", 3))
                .level(Level::Info)
                .build(),
        );
        assert!(line.starts_with('['));
        assert!(line.ends_with("] INFO: Score: 3\n"));
    }

    #[test]
    fn level_filter() {
        let logger = LineLogger::new(LevelFilter::Info, None);
        let debug = Metadata::builder().level(Level::Debug).build();
        let warn = Metadata::builder().level(Level::Warn).build();
        assert!(!logger.enabled(&debug));
        assert!(logger.enabled(&warn));
    }

    #[test]
    fn appends_to_file() {
        let path = std::env::temp_dir().join(format!("snake_env_log_{}.log", std::process::id()));
        let _ = std::fs::remove_file(&path);
        let logger = LineLogger::new(LevelFilter::Trace, Some(&path));
        logger.log(
            &Record::builder()
                .args(format_args!("board full"))
                .level(Level::Info)
                .build(),
        );
        logger.flush();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("INFO: board full"));
        let _ = std::fs::remove_file(&path);
    }
}
