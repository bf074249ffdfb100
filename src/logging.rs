use chrono::Local;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::{self, LineWriter, Write};
use std::sync::Mutex;

use crate::config::LogConfig;

const DEBUG_LOG_FILE: &str = "shape-diff.log";
const TRACE_LOG_FILE: &str = "shape-diff-trace.log";

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

fn open_log_file(path: &str) -> io::Result<Mutex<LineWriter<File>>> {
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    Ok(Mutex::new(LineWriter::new(file)))
}

fn flush_log_file(writer: &Mutex<LineWriter<File>>) {
    if let Ok(mut writer) = writer.lock() {
        let _ = writer.flush();
    }
}

mod console {
    use super::*;

    /// Writes records to stderr, optionally mirroring them into a file.
    pub struct ConsoleLogger {
        mirror: Option<Mutex<LineWriter<File>>>,
    }

    impl ConsoleLogger {
        pub fn new(mirror_to_file: bool) -> io::Result<Self> {
            let mirror = if mirror_to_file {
                Some(open_log_file(DEBUG_LOG_FILE)?)
            } else {
                None
            };
            Ok(Self { mirror })
        }
    }

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Debug
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            if let Some(mirror) = &self.mirror {
                if let Ok(mut writer) = mirror.lock() {
                    let _ = writeln!(
                        writer,
                        "[{:<5} {}] {}",
                        level_tag(record.level()),
                        Local::now().format("%H:%M:%S%.6f"),
                        record.args()
                    );
                }
            }
            eprintln!(
                "[{:<5} {}] {}",
                level_tag(record.level()),
                Local::now().format("%H:%M:%S%.3f"),
                record.args()
            );
        }

        fn flush(&self) {
            if let Some(mirror) = &self.mirror {
                flush_log_file(mirror);
            }
        }
    }

    impl Drop for ConsoleLogger {
        fn drop(&mut self) {
            self.flush();
        }
    }
}

mod trace {
    use super::*;

    /// Writes every record, with its module path, into the trace file.
    pub struct TraceLogger {
        writer: Mutex<LineWriter<File>>,
    }

    impl TraceLogger {
        pub fn new() -> io::Result<Self> {
            Ok(Self {
                writer: open_log_file(TRACE_LOG_FILE)?,
            })
        }
    }

    impl Log for TraceLogger {
        fn enabled(&self, _metadata: &Metadata) -> bool {
            true
        }

        fn log(&self, record: &Record) {
            if let Ok(mut writer) = self.writer.lock() {
                let _ = writeln!(
                    writer,
                    "[{:<5} {} {}] {}",
                    level_tag(record.level()),
                    Local::now().format("%H:%M:%S%.6f"),
                    record.module_path().unwrap_or("???"),
                    record.args()
                );
            }
        }

        fn flush(&self) {
            flush_log_file(&self.writer);
        }
    }

    impl Drop for TraceLogger {
        fn drop(&mut self) {
            flush_log_file(&self.writer);
        }
    }
}

fn install(logger: io::Result<Box<dyn Log>>, level: LevelFilter) {
    match logger {
        Ok(logger) => {
            if log::set_boxed_logger(logger).is_ok() {
                log::set_max_level(level);
            }
        }
        Err(e) => eprintln!("cannot open log file: {}", e),
    }
}

fn console(mirror_to_file: bool) -> io::Result<Box<dyn Log>> {
    Ok(Box::new(console::ConsoleLogger::new(mirror_to_file)?))
}

fn trace() -> io::Result<Box<dyn Log>> {
    Ok(Box::new(trace::TraceLogger::new()?))
}

/// Installs the process logger. A logger installed earlier stays in place.
pub fn init_log(config: &LogConfig) {
    match config {
        LogConfig::NoLog => {}
        LogConfig::Trace => install(trace(), LevelFilter::Trace),
        LogConfig::Verbose(verbose) => match *verbose {
            0 => {}
            1 => install(console(false), LevelFilter::Info),
            2 => install(console(false), LevelFilter::Debug),
            3 => install(console(true), LevelFilter::Debug),
            4..=u8::MAX => install(trace(), LevelFilter::Trace),
        },
    }
}
