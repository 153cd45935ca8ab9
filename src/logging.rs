//! Logger implementation for the log crate.
//!
//! Records go to stderr as `[LEVEL file:line] message`, coloured by level.

use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::{self, Write};
use termion::color;

pub struct SimpleLogger;

static LOGGER: SimpleLogger = SimpleLogger;

impl Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let file = record.file().unwrap_or("none");
        let line = record.line().unwrap_or(0);
        let colour: &dyn color::Color = match record.level() {
            Level::Error => &color::Red,
            Level::Warn => &color::Yellow,
            Level::Info => &color::Green,
            Level::Debug => &color::Cyan,
            Level::Trace => &color::LightBlack,
        };

        let _ = writeln!(
            io::stderr().lock(),
            "{}[{} {}:{}] {}{}",
            color::Fg(colour),
            record.level(),
            file,
            line,
            record.args(),
            color::Fg(color::Reset)
        );
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

/// Installs [`SimpleLogger`] as the global logger.
///
/// Fails if another logger was installed first.
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    log::set_logger(&LOGGER)?;
    log::set_max_level(level);
    Ok(())
}
