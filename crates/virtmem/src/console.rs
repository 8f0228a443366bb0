//! Defines the process logger, which writes log records to stderr.
//!
//! Stdout carries the report, so diagnostics never interleave with it.

use std::io::{self, Write};

use log::{LevelFilter, SetLoggerError};
use spin::Once;

pub struct Console {
    level: LevelFilter,
}

static DEFAULT: Once<Console> = Once::new();

impl Console {
    /// Creates the process-wide console at `level` and installs it as the logger.
    pub fn init(level: LevelFilter) -> Result<&'static Self, SetLoggerError> {
        let console = DEFAULT.call_once(|| Console { level });
        console.install()?;
        Ok(console)
    }

    fn install(&'static self) -> Result<(), SetLoggerError> {
        log::set_logger(self)?;
        log::set_max_level(self.level);
        Ok(())
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }
}

impl log::Log for Console {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        // Nothing sensible left to report to if stderr itself is gone.
        let _ = write_log_entry_to(&mut io::stderr().lock(), record);
    }

    fn flush(&self) {
        let _ = io::stderr().flush();
    }
}

fn write_log_entry_to(writer: &mut impl Write, record: &log::Record) -> io::Result<()> {
    #[cfg(any(debug_assertions, feature = "detailed-logging"))]
    return writeln!(
        writer,
        "[{} {}:{} {}] {}",
        record.level(),
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
        record.target(),
        record.args()
    );
    #[cfg(not(any(debug_assertions, feature = "detailed-logging")))]
    return writeln!(writer, "[{:5}] {}", record.level(), record.args());
}
