use std::io::stderr;
use std::sync::OnceLock;

use log::set_logger;
use log::set_max_level;
use log::Level;
use log::LevelFilter;
use log::Log;
use log::Metadata;
use log::Record;
use log::SetLoggerError;

pub struct Logger;

impl Logger {
    pub fn init(max_level: LevelFilter) -> Result<(), SetLoggerError> {
        set_logger(LOGGER.get_or_init(move || Logger)).map(|()| set_max_level(max_level))
    }
}

impl Log for Logger {
    /// Only messages from this crate and its library are shown.
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata
            .target()
            .split("::")
            .next()
            .is_some_and(|name| name == "tarwalk")
    }

    fn log(&self, record: &Record) {
        use std::fmt::Write;
        if !self.enabled(record.metadata()) {
            return;
        }
        let mut buffer = String::with_capacity(4096);
        let prefix = match record.level() {
            Level::Error => "ERROR: ",
            Level::Warn => "WARNING: ",
            _ => "",
        };
        let _ = writeln!(&mut buffer, "{prefix}{}", record.args());
        use std::io::Write as _;
        let _ = stderr().write_all(buffer.as_bytes());
    }

    fn flush(&self) {
        use std::io::Write;
        let _ = stderr().flush();
    }
}

static LOGGER: OnceLock<Logger> = OnceLock::new();

pub fn verbosity_to_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(target: &str) -> Metadata<'_> {
        Metadata::builder().level(Level::Debug).target(target).build()
    }

    #[test]
    fn own_targets_only() {
        assert!(Logger.enabled(&metadata("tarwalk")));
        assert!(Logger.enabled(&metadata("tarwalk::walker::archive")));
        assert!(!Logger.enabled(&metadata("tarwalker")));
        assert!(!Logger.enabled(&metadata("walkdir")));
    }

    #[test]
    fn verbosity() {
        assert_eq!(LevelFilter::Warn, verbosity_to_level(0));
        assert_eq!(LevelFilter::Debug, verbosity_to_level(2));
        assert_eq!(LevelFilter::Trace, verbosity_to_level(9));
    }
}
