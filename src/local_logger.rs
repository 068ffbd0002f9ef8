use std::env;

use crate::prelude::*;
use console::{Style, style};
use log::Log;
use simplelog::{CombinedLogger, SharedLogger};
use std::io::Write;

pub const LOG_ENV_VAR: &str = "WINECTL_LOG";

pub struct LocalLogger {
    log_level: log::LevelFilter,
}

impl LocalLogger {
    pub fn new() -> Self {
        let log_level = env::var(LOG_ENV_VAR)
            .ok()
            .and_then(|log_level| log_level.parse::<log::LevelFilter>().ok())
            .unwrap_or(log::LevelFilter::Info);

        LocalLogger { log_level }
    }
}

impl Log for LocalLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.log_level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        print_record(record);
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

/// Print a log record to stderr, stdout is reserved for command output
fn print_record(record: &log::Record) {
    let label = match record.level() {
        log::Level::Error => style("error:").red().bold(),
        log::Level::Warn => style("warning:").yellow().bold(),
        log::Level::Info => {
            eprintln!("{}", record.args());
            return;
        }
        log::Level::Debug => style("debug:").blue().dim(),
        log::Level::Trace => style("trace:").black().dim(),
    };

    let message = match record.level() {
        log::Level::Debug | log::Level::Trace => Style::new()
            .dim()
            .apply_to(format!("[{}] {}", record.target(), record.args())),
        _ => Style::new().apply_to(record.args().to_string()),
    };
    eprintln!("{label} {message}");
}

impl SharedLogger for LocalLogger {
    fn level(&self) -> log::LevelFilter {
        self.log_level
    }

    fn config(&self) -> Option<&simplelog::Config> {
        None
    }

    fn as_log(self: Box<Self>) -> Box<dyn Log> {
        Box::new(*self)
    }
}

pub fn init_local_logger() -> Result<()> {
    let logger: Box<dyn SharedLogger> = Box::new(LocalLogger::new());
    CombinedLogger::init(vec![logger])?;
    Ok(())
}
