use crate::domain::model::{LogEntry, LogLevel};
use crate::domain::ports::Logger;
use owo_colors::OwoColorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_cli_logger(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ts_build_scripts=debug,info"))
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("ts_build_scripts=info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

/// Prints log entries to stdout, one colored line per entry.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleLogger;

impl Logger for ConsoleLogger {
    fn write(&self, entry: &LogEntry) {
        let line = entry.to_string();
        match entry.level {
            LogLevel::Debug => println!("{}", line.bright_black()),
            LogLevel::Error => println!("{}", line.red().bold()),
            LogLevel::Info => println!("{}", line.magenta().bold()),
            LogLevel::Log => println!("{}", line.cyan()),
        }
    }
}
