//! Minimal `log::Log` implementation: elapsed-time-prefixed lines, no
//! external logging crate required unless the `tracing` feature is enabled.

use std::sync::OnceLock;
use std::time::Instant;

struct SimpleLogger {
    start: Instant,
    level: log::LevelFilter,
}

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let elapsed = self.start.elapsed().as_secs_f32();
        eprintln!("[{elapsed:7.3}s {:>5}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<SimpleLogger> = OnceLock::new();

/// Install the global logger at the given level. Safe to call more than
/// once; only the first call takes effect.
pub fn init_with_level(level: log::LevelFilter) {
    let logger = LOGGER.get_or_init(|| SimpleLogger {
        start: Instant::now(),
        level,
    });
    let _ = log::set_logger(logger).map(|()| log::set_max_level(level));
}

/// Initialize the `tracing` subscriber instead, for consumers that opted
/// into the `tracing` feature. `json` selects structured JSON output over
/// the default human-readable formatter.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        let _ = subscriber.json().try_init();
    } else {
        let _ = subscriber.try_init();
    }
}
