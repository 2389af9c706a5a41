//! Browser console sink for the `log` facade.
//!
//! The library logs through `log` like any native crate. In the browser,
//! [`init_console_logging`] installs a logger that forwards each record,
//! with its key/value pairs, to the matching `console.*` method.

use std::fmt::Write;

use log::kv::{self, Key, Value, VisitSource};
use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from(format_record(record));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug => web_sys::console::log_1(&line),
            Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Install the console logger. Later calls keep the first logger.
pub fn init_console_logging(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

struct Pairs(String);

impl<'kvs> VisitSource<'kvs> for Pairs {
    fn visit_pair(&mut self, key: Key<'kvs>, value: Value<'kvs>) -> Result<(), kv::Error> {
        let _ = write!(self.0, " {key}={value}");
        Ok(())
    }
}

/// `[target] message key=value ...`
pub(crate) fn format_record(record: &Record<'_>) -> String {
    let mut pairs = Pairs(format!("[{}] {}", record.target(), record.args()));
    let _ = record.key_values().visit(&mut pairs);
    pairs.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_record_with_pairs() {
        let pairs = [("nodes", 5), ("threads", 2)];
        let line = format_record(
            &Record::builder()
                .args(format_args!("Computed tidy tree layout"))
                .level(Level::Debug)
                .target("tidy_tree_wasm::layout")
                .key_values(&pairs)
                .build(),
        );
        assert_eq!(
            line,
            "[tidy_tree_wasm::layout] Computed tidy tree layout nodes=5 threads=2"
        );
    }

    #[test]
    fn test_format_record_without_pairs() {
        let line = format_record(
            &Record::builder()
                .args(format_args!("Skipped {} nodes", 3))
                .target("tidy_tree_wasm::tree")
                .build(),
        );
        assert_eq!(line, "[tidy_tree_wasm::tree] Skipped 3 nodes");
    }
}
