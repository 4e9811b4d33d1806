//! Browser Logging
//!
//! `log` records forwarded to the devtools console, one console method per
//! level so the browser's level filter works.

use log::{Level, LevelFilter, Log, Metadata, Record};

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record.level(), record.target(), &record.args().to_string());
        let line = wasm_bindgen::JsValue::from_str(&line);
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn format_record(level: Level, target: &str, message: &str) -> String {
    // Messages already carry a [COMPONENT] prefix; the target is only kept
    // for records coming from other crates
    if target.starts_with(env!("CARGO_CRATE_NAME")) {
        format!("{:<5} {}", level, message)
    } else {
        format!("{:<5} {} {}", level, target, message)
    }
}

/// Install the console logger. Calling it twice is harmless.
pub fn init(level: LevelFilter) {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_own_records_skip_target() {
        let own = format!("{}::http", env!("CARGO_CRATE_NAME"));
        assert_eq!(format_record(Level::Info, &own, "[HTTP] GET /users"), "INFO  [HTTP] GET /users");
        assert_eq!(format_record(Level::Warn, "leptos", "slow effect"), "WARN  leptos slow effect");
    }
}
