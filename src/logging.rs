//! `log` backend. In the browser records go to the developer console at the
//! matching severity; natively env_logger writes them to stderr.

use log::{LevelFilter, Record};

fn format_record(record: &Record) -> String {
    format!("[{} {}] {}", record.level(), record.target(), record.args())
}

#[cfg(target_arch = "wasm32")]
mod console {
    use log::{Level, Log, Metadata, Record};

    pub static LOGGER: ConsoleLogger = ConsoleLogger;

    pub struct ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = wasm_bindgen::JsValue::from_str(&super::format_record(record));
            match record.level() {
                Level::Error => web_sys::console::error_1(&line),
                Level::Warn => web_sys::console::warn_1(&line),
                Level::Info => web_sys::console::info_1(&line),
                Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
            }
        }

        fn flush(&self) {}
    }
}

/// Install the logger. Safe to call more than once; later calls only adjust
/// the level.
#[cfg(target_arch = "wasm32")]
pub fn init(level: LevelFilter) {
    if log::set_logger(&console::LOGGER).is_err() {
        log::debug!("Logger already installed");
    }
    log::set_max_level(level);
}

/// Install env_logger at `level`. `RUST_LOG` still overrides it, and later
/// calls only adjust the level.
#[cfg(not(target_arch = "wasm32"))]
pub fn init(level: LevelFilter) {
    use std::io::Write;

    let installed = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{}", format_record(record)))
        .try_init();
    if installed.is_err() {
        log::debug!("Logger already installed");
    }
    log::set_max_level(level);
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn test_format_record() {
        let line = format_record(
            &Record::builder()
                .level(Level::Warn)
                .target("folio::loader")
                .args(format_args!("Skipping {} entry", "projects"))
                .build(),
        );
        assert_eq!(line, "[WARN folio::loader] Skipping projects entry");
    }

    #[test]
    fn test_init_twice() {
        init(LevelFilter::Warn);
        init(LevelFilter::Info);
        assert_eq!(log::max_level(), LevelFilter::Info);
    }
}
