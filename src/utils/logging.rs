//! Diagnostics sink.
//!
//! All modules log through the `log` facade. In the browser, [`init`]
//! routes records to the developer console; native hosts install whatever
//! logger they already use.

use log::{Level, LevelFilter, Log, Metadata, Record};

/// Forwards `log` records to `console.*`.
pub struct ConsoleLogger {
    level: LevelFilter,
}

impl ConsoleLogger {
    pub const fn new(level: LevelFilter) -> Self {
        Self { level }
    }

    fn format(record: &Record<'_>) -> String {
        format!("[{}] {}", record.target(), record.args())
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        emit(record.level(), &Self::format(record));
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, message: &str) {
    let message = wasm_bindgen::JsValue::from_str(message);
    match level {
        Level::Error => web_sys::console::error_1(&message),
        Level::Warn => web_sys::console::warn_1(&message),
        Level::Info => web_sys::console::info_1(&message),
        Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(level: Level, message: &str) {
    match level {
        Level::Error | Level::Warn => eprintln!("{}", message),
        _ => println!("{}", message),
    }
}

/// Install the console logger and panic hook.
///
/// Safe to call more than once; later calls only adjust the level.
pub fn init(level: LevelFilter) {
    static LOGGER: ConsoleLogger = ConsoleLogger::new(LevelFilter::Trace);

    console_error_panic_hook::set_once();
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
