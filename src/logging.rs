// src/logging.rs
//
// Crate-wide log macros. They go through the `log` facade so the library never
// decides where output lands; the `inspect` binary installs env_logger.

pub use ::log::Level;

/// Internal logging function
pub fn write_log(level: Level, msg: &str) {
    ::log::log!(target: "panel_inspect", level, "{msg}");
}

/// Info-level logging
#[macro_export]
macro_rules! logf {
    ($($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Info, &format!($($arg)*))
    };
}

/// Debug-level logging
#[macro_export]
macro_rules! logd {
    ($($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Debug, &format!($($arg)*))
    };
}

/// Error-level logging
#[macro_export]
macro_rules! loge {
    ($($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Error, &format!($($arg)*))
    };
}
