// Copyright 2025 Zurich Instruments AG
// SPDX-License-Identifier: Apache-2.0

//! Logging macros of the AWG sequence compiler.
//!
//! All records go through the `log` facade under the target
//! `awg.rust::<module path>`, so a host application can filter the whole
//! compiler with one prefix. No logger is installed here.
//!
//! | Macro | Level | Emitted for |
//! |---|---|---|
//! | [`info!`] | info | one summary per decoded hardware wave sequence |
//! | [`warn!`] | warn | waves that sample to nothing, zero-padded IQ channels |
//! | [`diagnostic!`] | debug | samples per cycle, byte counts of serialized sequences, per-step RAM decoding |
//!
//! [`diagnostic!`] records are dropped unless enabled with [`init_logging`].

use std::sync::{atomic::AtomicBool, atomic::Ordering};

// Lets the exported macros resolve `awg_log::` inside this crate's tests.
extern crate self as awg_log;

#[doc(hidden)]
pub use log as _log;

/// Prefix of every log target.
pub const TARGET_PREFIX: &str = "awg.rust::";

#[macro_export]
macro_rules! info {
    ($msg:literal, $($arg:tt)+) => {
        awg_log::_log::info!(target: concat!("awg.rust::", module_path!()), $msg, $($arg)+);
    };
    ($msg:literal) => {
        awg_log::_log::info!(target: concat!("awg.rust::", module_path!()), $msg);
    };
}

#[macro_export]
macro_rules! warn {
    ($msg:literal, $($arg:tt)+) => {
        awg_log::_log::warn!(target: concat!("awg.rust::", module_path!()), $msg, $($arg)+);
    };
    ($msg:literal) => {
        awg_log::_log::warn!(target: concat!("awg.rust::", module_path!()), $msg);
    };
}

/// Log a diagnostic message at debug level if diagnostics logging is enabled.
///
/// Diagnostics cover the per-step details of sampling, serialization and RAM
/// decoding, which are too verbose for regular operation.
#[macro_export]
macro_rules! diagnostic {
    ($msg:literal, $($arg:tt)+) => {
        if awg_log::is_diagnostics_enabled() {
            awg_log::_log::debug!(target: concat!("awg.rust::", module_path!()), $msg, $($arg)+);
        }
    };
    ($msg:literal) => {
        if awg_log::is_diagnostics_enabled() {
            awg_log::_log::debug!(target: concat!("awg.rust::", module_path!()), $msg);
        }
    };
}

static DIAGNOSTICS_ENABLED: AtomicBool = AtomicBool::new(false);

#[inline]
pub fn is_diagnostics_enabled() -> bool {
    DIAGNOSTICS_ENABLED.load(Ordering::Acquire)
}

/// Sets whether [`diagnostic!`] records are emitted.
///
/// Meant to be called by the host application after it has installed its own
/// `log` backend.
pub fn init_logging(with_diagnostics: bool) {
    DIAGNOSTICS_ENABLED.store(with_diagnostics, Ordering::Release);
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata, Record};
    use std::sync::Mutex;

    struct RecordingLogger(Mutex<Vec<(Level, String, String)>>);

    impl Log for RecordingLogger {
        fn enabled(&self, _: &Metadata<'_>) -> bool {
            true
        }

        fn log(&self, record: &Record<'_>) {
            self.0.lock().unwrap().push((
                record.level(),
                record.target().to_string(),
                record.args().to_string(),
            ));
        }

        fn flush(&self) {}
    }

    static LOGGER: RecordingLogger = RecordingLogger(Mutex::new(Vec::new()));

    // One test, since the logger and the diagnostics switch are process-wide.
    #[test]
    fn test_targets_and_diagnostics_switch() {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(log::LevelFilter::Trace);

        init_logging(false);
        assert!(!is_diagnostics_enabled());
        diagnostic!("dropped {}", 1);
        warn!("padded {} samples", 2);

        init_logging(true);
        assert!(is_diagnostics_enabled());
        diagnostic!("decoded step {}", 3);
        info!("done");
        init_logging(false);

        let records = LOGGER.0.lock().unwrap().clone();
        let target = format!("{TARGET_PREFIX}{}", module_path!());
        assert_eq!(
            records,
            vec![
                (Level::Warn, target.clone(), "padded 2 samples".to_string()),
                (Level::Debug, target.clone(), "decoded step 3".to_string()),
                (Level::Info, target, "done".to_string()),
            ]
        );
    }
}
