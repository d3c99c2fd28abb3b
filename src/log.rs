//! Switchable logging for the inspector.
//!
//! All crate logs go through the `fv_*` macros, which are no-op while logging is disabled.
//! Two targets are in use: [`INSPECTOR`] for value and tree events, [`BACKEND`]
//! for request traffic.

use std::sync::atomic::{AtomicBool, Ordering};

pub const INSPECTOR: &str = "inspector";
pub const BACKEND: &str = "backend";

static ENABLED: AtomicBool = AtomicBool::new(true);

#[inline(always)]
pub fn is_enabled() -> bool {
    ENABLED.load(Ordering::SeqCst)
}

pub fn disable() {
    ENABLED.store(false, Ordering::SeqCst)
}

pub fn enable() {
    ENABLED.store(true, Ordering::SeqCst)
}

#[macro_export]
macro_rules! fv_info {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::log::is_enabled() {
            ::log::info!(target: $target, $($arg)+)
        }
    };
    ($($arg:tt)+) => {
        if $crate::log::is_enabled() {
            ::log::info!(target: $crate::log::INSPECTOR, $($arg)+)
        }
    };
}

#[macro_export]
macro_rules! fv_warn {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::log::is_enabled() {
            ::log::warn!(target: $target, $($arg)+)
        }
    };
    ($($arg:tt)+) => {
        if $crate::log::is_enabled() {
            ::log::warn!(target: $crate::log::INSPECTOR, $($arg)+)
        }
    };
}

#[macro_export]
macro_rules! fv_error {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::log::is_enabled() {
            ::log::error!(target: $target, $($arg)+)
        }
    };
    ($($arg:tt)+) => {
        if $crate::log::is_enabled() {
            ::log::error!(target: $crate::log::INSPECTOR, $($arg)+)
        }
    };
}

#[macro_export]
macro_rules! fv_debug {
    (target: $target:expr, $($arg:tt)+) => {
        if $crate::log::is_enabled() {
            ::log::debug!(target: $target, $($arg)+)
        }
    };
    ($($arg:tt)+) => {
        if $crate::log::is_enabled() {
            ::log::debug!(target: $crate::log::INSPECTOR, $($arg)+)
        }
    };
}
