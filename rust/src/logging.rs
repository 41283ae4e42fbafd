//! Verbosity-gated logging for the assignment pass.
//!
//! Nothing is formatted when the configured verbosity is below a macro's level.
//! `SchedulingConfig.verbosity` selects one of:
//! - 0: SILENT
//! - 1: CHANGES (call assignments, gap dates)
//! - 2: CHECKS (why a surgeon was passed over for a date)
//! - 3: DEBUG (pass setup, live weekend minimum)

pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Used for eligibility rejections: spacing, unavailability, weekend quota.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}

/// Clamp a caller-supplied verbosity into the supported range.
pub fn clamp_verbosity(verbosity: u8) -> u8 {
    verbosity.min(VERBOSITY_DEBUG)
}
