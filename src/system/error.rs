//! Error types
//!
//! Configuration misuse, device registration failures and oversized touch
//! reports go back to callers. Gating rejections on the event path are not
//! errors, and a failed injection only abandons the current wake attempt.

use core::fmt;

/// Rejected write to the enable attribute; the switch is left unchanged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Input was not an integer, or not 0 or 1
    InvalidArgument,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidArgument => f.write_str("invalid argument"),
        }
    }
}

/// Failure to attach to an input device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConnectError {
    /// Device name does not look like a touch panel
    Filtered,
    /// All handle slots are in use
    Exhausted,
}

impl fmt::Display for ConnectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectError::Filtered => f.write_str("not a touch device"),
            ConnectError::Exhausted => f.write_str("no free device handle"),
        }
    }
}

/// Failure of the injection channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InjectError {
    /// The synthetic input device is not available
    ChannelUnavailable,
}

impl fmt::Display for InjectError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InjectError::ChannelUnavailable => f.write_str("injection channel unavailable"),
        }
    }
}

/// Failure to translate a touch controller report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportError {
    /// The report produced more events than one batch holds
    BatchFull,
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::BatchFull => f.write_str("event batch full"),
        }
    }
}
