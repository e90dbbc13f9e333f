//! Configuration
//!
//! Text attributes for the enable switch and the version, and the start-up
//! parameter that sets the switch before the first event arrives.

use crate::system::error::ConfigError;
use crate::system::state::TouchState;

macro_rules! version {
    () => {
        "2.0"
    };
}

/// Informational version reported by [`VersionAttribute`]
pub const VERSION: &str = version!();

const OFF: i64 = 0;
const ON: i64 = 1;

/// Enable switch as a `"1"`/`"0"` text attribute
pub struct EnableAttribute<'a> {
    state: &'a TouchState,
}

impl<'a> EnableAttribute<'a> {
    pub fn new(state: &'a TouchState) -> Self {
        Self { state }
    }

    /// Current value as ASCII, newline terminated
    pub fn show(&self) -> &'static str {
        if self.state.is_enabled() {
            "1\n"
        } else {
            "0\n"
        }
    }

    /// Parses and applies a write
    ///
    /// Returns the number of bytes consumed, which is always the whole
    /// input. Writing the current value succeeds without touching state.
    pub fn store(&self, input: &str) -> Result<usize, ConfigError> {
        let value = leading_integer(input).ok_or(ConfigError::InvalidArgument)?;
        let current = if self.state.is_enabled() { ON } else { OFF };
        if value == current {
            return Ok(input.len());
        }

        match value {
            OFF | ON => {
                self.state.set_enabled(value == ON);
                info!("Tap-to-wake toggled, enabled={}", value == ON);
                Ok(input.len())
            }
            _ => Err(ConfigError::InvalidArgument),
        }
    }
}

/// Read-only version attribute; writes are accepted and ignored
pub struct VersionAttribute;

impl VersionAttribute {
    pub fn show(&self) -> &'static str {
        concat!(version!(), "\n")
    }

    pub fn store(&self, input: &str) -> usize {
        input.len()
    }
}

/// Parses the optional sign and decimal digits at the start of `input`,
/// after any leading whitespace. Anything after the digits is ignored.
fn leading_integer(input: &str) -> Option<i64> {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();
    let sign_len = match bytes.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    };
    let digits = bytes[sign_len..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return None;
    }
    // Too many digits to fit is still an integer, just not a valid one.
    trimmed[..sign_len + digits]
        .parse::<i64>()
        .ok()
        .or(Some(i64::MAX))
}

/// Resolves the enable switch from the start-up parameter
///
/// Exactly `"1"` enables and exactly `"0"` disables; anything else keeps
/// `default`. Never fails.
pub fn parse_boot_param(arg: &str, default: bool) -> bool {
    match arg {
        "1" => {
            info!("Tap-to-wake enabled at boot, param='{}'", arg);
            true
        }
        "0" => {
            info!("Tap-to-wake disabled at boot, param='{}'", arg);
            false
        }
        _ => {
            info!("No valid boot param, keeping default enabled={}", default);
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_attribute() {
        let state = TouchState::new(false);
        let attr = EnableAttribute::new(&state);

        assert_eq!(attr.store("1"), Ok(1));
        assert_eq!(attr.show(), "1\n");
        assert_eq!(attr.store("0\n"), Ok(2));
        assert_eq!(attr.show(), "0\n");
    }

    #[test]
    fn out_of_range_write_fails_and_keeps_state() {
        let state = TouchState::new(true);
        let attr = EnableAttribute::new(&state);

        assert_eq!(attr.store("2"), Err(ConfigError::InvalidArgument));
        assert_eq!(attr.store("-1"), Err(ConfigError::InvalidArgument));
        assert_eq!(
            attr.store("99999999999999999999999"),
            Err(ConfigError::InvalidArgument)
        );
        assert!(state.is_enabled());
        assert_eq!(attr.show(), "1\n");
    }

    #[test]
    fn non_numeric_write_fails() {
        let state = TouchState::new(true);
        let attr = EnableAttribute::new(&state);

        assert_eq!(attr.store(""), Err(ConfigError::InvalidArgument));
        assert_eq!(attr.store("on"), Err(ConfigError::InvalidArgument));
        assert_eq!(attr.store("-"), Err(ConfigError::InvalidArgument));
        assert!(state.is_enabled());
    }

    #[test]
    fn writing_the_current_value_is_a_successful_no_op() {
        let state = TouchState::new(true);
        let attr = EnableAttribute::new(&state);

        assert_eq!(attr.store("1\n"), Ok(2));
        assert!(state.is_enabled());
    }

    #[test]
    fn tolerates_whitespace_and_trailing_text() {
        let state = TouchState::new(true);
        let attr = EnableAttribute::new(&state);

        assert_eq!(attr.store("  0 please"), Ok(10));
        assert!(!state.is_enabled());
        assert_eq!(attr.store("+1"), Ok(2));
        assert!(state.is_enabled());
    }

    #[test]
    fn version_is_static() {
        let attr = VersionAttribute;
        assert_eq!(VERSION, "2.0");
        assert_eq!(attr.store("3.0"), 3);
        assert_eq!(attr.show(), "2.0\n");
    }

    #[test]
    fn version_attribute_tracks_the_constant() {
        let shown = VersionAttribute.show();
        assert_eq!(shown.strip_suffix('\n'), Some(VERSION));
    }

    #[test]
    fn boot_param_falls_back_to_default() {
        assert!(parse_boot_param("1", false));
        assert!(!parse_boot_param("0", true));
        assert!(parse_boot_param("yes", true));
        assert!(!parse_boot_param("", false));
        assert!(!parse_boot_param(" 1", false));
    }
}
