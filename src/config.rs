//! Controller configuration.

use crate::blink::{BlinkPhase, DEFAULT_BLINK_PATTERN};
use crate::error::SpeedoError;

/// Largest displayed value, in tenths (88.0).
pub const MAX_TENTHS: u16 = 880;

/// Smallest displayed value, in tenths.
pub const MIN_TENTHS: u16 = 0;

const MIN_DIGITS: u8 = 1;
const MAX_DIGITS: u8 = 4;

/// How a display should render a value.
///
/// Handed to [`SegmentDisplay::show_value`](crate::SegmentDisplay::show_value)
/// with every render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueFormat {
    /// Number of digits to light, starting from the left.
    pub digits: u8,
    /// Pad with zeros instead of blanks ("05.0" rather than " 5.0").
    pub leading_zeros: bool,
    /// Light the dot after the second digit so tenths read as a fraction.
    pub decimal_point: bool,
}

impl Default for ValueFormat {
    fn default() -> Self {
        Self {
            digits: 3,
            leading_zeros: true,
            decimal_point: true,
        }
    }
}

impl ValueFormat {
    /// Create a new format.
    ///
    /// # Errors
    /// Returns an error if `digits` is not in range 1-4.
    pub fn new(digits: u8, leading_zeros: bool, decimal_point: bool) -> Result<Self, SpeedoError> {
        let format = Self {
            digits,
            leading_zeros,
            decimal_point,
        };
        format.validate()?;
        Ok(format)
    }

    fn validate(&self) -> Result<(), SpeedoError> {
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&self.digits) {
            return Err(SpeedoError::InvalidDigits {
                digits: self.digits,
                min: MIN_DIGITS,
                max: MAX_DIGITS,
            });
        }
        Ok(())
    }
}

/// Speedometer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedoConfig {
    /// Render format passed to the display.
    pub format: ValueFormat,
    /// Phases run by `blink`, in order.
    pub blink_pattern: Vec<BlinkPhase>,
}

impl Default for SpeedoConfig {
    fn default() -> Self {
        Self {
            format: ValueFormat::default(),
            blink_pattern: DEFAULT_BLINK_PATTERN.to_vec(),
        }
    }
}

impl SpeedoConfig {
    /// Check that the configuration can drive a controller.
    ///
    /// # Errors
    /// - [`SpeedoError::EmptyBlinkPattern`] if the blink pattern has no phases
    /// - [`SpeedoError::InvalidDigits`] if the digit count is out of range
    pub fn validate(&self) -> Result<(), SpeedoError> {
        if self.blink_pattern.is_empty() {
            return Err(SpeedoError::EmptyBlinkPattern);
        }
        self.format.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = SpeedoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.blink_pattern.len(), 11);
        assert_eq!(config.format.digits, 3);
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let config = SpeedoConfig {
            blink_pattern: Vec::new(),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(SpeedoError::EmptyBlinkPattern));
    }

    #[test]
    fn test_digits_range() {
        assert!(ValueFormat::new(4, false, false).is_ok());
        assert_eq!(
            ValueFormat::new(0, true, true),
            Err(SpeedoError::InvalidDigits {
                digits: 0,
                min: 1,
                max: 4
            })
        );
        assert!(ValueFormat::new(5, true, true).is_err());
    }
}
