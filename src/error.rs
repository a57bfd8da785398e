//! Error types for the speedometer controller.

/// Errors that can occur when configuring the speedometer controller.
///
/// Runtime commands never fail: out-of-range values are rejected or clamped
/// silently. Only configuration is checked.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpeedoError {
    /// The blink pattern has no phases.
    #[error("Blink pattern must contain at least one phase")]
    EmptyBlinkPattern,

    /// The display digit count was outside the supported range.
    #[error("Invalid digit count {digits} (expected {min}-{max})")]
    InvalidDigits {
        /// The invalid value provided.
        digits: u8,
        /// Minimum allowed value.
        min: u8,
        /// Maximum allowed value.
        max: u8,
    },

    /// A raw blink step code did not name a known step.
    #[error("Invalid blink step code {0} (expected 0-3)")]
    InvalidBlinkStep(u8),
}
