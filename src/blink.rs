//! Blink pattern definitions.

use crate::error::SpeedoError;
use crate::state::Brightness;

// =============================================================================
// Blink Step
// =============================================================================

/// What the display shows during one blink phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlinkStep {
    /// Display cleared.
    Off,
    /// Value shown at [`Brightness::Low`].
    Low,
    /// Value shown at [`Brightness::Medium`].
    Medium,
    /// Value shown at [`Brightness::High`].
    High,
}

impl BlinkStep {
    /// Brightness for this step, or `None` when the display is blanked.
    pub const fn brightness(self) -> Option<Brightness> {
        match self {
            BlinkStep::Off => None,
            BlinkStep::Low => Some(Brightness::Low),
            BlinkStep::Medium => Some(Brightness::Medium),
            BlinkStep::High => Some(Brightness::High),
        }
    }
}

impl TryFrom<u8> for BlinkStep {
    type Error = SpeedoError;

    /// Decode the 0-3 step codes used by the original device tables.
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(BlinkStep::Off),
            1 => Ok(BlinkStep::Low),
            2 => Ok(BlinkStep::Medium),
            3 => Ok(BlinkStep::High),
            other => Err(SpeedoError::InvalidBlinkStep(other)),
        }
    }
}

// =============================================================================
// Blink Phase
// =============================================================================

/// One entry in a blink pattern: hold `step` for `duration_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkPhase {
    /// How long this phase lasts.
    pub duration_ms: u32,
    /// What to show while it lasts.
    pub step: BlinkStep,
}

impl BlinkPhase {
    /// Create a new phase.
    pub const fn new(duration_ms: u32, step: BlinkStep) -> Self {
        Self { duration_ms, step }
    }
}

// =============================================================================
// Default Pattern
// =============================================================================

/// The flicker sequence shown by [`SpeedoController::blink`](crate::SpeedoController::blink).
///
/// Roughly 1.7 seconds of uneven low/medium/high flashes, after which the
/// controller returns to steady on.
pub const DEFAULT_BLINK_PATTERN: [BlinkPhase; 11] = [
    BlinkPhase::new(50, BlinkStep::Off),
    BlinkPhase::new(400, BlinkStep::Low),
    BlinkPhase::new(100, BlinkStep::Off),
    BlinkPhase::new(200, BlinkStep::Low),
    BlinkPhase::new(140, BlinkStep::Medium),
    BlinkPhase::new(100, BlinkStep::High),
    BlinkPhase::new(200, BlinkStep::Off),
    BlinkPhase::new(200, BlinkStep::Low),
    BlinkPhase::new(150, BlinkStep::Medium),
    BlinkPhase::new(100, BlinkStep::High),
    BlinkPhase::new(100, BlinkStep::Medium),
];

/// Total length of a pattern in milliseconds.
pub fn pattern_duration_ms(pattern: &[BlinkPhase]) -> u64 {
    pattern.iter().map(|p| u64::from(p.duration_ms)).sum()
}
