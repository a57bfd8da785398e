//! Controller state and snapshot types.

/// Behavioral mode of the speedometer.
///
/// Exactly one mode holds at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SpeedoState {
    /// Display blank, value reset to zero.
    #[default]
    Off,
    /// Steady display at medium brightness.
    On,
    /// Temporarily at high brightness, reverts to [`SpeedoState::On`].
    Bright,
    /// Running the blink pattern, reverts to [`SpeedoState::On`].
    Blinking,
    /// Animating towards a target value, settles to [`SpeedoState::On`].
    Moving,
}

/// Display brightness requested from the sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Brightness {
    /// Dim, used by `init` and the blink pattern.
    #[default]
    Low,
    /// Normal "on" brightness.
    Medium,
    /// Used by `brighten` and the blink pattern.
    High,
}

impl Brightness {
    /// Raw TM1637-style driver level (0-7 scale).
    pub const fn level(self) -> u8 {
        match self {
            Brightness::Low => 0,
            Brightness::Medium => 2,
            Brightness::High => 5,
        }
    }
}

/// A snapshot of the controller's current state.
///
/// Use [`SpeedoController::snapshot`](crate::SpeedoController::snapshot) to obtain one.
/// Timing fields are zero when they don't apply to the current mode.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeedoSnapshot {
    /// The current mode.
    pub state: SpeedoState,
    /// The displayed value in tenths (0-880).
    pub value: u16,
    /// Destination of the current move in tenths. Equals `value` when not moving.
    pub target: u16,
    /// Signed per-step delta in tenths (0 when not moving).
    pub step_increment: i16,
    /// Milliseconds between move steps (0 when not moving).
    pub step_interval_ms: u32,
    /// Timestamp of the last state-relevant update.
    pub last_tick_ms: u64,
    /// Length of the current bright episode.
    pub bright_duration_ms: u32,
    /// Index into the blink pattern.
    pub blink_phase: usize,
    /// Last brightness pushed to the display.
    pub brightness: Brightness,
}
