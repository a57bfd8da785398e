//! Mock display for testing.

use crate::config::ValueFormat;
use crate::controller::SegmentDisplay;
use crate::state::Brightness;

/// A single call received by [`MockDisplay`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayCall {
    /// `set_brightness(level)`
    Brightness(Brightness),
    /// `show_value(tenths, ..)`
    Show(u16),
    /// `clear()`
    Clear,
}

/// A mock segment display for testing.
///
/// Records every call so tests can check what would have been rendered,
/// without any display hardware.
///
/// # Example
///
/// ```
/// use speedo_core::{Brightness, DisplayCall, MockDisplay, SpeedoController};
///
/// let mut speedo = SpeedoController::new(MockDisplay::new());
/// speedo.init();
/// speedo.on();
/// assert_eq!(speedo.display().brightness(), Some(Brightness::Medium));
/// assert_eq!(speedo.display().last_call(), Some(DisplayCall::Show(0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockDisplay {
    calls: Vec<DisplayCall>,
    brightness: Option<Brightness>,
    shown: Option<u16>,
}

impl MockDisplay {
    /// Create a new mock display with no recorded calls.
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls received so far, oldest first.
    pub fn calls(&self) -> &[DisplayCall] {
        &self.calls
    }

    /// The most recent call.
    pub fn last_call(&self) -> Option<DisplayCall> {
        self.calls.last().copied()
    }

    /// The brightness most recently set.
    pub fn brightness(&self) -> Option<Brightness> {
        self.brightness
    }

    /// The value currently lit, or `None` if blank.
    pub fn shown(&self) -> Option<u16> {
        self.shown
    }

    /// Every value rendered, in order.
    pub fn shown_values(&self) -> Vec<u16> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DisplayCall::Show(v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded calls. Current brightness and lit value are kept.
    pub fn reset_calls(&mut self) {
        self.calls.clear();
    }
}

impl SegmentDisplay for MockDisplay {
    fn set_brightness(&mut self, level: Brightness) {
        self.brightness = Some(level);
        self.calls.push(DisplayCall::Brightness(level));
    }

    fn show_value(&mut self, tenths: u16, _format: &ValueFormat) {
        self.shown = Some(tenths);
        self.calls.push(DisplayCall::Show(tenths));
    }

    fn clear(&mut self) {
        self.shown = None;
        self.calls.push(DisplayCall::Clear);
    }
}
