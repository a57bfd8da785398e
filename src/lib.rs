//! Animated speedometer for 7-segment displays.
//!
//! This crate drives a decorative "time machine" speedometer: a 0-88 reading
//! shown to a tenth on a small LED display, with steady, bright, blinking and
//! animated move-to modes. It is hardware-agnostic; anything implementing
//! [`SegmentDisplay`] can be driven.
//!
//! # Example
//!
//! ```
//! use speedo_core::{MockDisplay, SpeedoController, SpeedoState};
//!
//! let mut speedo = SpeedoController::new(MockDisplay::new());
//! speedo.init();
//! speedo.on();
//!
//! // Sweep up to 88 over roughly four seconds
//! speedo.move_to(88, 4000, 0);
//!
//! // Host loop: poll with the current monotonic time
//! let mut now = 0;
//! while speedo.state() == SpeedoState::Moving {
//!     now += 5;
//!     speedo.tick(now);
//! }
//! assert_eq!(speedo.units(), 88);
//!
//! // Flash the display, then settle back to steady on
//! speedo.blink(now);
//! for _ in 0..400 {
//!     now += 5;
//!     speedo.tick(now);
//! }
//! assert_eq!(speedo.state(), SpeedoState::On);
//! ```
//!
//! # Timing
//!
//! Nothing in this crate reads a clock or sleeps. Every time-dependent call
//! takes the current monotonic time in milliseconds, and [`SpeedoController::tick`]
//! advances at most one step per call.
//!
//! # Testing
//!
//! Use [`MockDisplay`] to check what would have been rendered:
//!
//! ```
//! use speedo_core::{DisplayCall, MockDisplay, SpeedoController};
//!
//! let mut speedo = SpeedoController::new(MockDisplay::new());
//! speedo.set_value(42);
//! assert_eq!(speedo.display().last_call(), Some(DisplayCall::Show(420)));
//! ```

#![warn(missing_docs)]

mod blink;
mod config;
mod controller;
mod error;
mod mock;
mod schedule;
mod state;

// Re-export public API
pub use blink::{BlinkPhase, BlinkStep, DEFAULT_BLINK_PATTERN, pattern_duration_ms};
pub use config::{MAX_TENTHS, MIN_TENTHS, SpeedoConfig, ValueFormat};
pub use controller::{SegmentDisplay, SpeedoController};
pub use error::SpeedoError;
pub use mock::{DisplayCall, MockDisplay};
pub use schedule::MoveSchedule;
pub use state::{Brightness, SpeedoSnapshot, SpeedoState};

#[cfg(test)]
mod tests {
    use super::*;

    fn started() -> SpeedoController<MockDisplay> {
        let mut speedo = SpeedoController::new(MockDisplay::new());
        speedo.init();
        speedo.on();
        speedo.display_mut().reset_calls();
        speedo
    }

    #[test]
    fn test_new_controller_is_off() {
        let speedo = SpeedoController::new(MockDisplay::new());
        assert_eq!(speedo.state(), SpeedoState::Off);
        assert_eq!(speedo.value(), 0);
        assert_eq!(speedo.snapshot(), SpeedoSnapshot::default());
        assert!(speedo.display().calls().is_empty());
    }

    #[test]
    fn test_init_sets_low_and_clears() {
        let mut speedo = SpeedoController::new(MockDisplay::new());
        speedo.init();
        assert_eq!(
            speedo.display().calls(),
            &[DisplayCall::Brightness(Brightness::Low), DisplayCall::Clear]
        );
        assert_eq!(speedo.state(), SpeedoState::Off);
    }

    #[test]
    fn test_on_always_renders() {
        let mut speedo = started();
        speedo.on();
        speedo.on();
        assert_eq!(
            speedo.display().calls(),
            &[
                DisplayCall::Brightness(Brightness::Medium),
                DisplayCall::Show(0),
                DisplayCall::Brightness(Brightness::Medium),
                DisplayCall::Show(0),
            ]
        );
        assert_eq!(speedo.state(), SpeedoState::On);
    }

    #[test]
    fn test_set_value_in_range() {
        let mut speedo = started();
        for units in [0, 1, 42, 88] {
            speedo.set_value(units);
            assert_eq!(speedo.value(), units as u16 * 10);
            assert_eq!(speedo.display().shown(), Some(units as u16 * 10));
        }
        assert_eq!(speedo.units(), 88);
        // brightness untouched
        assert!(
            !speedo
                .display()
                .calls()
                .iter()
                .any(|c| matches!(c, DisplayCall::Brightness(_)))
        );
    }

    #[test]
    fn test_set_value_out_of_range_is_ignored() {
        let mut speedo = started();
        speedo.set_value(30);
        speedo.display_mut().reset_calls();

        for units in [-1, 89, 1000, i32::MIN, i32::MAX] {
            speedo.set_value(units);
        }
        assert_eq!(speedo.value(), 300);
        assert!(speedo.display().calls().is_empty());
    }

    #[test]
    fn test_move_to_reference_timing() {
        let mut speedo = started();
        speedo.move_to(50, 1000, 0);

        let snap = speedo.snapshot();
        assert_eq!(snap.state, SpeedoState::Moving);
        assert_eq!(snap.target, 500);
        assert_eq!(snap.step_increment, 9);
        assert_eq!(snap.step_interval_ms, 18);

        let mut steps = 0;
        let mut now = 0;
        while speedo.state() == SpeedoState::Moving {
            now += 18;
            speedo.tick(now);
            steps += 1;
        }
        assert_eq!(steps, 56);
        assert_eq!(speedo.value(), 500);
        assert_eq!(speedo.state(), SpeedoState::On);
        assert_eq!(speedo.brightness(), Brightness::Medium);
        assert_eq!(speedo.snapshot().step_increment, 0);
    }

    #[test]
    fn test_move_waits_for_interval() {
        let mut speedo = started();
        speedo.move_to(50, 1000, 100);

        speedo.tick(117);
        assert_eq!(speedo.value(), 0);
        speedo.tick(118);
        assert_eq!(speedo.value(), 9);
        // one step per tick even when far behind
        speedo.tick(10_000);
        assert_eq!(speedo.value(), 18);
        assert_eq!(speedo.snapshot().last_tick_ms, 136);
    }

    #[test]
    fn test_move_down_never_overshoots() {
        let mut speedo = started();
        speedo.set_value(80);
        speedo.display_mut().reset_calls();
        speedo.move_to(12, 3000, 0);
        assert!(speedo.snapshot().step_increment < 0);

        let mut now = 0;
        while speedo.state() == SpeedoState::Moving {
            now += 1;
            speedo.tick(now);
        }
        let shown = speedo.display().shown_values();
        assert!(shown.windows(2).all(|w| w[0] >= w[1]));
        assert!(shown.iter().all(|&v| v >= 120));
        assert_eq!(speedo.value(), 120);
    }

    #[test]
    fn test_move_to_clamps_target() {
        let mut speedo = started();
        speedo.move_to(120, 500, 0);
        assert_eq!(speedo.target(), 880);

        speedo.set_value(10);
        speedo.move_to(-5, 500, 0);
        assert_eq!(speedo.target(), 0);
    }

    #[test]
    fn test_move_to_current_value_is_noop() {
        let mut speedo = started();
        speedo.set_value(20);
        speedo.display_mut().reset_calls();

        speedo.move_to(20, 1000, 0);
        assert_eq!(speedo.state(), SpeedoState::On);
        assert!(speedo.display().calls().is_empty());
    }

    #[test]
    fn test_move_to_current_value_settles_running_move() {
        let mut speedo = started();
        speedo.move_to(88, 1000, 0);
        speedo.tick(20);
        assert_eq!(speedo.value(), 9);

        // jump mid-move, then aim at what is shown: nothing left to animate
        speedo.set_value(5);
        assert_eq!(speedo.state(), SpeedoState::Moving);
        speedo.move_to(5, 1000, 20);
        assert_eq!(speedo.state(), SpeedoState::On);
        assert_eq!(speedo.value(), 50);
        assert_eq!(speedo.display().shown(), Some(50));
    }

    #[test]
    fn test_zero_duration_move_one_step_per_tick() {
        let mut speedo = started();
        speedo.move_to(9, 0, 0);
        assert_eq!(speedo.snapshot().step_interval_ms, 0);

        speedo.tick(0);
        assert_eq!(speedo.value(), 9);
        assert_eq!(speedo.state(), SpeedoState::Moving);
        speedo.tick(0);
        assert_eq!(speedo.value(), 18);
    }

    #[test]
    fn test_brighten_reverts_after_duration() {
        let mut speedo = started();
        speedo.set_value(88);
        speedo.brighten(500, 1000);
        assert_eq!(speedo.state(), SpeedoState::Bright);
        assert_eq!(speedo.display().brightness(), Some(Brightness::High));
        assert_eq!(speedo.display().shown(), Some(880));

        speedo.tick(1499);
        assert_eq!(speedo.state(), SpeedoState::Bright);

        speedo.tick(1500);
        assert_eq!(speedo.state(), SpeedoState::On);
        assert_eq!(speedo.display().brightness(), Some(Brightness::Medium));
    }

    #[test]
    fn test_brighten_zero_duration() {
        let mut speedo = started();
        speedo.brighten(0, 50);
        speedo.tick(50);
        assert_eq!(speedo.state(), SpeedoState::On);
    }

    #[test]
    fn test_blink_runs_full_pattern() {
        let mut speedo = started();
        speedo.set_value(88);
        speedo.display_mut().reset_calls();

        speedo.blink(0);
        assert_eq!(speedo.state(), SpeedoState::Blinking);
        assert_eq!(speedo.display().last_call(), Some(DisplayCall::Clear));

        let mut now = 0;
        for (i, phase) in DEFAULT_BLINK_PATTERN.iter().enumerate() {
            // not due yet
            speedo.tick(now + u64::from(phase.duration_ms) - 1);
            assert_eq!(speedo.snapshot().blink_phase, i);

            now += u64::from(phase.duration_ms);
            speedo.tick(now);
        }

        assert_eq!(speedo.state(), SpeedoState::On);
        assert_eq!(speedo.snapshot().blink_phase, 0);
        assert_eq!(speedo.display().last_call(), Some(DisplayCall::Show(880)));
        assert_eq!(speedo.display().brightness(), Some(Brightness::Medium));
    }

    #[test]
    fn test_blink_phase_rendering() {
        let mut speedo = started();
        speedo.set_value(12);
        speedo.blink(0);

        // phase 1 is low
        speedo.tick(50);
        assert_eq!(speedo.display().brightness(), Some(Brightness::Low));
        assert_eq!(speedo.display().shown(), Some(120));

        // phase 2 is off
        speedo.tick(450);
        assert_eq!(speedo.display().shown(), None);
    }

    #[test]
    fn test_custom_blink_pattern() {
        let config = SpeedoConfig {
            blink_pattern: vec![BlinkPhase::new(10, BlinkStep::High)],
            ..Default::default()
        };
        let mut speedo = SpeedoController::with_config(MockDisplay::new(), config).unwrap();
        speedo.blink(0);
        assert_eq!(speedo.brightness(), Brightness::High);
        speedo.tick(10);
        assert_eq!(speedo.state(), SpeedoState::On);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SpeedoConfig {
            blink_pattern: Vec::new(),
            ..Default::default()
        };
        let err = SpeedoController::with_config(MockDisplay::new(), config).unwrap_err();
        assert_eq!(err, SpeedoError::EmptyBlinkPattern);
    }

    #[test]
    fn test_commands_cancel_move() {
        let mut speedo = started();
        speedo.move_to(88, 1000, 0);
        speedo.tick(11);
        speedo.brighten(100, 11);
        assert_eq!(speedo.state(), SpeedoState::Bright);
        assert_eq!(speedo.snapshot().step_increment, 0);
        assert_eq!(speedo.target(), speedo.value());

        speedo.move_to(88, 1000, 20);
        speedo.blink(30);
        assert_eq!(speedo.state(), SpeedoState::Blinking);
        assert_eq!(speedo.snapshot().step_interval_ms, 0);
    }

    #[test]
    fn test_off_resets_from_any_state() {
        let mut speedo = started();

        speedo.move_to(60, 1000, 0);
        speedo.tick(500);
        speedo.off();
        assert_eq!(speedo.state(), SpeedoState::Off);
        assert_eq!(speedo.value(), 0);
        assert_eq!(speedo.display().shown(), None);

        speedo.set_value(40);
        speedo.blink(0);
        speedo.off();
        assert_eq!(speedo.value(), 0);

        speedo.set_value(40);
        speedo.brighten(1000, 0);
        speedo.off();
        let snap = speedo.snapshot();
        assert_eq!(snap.state, SpeedoState::Off);
        assert_eq!(snap.value, 0);
        assert_eq!(snap.last_tick_ms, 0);
        assert_eq!(snap.bright_duration_ms, 0);

        // nothing happens on tick while off
        speedo.display_mut().reset_calls();
        speedo.tick(u64::MAX);
        assert!(speedo.display().calls().is_empty());
    }

    #[test]
    fn test_deadline_near_clock_end_does_not_overflow() {
        let mut speedo = started();
        speedo.brighten(u32::MAX, u64::MAX - 10);
        speedo.tick(u64::MAX);
        assert_eq!(speedo.state(), SpeedoState::On);
    }

    #[test]
    fn test_brightness_levels() {
        assert_eq!(Brightness::Low.level(), 0);
        assert_eq!(Brightness::Medium.level(), 2);
        assert_eq!(Brightness::High.level(), 5);
    }

    #[test]
    fn test_borrowed_display() {
        let mut display = MockDisplay::new();
        {
            let mut speedo = SpeedoController::new(&mut display);
            speedo.set_value(7);
        }
        assert_eq!(display.shown(), Some(70));
    }
}
