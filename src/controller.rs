//! Speedometer controller implementation.

use crate::blink::BlinkPhase;
use crate::config::{MAX_TENTHS, MIN_TENTHS, SpeedoConfig, ValueFormat};
use crate::error::SpeedoError;
use crate::schedule::MoveSchedule;
use crate::state::{Brightness, SpeedoSnapshot, SpeedoState};

use log::{debug, trace};

// =============================================================================
// Segment Display Trait
// =============================================================================

/// Trait for the display the speedometer renders to.
///
/// Implemented by hardware drivers (e.g. a TM1637 4-digit module) and by
/// [`MockDisplay`](crate::MockDisplay) in tests. Calls must not block.
pub trait SegmentDisplay {
    /// Set the display brightness.
    fn set_brightness(&mut self, level: Brightness);

    /// Show a value given in tenths (0-880), using only the leftmost
    /// `format.digits` digits.
    fn show_value(&mut self, tenths: u16, format: &ValueFormat);

    /// Blank all segments.
    fn clear(&mut self);
}

impl<D: SegmentDisplay + ?Sized> SegmentDisplay for &mut D {
    fn set_brightness(&mut self, level: Brightness) {
        (**self).set_brightness(level);
    }

    fn show_value(&mut self, tenths: u16, format: &ValueFormat) {
        (**self).show_value(tenths, format);
    }

    fn clear(&mut self) {
        (**self).clear();
    }
}

// =============================================================================
// SpeedoController
// =============================================================================

/// The speedometer state machine.
///
/// Holds the displayed value and drives the display through five modes:
/// off, on, bright, blinking and moving. Commands change mode immediately;
/// [`tick`](Self::tick) must be called from the host loop to advance the
/// time-based modes. Nothing here blocks or reads a clock: every
/// time-dependent call takes the current monotonic time in milliseconds.
///
/// # Example
///
/// ```
/// use speedo_core::{MockDisplay, SpeedoController, SpeedoState};
///
/// let mut speedo = SpeedoController::new(MockDisplay::new());
/// speedo.init();
/// speedo.on();
/// speedo.move_to(88, 2000, 0);
/// assert_eq!(speedo.state(), SpeedoState::Moving);
///
/// let mut now = 0;
/// while speedo.state() == SpeedoState::Moving {
///     now += 10;
///     speedo.tick(now);
/// }
/// assert_eq!(speedo.value(), 880);
/// ```
#[derive(Debug)]
pub struct SpeedoController<D: SegmentDisplay> {
    display: D,
    config: SpeedoConfig,
    state: SpeedoState,
    value: u16,
    target: u16,
    schedule: Option<MoveSchedule>,
    last_tick_ms: u64,
    bright_duration_ms: u32,
    blink_phase: usize,
    brightness: Brightness,
}

impl<D: SegmentDisplay> SpeedoController<D> {
    /// Create a controller with the default configuration.
    ///
    /// The controller starts [`SpeedoState::Off`] with value 0. Call
    /// [`init`](Self::init) before anything else.
    pub fn new(display: D) -> Self {
        Self::build(display, SpeedoConfig::default())
    }

    /// Create a controller with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns the first problem found by [`SpeedoConfig::validate`].
    pub fn with_config(display: D, config: SpeedoConfig) -> Result<Self, SpeedoError> {
        config.validate()?;
        Ok(Self::build(display, config))
    }

    fn build(display: D, config: SpeedoConfig) -> Self {
        Self {
            display,
            config,
            state: SpeedoState::Off,
            value: 0,
            target: 0,
            schedule: None,
            last_tick_ms: 0,
            bright_duration_ms: 0,
            blink_phase: 0,
            brightness: Brightness::Low,
        }
    }

    /// Put the display into a known state: low brightness, blank.
    pub fn init(&mut self) {
        debug!("init");
        self.set_brightness(Brightness::Low);
        self.display.clear();
    }

    /// Show the current value steadily at medium brightness.
    ///
    /// Always renders, even when already on. Cancels any running
    /// bright, blink or move episode.
    pub fn on(&mut self) {
        debug!("on: value={}", self.value);
        self.cancel_move();
        self.set_brightness(Brightness::Medium);
        self.state = SpeedoState::On;
        self.render();
    }

    /// Show the current value at high brightness for `duration_ms`, then
    /// return to [`on`](Self::on).
    pub fn brighten(&mut self, duration_ms: u32, now_ms: u64) {
        debug!("brighten: duration={}ms", duration_ms);
        self.cancel_move();
        self.last_tick_ms = now_ms;
        self.set_brightness(Brightness::High);
        self.state = SpeedoState::Bright;
        self.bright_duration_ms = duration_ms;
        self.render();
    }

    /// Run the blink pattern once, then return to [`on`](Self::on).
    pub fn blink(&mut self, now_ms: u64) {
        debug!("blink: {} phases", self.config.blink_pattern.len());
        self.cancel_move();
        self.last_tick_ms = now_ms;
        self.state = SpeedoState::Blinking;
        self.blink_phase = 0;
        match self.config.blink_pattern.first().copied() {
            Some(phase) => self.apply_blink_phase(phase),
            None => self.on(),
        }
    }

    /// Blank the display and reset the value and all timing to zero.
    pub fn off(&mut self) {
        debug!("off");
        self.display.clear();
        self.state = SpeedoState::Off;
        self.value = 0;
        self.target = 0;
        self.schedule = None;
        self.last_tick_ms = 0;
        self.bright_duration_ms = 0;
        self.blink_phase = 0;
    }

    /// Set the displayed value in whole units (0-88) and render it at the
    /// current brightness.
    ///
    /// Out-of-range values are ignored. The mode is left unchanged.
    pub fn set_value(&mut self, units: i32) {
        let tenths = i64::from(units) * 10;
        if !(i64::from(MIN_TENTHS)..=i64::from(MAX_TENTHS)).contains(&tenths) {
            debug!("set_value: {} out of range, ignored", units);
            return;
        }

        self.value = tenths as u16;
        if self.state != SpeedoState::Moving {
            self.target = self.value;
        }
        debug!("set_value: value={}", self.value);
        self.render();
    }

    /// Animate from the current value to `units` (clamped to 0-88) over
    /// roughly `duration_ms`.
    ///
    /// A move to the value already shown does not start an episode; if a
    /// move was running it settles to [`on`](Self::on) instead.
    pub fn move_to(&mut self, units: i32, duration_ms: u32, now_ms: u64) {
        let target = clamp_tenths(units);

        let Some(schedule) = MoveSchedule::compute(self.value, target, duration_ms) else {
            debug!("move_to: already at {}", target);
            if self.state == SpeedoState::Moving {
                self.on();
            }
            return;
        };

        debug!(
            "move_to: {} -> {} over {}ms (step={}, interval={}ms)",
            self.value, target, duration_ms, schedule.step_increment, schedule.step_interval_ms
        );
        self.last_tick_ms = now_ms;
        self.target = target;
        self.schedule = Some(schedule);
        self.state = SpeedoState::Moving;
    }

    /// Advance time-based modes. Call from the host loop as often as
    /// possible.
    ///
    /// Performs at most one step per call. Deadlines are re-based by the
    /// fixed interval rather than to `now_ms`, so a slow loop lags behind
    /// but never skips a step.
    pub fn tick(&mut self, now_ms: u64) {
        match self.state {
            SpeedoState::Blinking => self.tick_blink(now_ms),
            SpeedoState::Moving => self.tick_move(now_ms),
            SpeedoState::Bright => {
                let due = self
                    .last_tick_ms
                    .saturating_add(u64::from(self.bright_duration_ms));
                if now_ms >= due {
                    debug!("bright episode over");
                    self.on();
                }
            }
            SpeedoState::On | SpeedoState::Off => {}
        }
    }

    fn tick_blink(&mut self, now_ms: u64) {
        let Some(phase) = self.config.blink_pattern.get(self.blink_phase).copied() else {
            self.blink_phase = 0;
            self.on();
            return;
        };

        let duration = u64::from(phase.duration_ms);
        if now_ms < self.last_tick_ms.saturating_add(duration) {
            return;
        }
        self.last_tick_ms = self.last_tick_ms.saturating_add(duration);
        self.blink_phase += 1;

        match self.config.blink_pattern.get(self.blink_phase).copied() {
            Some(next) => {
                trace!("blink phase {}: {:?}", self.blink_phase, next.step);
                self.apply_blink_phase(next);
            }
            None => {
                debug!("blink complete");
                self.blink_phase = 0;
                self.on();
            }
        }
    }

    fn tick_move(&mut self, now_ms: u64) {
        let Some(schedule) = self.schedule else {
            self.on();
            return;
        };

        let interval = u64::from(schedule.step_interval_ms);
        if now_ms < self.last_tick_ms.saturating_add(interval) {
            return;
        }
        self.last_tick_ms = self.last_tick_ms.saturating_add(interval);
        self.step(schedule.step_increment);
    }

    fn step(&mut self, increment: i16) {
        let next = i32::from(self.value) + i32::from(increment);
        let target = i32::from(self.target);
        let arrived = if increment > 0 {
            next >= target
        } else {
            next <= target
        };

        if arrived {
            debug!("move complete at {}", self.target);
            self.value = self.target;
            self.on();
        } else {
            trace!("move step: {} -> {}", self.value, next);
            // strictly between value and target, so within range
            self.value = next as u16;
            self.render();
        }
    }

    fn apply_blink_phase(&mut self, phase: BlinkPhase) {
        match phase.step.brightness() {
            Some(level) => {
                self.set_brightness(level);
                self.render();
            }
            None => self.display.clear(),
        }
    }

    fn cancel_move(&mut self) {
        self.schedule = None;
        self.target = self.value;
    }

    fn set_brightness(&mut self, level: Brightness) {
        self.brightness = level;
        self.display.set_brightness(level);
    }

    fn render(&mut self) {
        self.display.show_value(self.value, &self.config.format);
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// The current mode.
    pub fn state(&self) -> SpeedoState {
        self.state
    }

    /// The displayed value in tenths (0-880).
    pub fn value(&self) -> u16 {
        self.value
    }

    /// The displayed value in whole units, truncated.
    pub fn units(&self) -> u16 {
        self.value / 10
    }

    /// Destination of the current move in tenths, or the value when idle.
    pub fn target(&self) -> u16 {
        self.target
    }

    /// The brightness last sent to the display.
    pub fn brightness(&self) -> Brightness {
        self.brightness
    }

    /// A copy of all state and timing fields.
    pub fn snapshot(&self) -> SpeedoSnapshot {
        SpeedoSnapshot {
            state: self.state,
            value: self.value,
            target: self.target,
            step_increment: self.schedule.map_or(0, |s| s.step_increment),
            step_interval_ms: self.schedule.map_or(0, |s| s.step_interval_ms),
            last_tick_ms: self.last_tick_ms,
            bright_duration_ms: self.bright_duration_ms,
            blink_phase: self.blink_phase,
            brightness: self.brightness,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &SpeedoConfig {
        &self.config
    }

    /// The display being driven.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable access to the display, e.g. to reset a test double.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Consume the controller and hand back its display.
    pub fn into_display(self) -> D {
        self.display
    }
}

fn clamp_tenths(units: i32) -> u16 {
    (i64::from(units) * 10).clamp(i64::from(MIN_TENTHS), i64::from(MAX_TENTHS)) as u16
}
