//! Example: Accelerate to 88, flash, then switch off.
//!
//! Run with: `RUST_LOG=debug cargo run --example run_to_88`

use std::io::Write;
use std::time::{Duration, Instant};

use speedo_core::{Brightness, SegmentDisplay, SpeedoController, SpeedoState, ValueFormat};

/// Prints the display on a single terminal line.
struct TerminalDisplay {
    brightness: Brightness,
}

impl SegmentDisplay for TerminalDisplay {
    fn set_brightness(&mut self, level: Brightness) {
        self.brightness = level;
    }

    fn show_value(&mut self, tenths: u16, format: &ValueFormat) {
        let digits = usize::from(format.digits);
        let mut text = if format.leading_zeros {
            format!("{:0width$}", tenths, width = digits)
        } else {
            format!("{:width$}", tenths, width = digits)
        };
        if format.decimal_point && text.len() > 1 {
            text.insert(text.len() - 1, '.');
        }
        print!("\r[{:>5}] level {}   ", text, self.brightness.level());
        let _ = std::io::stdout().flush();
    }

    fn clear(&mut self) {
        print!("\r[     ]           ");
        let _ = std::io::stdout().flush();
    }
}

/// Poll until the controller leaves `state`.
fn run_while(speedo: &mut SpeedoController<TerminalDisplay>, start: Instant, state: SpeedoState) {
    while speedo.state() == state {
        speedo.tick(now_ms(start));
        std::thread::sleep(Duration::from_millis(1));
    }
}

fn now_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

fn main() {
    // Initialize logging (optional)
    env_logger::init();

    let start = Instant::now();
    let mut speedo = SpeedoController::new(TerminalDisplay {
        brightness: Brightness::Low,
    });
    speedo.init();
    speedo.on();

    // Sweep up to 88 over about four seconds
    speedo.move_to(88, 4000, now_ms(start));
    run_while(&mut speedo, start, SpeedoState::Moving);

    // Flash and glow
    speedo.blink(now_ms(start));
    run_while(&mut speedo, start, SpeedoState::Blinking);
    speedo.brighten(1500, now_ms(start));
    run_while(&mut speedo, start, SpeedoState::Bright);

    // Coast back down
    speedo.move_to(0, 2000, now_ms(start));
    run_while(&mut speedo, start, SpeedoState::Moving);

    speedo.off();
    println!();
}
