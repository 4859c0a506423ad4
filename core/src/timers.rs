use std::time::Duration;

use log::debug;

use crate::constants::TIMER_HZ;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// # Timers
/// Two 8-bit counters that count down to zero at 60Hz and then stay there.
///
/// - `delay` is readable and writable by programs
/// - `sound` keeps the buzzer on for as long as it is nonzero
///
/// Wall-clock time is converted into whole ticks; whatever is left over is
/// carried into the next call so that no time is lost to rounding.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
    // elapsed nanoseconds * TIMER_HZ not yet turned into a tick
    remainder: u128,
}

impl Timers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts both timers down by `ticks`, stopping at zero.
    pub fn tick(&mut self, ticks: u32) {
        let ticks = u8::try_from(ticks).unwrap_or(u8::MAX);
        let was_buzzing = self.buzzer();
        self.delay = self.delay.saturating_sub(ticks);
        self.sound = self.sound.saturating_sub(ticks);
        if was_buzzing && !self.buzzer() {
            debug!("sound timer expired");
        }
    }

    /// Advances the timers by however many ticks fit into `elapsed` plus any
    /// time carried over from previous calls.
    ///
    /// Returns the number of ticks applied.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        let scaled = self.remainder + elapsed.as_nanos() * u128::from(TIMER_HZ);
        self.remainder = scaled % NANOS_PER_SECOND;
        let ticks = u32::try_from(scaled / NANOS_PER_SECOND).unwrap_or(u32::MAX);
        if ticks > 0 {
            self.tick(ticks);
        }
        ticks
    }

    /// Whether the buzzer should currently be sounding
    pub fn buzzer(&self) -> bool {
        self.sound != 0
    }
}
