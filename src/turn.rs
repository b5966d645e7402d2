//! Computer playback and timed player input.

use embedded_hal::delay::DelayNs;

use crate::config::Config;
use crate::io::{ColorInputs, ColorOutputs, TickClock};
use crate::sequence::{Color, Sequence};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Complete,
    /// Nothing was pressed for the colour at `position`.
    TimedOut { position: usize },
}

/// Restarts `clock` and calls `poll` until it yields a value or `budget`
/// ticks pass.
pub fn wait_for<C, T, F>(clock: &mut C, budget: u16, mut poll: F) -> Option<T>
where
    C: TickClock,
    F: FnMut() -> Option<T>,
{
    clock.reset();
    while clock.elapsed_ticks() < budget {
        if let Some(value) = poll() {
            return Some(value);
        }
    }
    None
}

/// A switch counts as pressed only if it still reads pressed after `settle_ms`.
pub fn debounce<I, D>(inputs: &mut I, delay: &mut D, color: Color, settle_ms: u32) -> bool
where
    I: ColorInputs,
    D: DelayNs,
{
    if !inputs.is_pressed(color) {
        return false;
    }
    delay.delay_ms(settle_ms);
    inputs.is_pressed(color)
}

/// First debounced switch in polling priority order.
pub fn scan<I, D>(inputs: &mut I, delay: &mut D, settle_ms: u32) -> Option<Color>
where
    I: ColorInputs,
    D: DelayNs,
{
    Color::ALL
        .into_iter()
        .find(|&color| debounce(inputs, delay, color, settle_ms))
}

/// Lights each colour for `speed_ms`, one after the other.
pub fn play_sequence<L, D>(lights: &mut L, delay: &mut D, sequence: &[Color], speed_ms: u16)
where
    L: ColorOutputs,
    D: DelayNs,
{
    for &color in sequence {
        lights.set(color, true);
        delay.delay_ms(speed_ms as u32);
        lights.set(color, false);
    }
}

/// Fills `slot` with `length` button presses. Each colour gets its own
/// timeout; the first miss ends the turn and leaves that position unwritten.
pub fn collect_input<I, C, D>(
    inputs: &mut I,
    clock: &mut C,
    delay: &mut D,
    config: &Config,
    slot: &mut Sequence,
    length: usize,
) -> TurnOutcome
where
    I: ColorInputs,
    C: TickClock,
    D: DelayNs,
{
    slot.clear();
    for position in 0..length.min(slot.capacity()) {
        let pressed = wait_for(clock, config.input_timeout_ticks, || {
            scan(inputs, delay, config.settle_ms)
        });
        match pressed {
            Some(color) => {
                slot.push(color).ok();
            }
            None => return TurnOutcome::TimedOut { position },
        }
    }
    TurnOutcome::Complete
}
