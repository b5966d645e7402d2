/// Longest sequence any buffer can hold.
pub const MAX_SEQUENCE: usize = 64;

/// Characters per LCD line.
pub const LINE_WIDTH: usize = 16;

/// Timing and difficulty knobs of the game. Tick counts are in periods of
/// the board's tick interrupt.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub tick_period_ms: u16,
    /// Ticks to wait for the joystick press on the start screen.
    pub start_timeout_ticks: u16,
    /// Ticks to wait for each colour while the player repeats the sequence.
    pub input_timeout_ticks: u16,
    /// A switch must still read pressed after this long to count.
    pub settle_ms: u32,
    /// Pause after every screen update.
    pub display_settle_ms: u32,
    pub banner_ms: u32,
    pub turn_banner_ms: u32,
    pub result_ms: u32,
    pub initial_speed_ms: u16,
    pub speed_step_ms: u16,
    pub min_speed_ms: u16,
    /// How many polls an UP reading survives a dropout to IDLE.
    pub direction_hold_polls: u8,
    pub alert_ms: u32,
}

impl Config {
    pub const DEFAULT: Config = Config {
        tick_period_ms: 100,
        start_timeout_ticks: 100,
        input_timeout_ticks: 50,
        settle_ms: 20,
        display_settle_ms: 1000,
        banner_ms: 2000,
        turn_banner_ms: 500,
        result_ms: 2000,
        initial_speed_ms: 1000,
        speed_step_ms: 5,
        min_speed_ms: 400,
        direction_hold_polls: 3,
        alert_ms: 300,
    };

    /// Playback speed after one more cleared one-player round.
    pub fn next_speed(&self, speed_ms: u16) -> u16 {
        if speed_ms > self.min_speed_ms {
            speed_ms
                .saturating_sub(self.speed_step_ms)
                .max(self.min_speed_ms)
        } else {
            speed_ms
        }
    }

    /// Output-compare value that makes a CTC timer counting at `timer_hz`
    /// fire once per tick period. `None` when the period does not fit a
    /// 16-bit compare register, or rounds down to no counts at all.
    pub fn tick_compare(&self, timer_hz: u32) -> Option<u16> {
        let counts = timer_hz.checked_mul(self.tick_period_ms as u32)? / 1000;
        u16::try_from(counts.checked_sub(1)?).ok()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::DEFAULT
    }
}
