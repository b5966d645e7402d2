#![allow(dead_code)]

use std::collections::VecDeque;
use std::convert::Infallible;

use embedded_hal::delay::DelayNs;
use simon::{
    Board, Color, ColorInputs, ColorOutputs, Config, Direction, Game, Joystick, Sequence,
    SequenceGenerator, TextDisplay, TickClock,
};

/// Advances one tick every time it is read.
#[derive(Default)]
pub struct StepClock {
    now: u16,
    pub last_read: u16,
    pub resets: usize,
}

impl TickClock for StepClock {
    fn elapsed_ticks(&mut self) -> u16 {
        self.last_read = self.now;
        self.now += 1;
        self.last_read
    }

    fn reset(&mut self) {
        self.now = 0;
        self.resets += 1;
    }
}

#[derive(Default)]
pub struct Stick {
    pub directions: VecDeque<Direction>,
    pub presses: VecDeque<bool>,
    pub xy: (u16, u16),
    pub press_polls: usize,
}

impl Stick {
    /// `false` for `polls` reads, then one press.
    pub fn press_after(&mut self, polls: usize) {
        self.presses.extend(std::iter::repeat(false).take(polls));
        self.presses.push_back(true);
    }
}

impl Joystick for Stick {
    fn direction(&mut self) -> Direction {
        self.directions.pop_front().unwrap_or(Direction::Idle)
    }

    fn pressed(&mut self) -> bool {
        self.press_polls += 1;
        self.presses.pop_front().unwrap_or(false)
    }

    fn raw_xy(&mut self) -> (u16, u16) {
        self.xy
    }
}

/// Delivers queued presses, each held just long enough to pass the debounce.
#[derive(Default)]
pub struct Buttons {
    pub queue: VecDeque<Color>,
    pub reads: usize,
    confirming: bool,
}

impl Buttons {
    pub fn press(&mut self, colors: &[Color]) {
        self.queue.extend(colors.iter().copied());
    }
}

impl ColorInputs for Buttons {
    fn is_pressed(&mut self, color: Color) -> bool {
        self.reads += 1;
        if self.queue.front() != Some(&color) {
            return false;
        }
        if self.confirming {
            self.confirming = false;
            self.queue.pop_front();
        } else {
            self.confirming = true;
        }
        true
    }
}

#[derive(Default)]
pub struct Lights {
    pub events: Vec<(Color, bool)>,
    pub alerts: Vec<bool>,
}

impl ColorOutputs for Lights {
    fn set(&mut self, color: Color, on: bool) {
        self.events.push((color, on));
    }

    fn set_alert(&mut self, on: bool) {
        self.alerts.push(on);
    }
}

#[derive(Default)]
pub struct Screen {
    pub shown: Vec<(String, String)>,
}

impl Screen {
    pub fn last(&self) -> (&str, &str) {
        let (one, two) = self.shown.last().expect("nothing shown");
        (one.as_str(), two.as_str())
    }

    pub fn showed(&self, one: &str, two: &str) -> bool {
        self.shown.iter().any(|(a, b)| a == one && b == two)
    }
}

impl TextDisplay for Screen {
    fn show(&mut self, line_one: &str, line_two: &str) {
        self.shown.push((line_one.into(), line_two.into()));
    }
}

#[derive(Default)]
pub struct Delay {
    pub total_ms: u64,
}

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ms += ns as u64 / 1_000_000;
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ms += ms as u64;
    }
}

#[derive(Default)]
pub struct Log(pub String);

impl ufmt::uWrite for Log {
    type Error = Infallible;

    fn write_str(&mut self, s: &str) -> Result<(), Self::Error> {
        self.0.push_str(s);
        Ok(())
    }
}

pub type TestGame = Game<Screen, Stick, Buttons, Lights, StepClock, Delay, Log>;

pub fn game() -> TestGame {
    let board = Board {
        screen: Screen::default(),
        joystick: Stick::default(),
        buttons: Buttons::default(),
        lights: Lights::default(),
        clock: StepClock::default(),
        delay: Delay::default(),
    };
    Game::new(board, Config::DEFAULT, Log::default())
}

/// A joystick seed whose first generated colour is `first`.
pub fn seed_starting_with(first: Color) -> u16 {
    (0u16..)
        .find(|&seed| {
            let mut sequence = Sequence::new();
            SequenceGenerator::new(seed as u64).generate(1, &mut sequence);
            sequence[0] == first
        })
        .expect("no seed found")
}

/// Walks WELCOME → START → PLAYER_MENU → PLAYER_SELECT and picks a mode.
pub fn select_players(game: &mut TestGame, direction: Direction, xy: (u16, u16)) {
    {
        let stick = &mut game.board_mut().joystick;
        stick.xy = xy;
        stick.directions.push_back(direction);
        stick.presses.extend([true, true]);
    }
    for _ in 0..4 {
        game.step();
    }
}
