#![cfg_attr(not(test), no_std)]

//! Simon memory game controller.
//!
//! The game core only talks to the board through the small traits in [`io`],
//! so the whole state machine runs the same on the Uno and in host tests.

pub mod config;
pub mod game;
pub mod io;
pub mod menu;
pub mod sequence;
pub mod session;
pub mod turn;

pub use config::{Config, LINE_WIDTH, MAX_SEQUENCE};
pub use game::Game;
pub use io::{
    Board, ButtonPanel, ColorInputs, ColorOutputs, Direction, Joystick, LightPanel, NoLog,
    TextDisplay, TickClock,
};
pub use sequence::{compare, compare_prefix, Color, Sequence, SequenceGenerator, Verdict};
pub use session::{GameSession, Players, State};
pub use turn::TurnOutcome;
