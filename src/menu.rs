use crate::io::Direction;

/// Joystick filter for the player selection menu.
///
/// The stick tends to report a single UP frame and fall back to IDLE, so an
/// IDLE straight after UP is read as UP for a few more polls.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    last: Direction,
    held: u8,
}

/// Result of one selector poll.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Poll {
    pub direction: Direction,
    /// The menu moved and needs redrawing.
    pub changed: bool,
}

impl Selector {
    pub const fn new() -> Self {
        Selector {
            last: Direction::Idle,
            held: 0,
        }
    }

    pub fn poll(&mut self, raw: Direction, max_hold: u8) -> Poll {
        let mut direction = raw;
        if self.held < max_hold && self.last == Direction::Up && direction == Direction::Idle {
            direction = Direction::Up;
            self.held += 1;
        } else {
            self.held = 0;
        }

        let changed = direction != Direction::Idle && direction != self.last;
        if changed {
            self.last = direction;
        }

        Poll { direction, changed }
    }
}

impl Default for Selector {
    fn default() -> Self {
        Selector::new()
    }
}
