use heapless::Vec;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::MAX_SEQUENCE;
use crate::session::Players;

/// One of the four pads. The discriminant is the colour code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Color {
    Red = 0,
    Blue = 1,
    Yellow = 2,
    Green = 3,
}

impl Color {
    /// Ordered by colour code, which is also the button polling priority.
    pub const ALL: [Color; 4] = [Color::Red, Color::Blue, Color::Yellow, Color::Green];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Green => "green",
        }
    }
}

impl ufmt::uDisplay for Color {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(self.name())
    }
}

pub type Sequence = Vec<Color, MAX_SEQUENCE>;

/// `rand()` without `srand()` starts from seed 1.
pub const DEFAULT_SEED: u64 = 1;

/// Produces the computer's colour sequences.
pub struct SequenceGenerator {
    rng: SmallRng,
}

impl SequenceGenerator {
    pub fn new(seed: u64) -> Self {
        SequenceGenerator {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
    }

    /// Replaces `sequence` with `length` fresh colours, drawn uniformly.
    pub fn generate(&mut self, length: usize, sequence: &mut Sequence) {
        sequence.clear();
        for _ in 0..length.min(MAX_SEQUENCE) {
            let color = Color::ALL[self.rng.gen_range(0..Color::ALL.len())];
            sequence.push(color).ok();
        }
    }
}

impl Default for SequenceGenerator {
    fn default() -> Self {
        SequenceGenerator::new(DEFAULT_SEED)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Match,
    Mismatch,
}

/// Walks both sequences pairwise over the first `positions` colours and stops
/// at the first difference. Running out of either side early is a mismatch.
pub fn compare_prefix<A, B>(reference: A, candidate: B, positions: usize) -> Verdict
where
    A: IntoIterator<Item = Color>,
    B: IntoIterator<Item = Color>,
{
    let mut checked = 0;
    for (expected, actual) in reference.into_iter().zip(candidate).take(positions) {
        if expected != actual {
            return Verdict::Mismatch;
        }
        checked += 1;
    }

    if checked == positions {
        Verdict::Match
    } else {
        Verdict::Mismatch
    }
}

/// One player repeats the computer's `reference` over the full `length`.
/// With two players the slots are checked against each other, and only the
/// first `length - 1` colours are looked at: the colour the last player just
/// appended is never validated.
pub fn compare(
    players: Players,
    reference: &[Color],
    candidates: &[Sequence; 2],
    length: usize,
) -> Verdict {
    match players {
        Players::One => compare_prefix(
            reference.iter().copied(),
            candidates[0].iter().copied(),
            length,
        ),
        Players::Two => compare_prefix(
            candidates[0].iter().copied(),
            candidates[1].iter().copied(),
            length.saturating_sub(1),
        ),
    }
}
