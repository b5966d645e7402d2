use crate::config::{Config, MAX_SEQUENCE};
use crate::sequence::Sequence;

/// Game phases, in the order a normal game walks through them.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum State {
    Welcome = 0,
    Start = 1,
    PlayerMenu = 2,
    PlayerSelect = 3,
    OnePlayer = 4,
    TwoPlayers = 5,
    GameResult = 6,
    PlayAgain = 7,
    Sleep = 8,
}

impl State {
    pub fn name(self) -> &'static str {
        match self {
            State::Welcome => "WELCOME",
            State::Start => "START",
            State::PlayerMenu => "PLAYER_MENU",
            State::PlayerSelect => "PLAYER_SELECT",
            State::OnePlayer => "ONE_PLAYER",
            State::TwoPlayers => "TWO_PLAYERS",
            State::GameResult => "GAME_RESULT",
            State::PlayAgain => "PLAY_AGAIN",
            State::Sleep => "SLEEP",
        }
    }
}

/// Unknown codes put the game to sleep.
impl From<u8> for State {
    fn from(code: u8) -> Self {
        match code {
            0 => State::Welcome,
            1 => State::Start,
            2 => State::PlayerMenu,
            3 => State::PlayerSelect,
            4 => State::OnePlayer,
            5 => State::TwoPlayers,
            6 => State::GameResult,
            7 => State::PlayAgain,
            _ => State::Sleep,
        }
    }
}

impl ufmt::uDisplay for State {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: ufmt::uWrite + ?Sized,
    {
        f.write_str(self.name())
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Players {
    #[default]
    One,
    Two,
}

impl Players {
    pub fn count(self) -> u8 {
        match self {
            Players::One => 1,
            Players::Two => 2,
        }
    }
}

/// Everything one game remembers.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub state: State,
    pub players: Players,
    pub round: u16,
    pub sequence_length: usize,
    pub sequence_speed: u16,
    pub sequence: Sequence,
    pub player_inputs: [Sequence; 2],
    pub player_scores: [u16; 2],
}

impl GameSession {
    pub fn new(config: &Config) -> Self {
        GameSession {
            state: State::Welcome,
            players: Players::One,
            round: 1,
            sequence_length: 1,
            sequence_speed: config.initial_speed_ms,
            sequence: Sequence::new(),
            player_inputs: [Sequence::new(), Sequence::new()],
            player_scores: [0; 2],
        }
    }

    /// Forgets the previous game. The phase is left alone.
    pub fn reset(&mut self, config: &Config) {
        let state = self.state;
        *self = GameSession::new(config);
        self.state = state;
    }

    /// Round one of a fresh game with the chosen number of players.
    pub fn start_game(&mut self, players: Players, config: &Config) {
        self.players = players;
        self.round = 1;
        self.sequence_length = 1;
        self.sequence_speed = config.initial_speed_ms;
        self.sequence.clear();
        for inputs in self.player_inputs.iter_mut() {
            inputs.clear();
        }
        self.player_scores = [0; 2];
    }

    /// Adds one colour to the sequence. Returns `false` when the buffers are full.
    pub fn grow(&mut self) -> bool {
        if self.sequence_length < MAX_SEQUENCE {
            self.sequence_length += 1;
            true
        } else {
            false
        }
    }

    /// Bookkeeping after a cleared one-player round.
    pub fn advance_one_player(&mut self, config: &Config) -> bool {
        if !self.grow() {
            return false;
        }
        self.round += 1;
        self.sequence_speed = config.next_speed(self.sequence_speed);
        true
    }

    /// Score shown for `slot`. A lone player scores the rounds they cleared.
    pub fn display_score(&self, slot: usize) -> u16 {
        match self.players {
            Players::One => self.round.saturating_sub(1),
            Players::Two => self.player_scores[slot],
        }
    }
}
