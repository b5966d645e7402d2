use embedded_hal::delay::DelayNs;
use heapless::String;
use ufmt::{uwrite, uwriteln};

use crate::config::{Config, LINE_WIDTH};
use crate::io::{Board, ColorInputs, ColorOutputs, Direction, Joystick, TextDisplay, TickClock};
use crate::menu::Selector;
use crate::sequence::{compare, SequenceGenerator, Verdict};
use crate::session::{GameSession, Players, State};
use crate::turn::{self, TurnOutcome};

type Line = String<LINE_WIDTH>;

/// The game state machine. Each [`step`](Game::step) runs the current phase
/// to completion, blocking on the board's delays and timed waits.
pub struct Game<S, J, I, L, C, D, W> {
    board: Board<S, J, I, L, C, D>,
    log: W,
    config: Config,
    session: GameSession,
    generator: SequenceGenerator,
    selector: Selector,
}

impl<S, J, I, L, C, D, W> Game<S, J, I, L, C, D, W>
where
    S: TextDisplay,
    J: Joystick,
    I: ColorInputs,
    L: ColorOutputs,
    C: TickClock,
    D: DelayNs,
    W: ufmt::uWrite,
{
    pub fn new(board: Board<S, J, I, L, C, D>, config: Config, log: W) -> Self {
        Game {
            board,
            log,
            config,
            session: GameSession::new(&config),
            generator: SequenceGenerator::default(),
            selector: Selector::new(),
        }
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn board(&self) -> &Board<S, J, I, L, C, D> {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board<S, J, I, L, C, D> {
        &mut self.board
    }

    pub fn log(&self) -> &W {
        &self.log
    }

    /// Jumps to `state` from outside the normal flow, e.g. `PlayAgain`.
    pub fn drive(&mut self, state: State) {
        self.transition(state);
    }

    pub fn run(&mut self) -> ! {
        loop {
            self.step();
        }
    }

    pub fn step(&mut self) {
        match self.session.state {
            State::Welcome => self.welcome(),
            State::Start => self.start(),
            State::PlayerMenu => self.player_menu(),
            State::PlayerSelect => self.player_select(),
            State::OnePlayer => self.one_player(),
            State::TwoPlayers => self.two_players(),
            State::GameResult => self.game_result(),
            State::PlayAgain => self.play_again(),
            State::Sleep => self.sleep(),
        }
    }

    fn welcome(&mut self) {
        self.session.reset(&self.config);
        self.announce("Welcome to the", "Simon Game");
        self.pause(self.config.banner_ms);
        self.announce("Push To Start!", "");
        self.transition(State::Start);
    }

    fn start(&mut self) {
        let joystick = &mut self.board.joystick;
        let pressed = turn::wait_for(
            &mut self.board.clock,
            self.config.start_timeout_ticks,
            || joystick.pressed().then_some(()),
        );

        match pressed {
            Some(()) => self.transition(State::PlayerMenu),
            None => self.transition(State::Sleep),
        }
    }

    fn player_menu(&mut self) {
        self.selector = Selector::new();
        self.announce("1 player OR", "2 players?");
        self.transition(State::PlayerSelect);
    }

    fn player_select(&mut self) {
        let raw = self.board.joystick.direction();
        let poll = self.selector.poll(raw, self.config.direction_hold_polls);
        if poll.changed {
            match poll.direction {
                Direction::Up => {
                    self.announce("<1> player OR", "2 players?");
                    self.session.players = Players::One;
                }
                Direction::Down => {
                    self.announce("1 player OR", "<2> players?");
                    self.session.players = Players::Two;
                }
                Direction::Idle => {}
            }
        }

        if !self.board.joystick.pressed() {
            return;
        }

        let players = self.session.players;
        if players == Players::One {
            let (x, y) = self.board.joystick.raw_xy();
            let seed = x ^ y;
            self.generator.reseed(seed as u64);
            uwriteln!(&mut self.log, "seed {}", seed).ok();
        }
        self.session.start_game(players, &self.config);
        uwriteln!(&mut self.log, "players {}", players.count()).ok();

        match players {
            Players::One => self.transition(State::OnePlayer),
            Players::Two => self.transition(State::TwoPlayers),
        }
    }

    fn one_player(&mut self) {
        let round = numbered("Round ", self.session.round);
        self.announce(&round, "Simon's Turn!");
        self.pause(self.config.turn_banner_ms);
        self.computer_turn();

        let score = numbered("Score: ", self.session.display_score(0));
        self.announce("Player's Turn!", &score);
        self.pause(self.config.turn_banner_ms);
        if self.player_turn(0) != TurnOutcome::Complete {
            return;
        }

        if self.check() == Verdict::Mismatch {
            return;
        }
        if !self.session.advance_one_player(&self.config) {
            uwriteln!(&mut self.log, "sequence full").ok();
            self.transition(State::GameResult);
        }
    }

    fn two_players(&mut self) {
        let round = numbered("Round ", self.session.round);
        self.announce(&round, "");
        self.pause(self.config.turn_banner_ms);

        let score = numbered("Score: ", self.session.display_score(0));
        self.announce("Player 1's Turn", &score);
        self.pause(self.config.turn_banner_ms);
        if self.player_turn(0) != TurnOutcome::Complete {
            return;
        }

        // Player 1 repeats what player 2 entered last round, then adds one.
        // Only this check scores.
        if self.session.round > 1 {
            if self.check() == Verdict::Mismatch {
                return;
            }
            self.session.player_scores[0] += 1;
        }

        if !self.grow() {
            return;
        }
        let score = numbered("Score: ", self.session.display_score(1));
        self.announce("Player 2's Turn", &score);
        self.pause(self.config.turn_banner_ms);
        if self.player_turn(1) != TurnOutcome::Complete {
            return;
        }

        if self.check() == Verdict::Mismatch {
            return;
        }

        if self.grow() {
            self.session.round += 1;
        }
    }

    fn game_result(&mut self) {
        self.sound_alert();

        let [first, second] = self.session.player_scores;
        match self.session.players {
            Players::One => {
                let score = numbered("Score: ", self.session.display_score(0));
                self.announce("Game Over!", &score);
                self.pause(self.config.result_ms);
                uwriteln!(&mut self.log, "score {}", self.session.display_score(0)).ok();
            }
            Players::Two => {
                let verdict = if first > second {
                    "Player 1 Wins"
                } else if first < second {
                    "Player 2 Wins"
                } else {
                    "Players Tied"
                };
                self.announce("Game Over!", verdict);
                self.pause(self.config.result_ms);

                let one = numbered("P1 Score: ", first);
                let two = numbered("P2 Score: ", second);
                self.announce(&one, &two);
                self.pause(self.config.result_ms);
                uwriteln!(&mut self.log, "score {} {}", first, second).ok();
            }
        }

        self.transition(State::PlayerMenu);
    }

    fn play_again(&mut self) {
        self.announce("Play Again?", "Push to Start");
        self.transition(State::Start);
    }

    fn sleep(&mut self) {
        self.announce("", "");
        if self.board.joystick.pressed() {
            self.transition(State::Welcome);
        }
    }

    fn computer_turn(&mut self) {
        let length = self.session.sequence_length;
        self.generator.generate(length, &mut self.session.sequence);
        uwriteln!(&mut self.log, "simon plays {}", self.session.sequence.len()).ok();

        turn::play_sequence(
            &mut self.board.lights,
            &mut self.board.delay,
            &self.session.sequence,
            self.session.sequence_speed,
        );
    }

    /// Collects one player's attempt into input slot `slot`.
    fn player_turn(&mut self, slot: usize) -> TurnOutcome {
        let outcome = turn::collect_input(
            &mut self.board.buttons,
            &mut self.board.clock,
            &mut self.board.delay,
            &self.config,
            &mut self.session.player_inputs[slot],
            self.session.sequence_length,
        );

        let player = slot + 1;
        for &color in self.session.player_inputs[slot].iter() {
            uwriteln!(&mut self.log, "input P{} {}", player, color).ok();
        }
        if let TurnOutcome::TimedOut { position } = outcome {
            uwriteln!(&mut self.log, "timeout P{} at {}", player, position).ok();
            self.transition(State::GameResult);
        }
        outcome
    }

    /// Compares the current attempt; a mismatch ends the game.
    fn check(&mut self) -> Verdict {
        let verdict = compare(
            self.session.players,
            &self.session.sequence,
            &self.session.player_inputs,
            self.session.sequence_length,
        );
        match verdict {
            Verdict::Match => {
                uwriteln!(&mut self.log, "match").ok();
            }
            Verdict::Mismatch => {
                uwriteln!(&mut self.log, "mismatch").ok();
                self.transition(State::GameResult);
            }
        }
        verdict
    }

    fn grow(&mut self) -> bool {
        let grown = self.session.grow();
        if !grown {
            uwriteln!(&mut self.log, "sequence full").ok();
            self.transition(State::GameResult);
        }
        grown
    }

    fn sound_alert(&mut self) {
        self.board.lights.set_alert(true);
        self.board.delay.delay_ms(self.config.alert_ms);
        self.board.lights.set_alert(false);
    }

    fn transition(&mut self, next: State) {
        let previous = self.session.state;
        self.session.state = next;
        if previous != next {
            uwriteln!(&mut self.log, "state {} -> {}", previous, next).ok();
        }
    }

    fn announce(&mut self, line_one: &str, line_two: &str) {
        self.board.screen.show(clip(line_one), clip(line_two));
        self.board.delay.delay_ms(self.config.display_settle_ms);
    }

    fn pause(&mut self, ms: u32) {
        self.board.delay.delay_ms(ms);
    }
}

fn numbered(label: &str, value: u16) -> Line {
    let mut line = Line::new();
    uwrite!(&mut line, "{}{}", label, value).ok();
    line
}

/// Cuts `text` to one display line.
fn clip(text: &str) -> &str {
    let mut end = text.len().min(LINE_WIDTH);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
