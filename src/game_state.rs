use crate::engine::{GameSession, GuessResult, HintResult, LetterSet, Outcome, normalize_guess};
use crate::error::GameError;
use crate::{debug_log, info_log};
use rand::Rng;

const HINT_KEYWORD: &str = "hint";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    Guess(char),
    Hint,
}

impl UserAction {
    /// Interprets one line of player input: `hint` in any case asks for a
    /// hint, anything else must start with a letter.
    pub fn parse(raw: &str) -> Result<Self, GameError> {
        if raw.trim().eq_ignore_ascii_case(HINT_KEYWORD) {
            return Ok(Self::Hint);
        }
        normalize_guess(raw).map(Self::Guess)
    }
}

/// What an interface shows the player between moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnView {
    pub masked_word: String,
    pub attempts_remaining: u8,
    pub guessed_letters: LetterSet,
    pub hints_remaining: u8,
    pub wrong_guesses: u8,
}

impl TurnView {
    #[must_use]
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            masked_word: session.current_display(),
            attempts_remaining: session.attempts_remaining(),
            guessed_letters: session.guessed_letters(),
            hints_remaining: session.hints_remaining(),
            wrong_guesses: session.wrong_guesses(),
        }
    }
}

/// Trait for game interfaces (CLI or TUI)
pub trait GameInterface {
    fn display_welcome(&mut self, view: &TurnView);
    fn display_turn(&mut self, view: &TurnView);
    /// Next raw line from the player, or `None` once input is closed or the
    /// player quits.
    fn read_input(&mut self) -> Option<String>;
    fn display_invalid_input(&mut self, error: &GameError);
    fn display_guess_result(&mut self, letter: char, result: GuessResult, view: &TurnView);
    fn display_hint_result(&mut self, result: HintResult, view: &TurnView);
    fn display_outcome(&mut self, outcome: Outcome, secret_word: &str);
}

/// Drives `session` until it finishes or the interface stops producing input.
///
/// Returns the session's outcome, which is `InProgress` if input ran out.
pub fn game_loop<I: GameInterface + ?Sized>(session: &mut GameSession, interface: &mut I) -> Outcome {
    interface.display_welcome(&TurnView::from_session(session));

    while !session.is_over() {
        interface.display_turn(&TurnView::from_session(session));

        let Some(raw) = interface.read_input() else {
            info_log!("game_loop() - Input closed before the game finished");
            return session.outcome();
        };

        let action = match UserAction::parse(&raw) {
            Ok(action) => action,
            Err(e) => {
                debug_log!("game_loop() - Rejected input {:?}: {}", raw, e);
                interface.display_invalid_input(&e);
                continue;
            }
        };

        match action {
            UserAction::Hint => match session.apply_hint() {
                Ok(result) => {
                    interface.display_hint_result(result, &TurnView::from_session(session));
                }
                Err(e) => interface.display_invalid_input(&e),
            },
            UserAction::Guess(letter) => match session.apply_guess(letter) {
                Ok(result) => {
                    interface.display_guess_result(
                        letter,
                        result,
                        &TurnView::from_session(session),
                    );
                }
                Err(e) => interface.display_invalid_input(&e),
            },
        }
    }

    let outcome = session.outcome();
    info_log!("game_loop() - Game finished: {:?}", outcome);
    interface.display_outcome(outcome, session.secret_word());
    outcome
}

/// Starts a session on a random word from `words` and plays it out.
pub fn play<S, R, I>(words: &[S], rng: &mut R, interface: &mut I) -> Result<Outcome, GameError>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
    I: GameInterface + ?Sized,
{
    let mut session = GameSession::new(words, rng)?;
    Ok(game_loop(&mut session, interface))
}
