// Library interface for hangman
// This allows integration tests to access internal modules

pub mod cli;
pub mod engine;
pub mod error;
pub mod game_state;
pub mod logging;
pub mod tui;
pub mod wordlist;

// Re-export commonly used items for easier testing
pub use engine::{
    GameSession, GuessResult, HINT_LIMIT, HintResult, LetterSet, MAX_ATTEMPTS, Outcome,
    normalize_guess,
};
pub use error::GameError;
pub use game_state::{GameInterface, TurnView, UserAction, game_loop, play};
pub use wordlist::{load_words_from_file, load_words_from_str, resolve_words};
