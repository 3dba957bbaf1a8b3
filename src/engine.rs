//! Hangman game engine.
//!
//! A [`GameSession`] owns the secret word and everything the player has done
//! to it so far. It performs no I/O: callers feed it letters and hint
//! requests and render whatever it reports back.
//!
//! # State Machine
//! - `InProgress` → `Won` once every distinct letter of the word is revealed
//! - `InProgress` → `Lost` once the attempts run out
//!
//! Both terminal states are absorbing. Mutations on a finished session are
//! rejected with [`GameError::SessionTerminated`].

use crate::debug_log;
use crate::error::GameError;
use rand::Rng;
use rand::seq::IndexedRandom;
use std::fmt;

pub const MAX_ATTEMPTS: u8 = 7;
pub const HINT_LIMIT: u8 = 3;

/// Set of letters `a`-`z`, one bit per letter.
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct LetterSet(u32);

impl LetterSet {
    pub const fn new() -> Self {
        Self(0)
    }

    fn bit(letter: char) -> Option<u32> {
        if letter.is_ascii_lowercase() {
            Some(1 << (letter as u32 - 'a' as u32))
        } else {
            None
        }
    }

    /// Adds `letter`, returning `true` if it was not already present.
    /// Anything outside `a`-`z` is ignored.
    pub fn insert(&mut self, letter: char) -> bool {
        match Self::bit(letter) {
            Some(bit) if self.0 & bit == 0 => {
                self.0 |= bit;
                true
            }
            _ => false,
        }
    }

    #[must_use]
    pub fn contains(self, letter: char) -> bool {
        Self::bit(letter).is_some_and(|bit| self.0 & bit != 0)
    }

    #[must_use]
    pub fn is_superset(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Letters in alphabetical order.
    pub fn iter(self) -> impl Iterator<Item = char> {
        ('a'..='z').filter(move |&c| self.contains(c))
    }
}

impl FromIterator<char> for LetterSet {
    fn from_iter<I: IntoIterator<Item = char>>(iter: I) -> Self {
        let mut set = Self::new();
        for letter in iter {
            set.insert(letter);
        }
        set
    }
}

impl fmt::Display for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, letter) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{letter}")?;
        }
        write!(f, "]")
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    InProgress,
    Won,
    Lost,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GuessResult {
    Correct,
    Incorrect,
    /// The letter was submitted before; nothing changed.
    AlreadyGuessed,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HintResult {
    HintRevealed(char),
    NoHintsLeft,
    /// Every letter is already revealed; nothing changed.
    NoHintAvailable,
}

/// Reduces raw player input to a single lowercase letter.
///
/// Only the first non-whitespace character is considered.
pub fn normalize_guess(raw: &str) -> Result<char, GameError> {
    match raw.trim().chars().next() {
        Some(c) if c.is_ascii_alphabetic() => Ok(c.to_ascii_lowercase()),
        _ => Err(GameError::GuessFormat(raw.trim().to_string())),
    }
}

#[derive(Clone, Debug)]
pub struct GameSession {
    secret_word: String,
    word_letters: LetterSet,
    guessed_letters: LetterSet,
    correct_letters: LetterSet,
    attempts_remaining: u8,
    hints_remaining: u8,
    outcome: Outcome,
}

impl GameSession {
    /// Starts a session on a word drawn uniformly from `words`.
    ///
    /// Returns [`GameError::EmptyWordSource`] without touching `rng` if
    /// `words` is empty.
    pub fn new<S, R>(words: &[S], rng: &mut R) -> Result<Self, GameError>
    where
        S: AsRef<str>,
        R: Rng + ?Sized,
    {
        if words.is_empty() {
            return Err(GameError::EmptyWordSource);
        }
        let word = words.choose(rng).ok_or(GameError::EmptyWordSource)?;
        Self::with_secret(word.as_ref())
    }

    /// Starts a session on a known word.
    pub fn with_secret(word: &str) -> Result<Self, GameError> {
        let secret_word = word.to_lowercase();
        if secret_word.is_empty() || !secret_word.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(GameError::InvalidWord(word.to_string()));
        }
        debug_log!("GameSession::with_secret() - {} letters", secret_word.len());

        Ok(Self {
            word_letters: secret_word.chars().collect(),
            secret_word,
            guessed_letters: LetterSet::new(),
            correct_letters: LetterSet::new(),
            attempts_remaining: MAX_ATTEMPTS,
            hints_remaining: HINT_LIMIT,
            outcome: Outcome::InProgress,
        })
    }

    /// The word with unrevealed positions masked, e.g. `c _ t`.
    #[must_use]
    pub fn current_display(&self) -> String {
        let mut display = String::with_capacity(self.secret_word.len() * 2);
        for (i, letter) in self.secret_word.chars().enumerate() {
            if i > 0 {
                display.push(' ');
            }
            display.push(if self.correct_letters.contains(letter) {
                letter
            } else {
                '_'
            });
        }
        display
    }

    pub fn apply_guess(&mut self, letter: char) -> Result<GuessResult, GameError> {
        if self.is_over() {
            return Err(GameError::SessionTerminated);
        }
        let letter = letter.to_ascii_lowercase();
        if !letter.is_ascii_lowercase() {
            return Err(GameError::GuessFormat(letter.to_string()));
        }
        if !self.guessed_letters.insert(letter) {
            debug_log!("apply_guess() - '{}' already guessed", letter);
            return Ok(GuessResult::AlreadyGuessed);
        }

        let result = if self.word_letters.contains(letter) {
            self.correct_letters.insert(letter);
            GuessResult::Correct
        } else {
            self.attempts_remaining = self.attempts_remaining.saturating_sub(1);
            GuessResult::Incorrect
        };
        self.update_outcome();
        debug_log!(
            "apply_guess() - '{}' -> {:?}, attempts left {}, outcome {:?}",
            letter,
            result,
            self.attempts_remaining,
            self.outcome
        );
        Ok(result)
    }

    /// Reveals the first letter, by word position, that is not yet correct.
    ///
    /// Running out of hints is reported before a finished session is.
    pub fn apply_hint(&mut self) -> Result<HintResult, GameError> {
        if self.hints_remaining == 0 {
            return Ok(HintResult::NoHintsLeft);
        }
        if self.is_over() {
            return Err(GameError::SessionTerminated);
        }
        let Some(letter) = self
            .secret_word
            .chars()
            .find(|&c| !self.correct_letters.contains(c))
        else {
            return Ok(HintResult::NoHintAvailable);
        };

        self.correct_letters.insert(letter);
        self.hints_remaining -= 1;
        self.update_outcome();
        debug_log!(
            "apply_hint() - revealed '{}', hints left {}, outcome {:?}",
            letter,
            self.hints_remaining,
            self.outcome
        );
        Ok(HintResult::HintRevealed(letter))
    }

    // Win is checked before loss.
    fn update_outcome(&mut self) {
        self.outcome = if self.correct_letters.is_superset(self.word_letters) {
            Outcome::Won
        } else if self.attempts_remaining == 0 {
            Outcome::Lost
        } else {
            Outcome::InProgress
        };
    }

    #[must_use]
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome != Outcome::InProgress
    }

    #[must_use]
    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    #[must_use]
    pub fn attempts_remaining(&self) -> u8 {
        self.attempts_remaining
    }

    #[must_use]
    pub fn hints_remaining(&self) -> u8 {
        self.hints_remaining
    }

    #[must_use]
    pub fn guessed_letters(&self) -> LetterSet {
        self.guessed_letters
    }

    #[must_use]
    pub fn correct_letters(&self) -> LetterSet {
        self.correct_letters
    }

    #[must_use]
    pub fn wrong_guesses(&self) -> u8 {
        MAX_ATTEMPTS - self.attempts_remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    struct UnusableRng;

    impl RngCore for UnusableRng {
        fn next_u32(&mut self) -> u32 {
            panic!("rng must not be used");
        }

        fn next_u64(&mut self) -> u64 {
            panic!("rng must not be used");
        }

        fn fill_bytes(&mut self, _dst: &mut [u8]) {
            panic!("rng must not be used");
        }
    }

    fn session(word: &str) -> GameSession {
        GameSession::with_secret(word).unwrap()
    }

    fn assert_invariants(s: &GameSession) {
        assert!(s.word_letters.is_superset(s.correct_letters));
        assert!(s.attempts_remaining <= MAX_ATTEMPTS);
        assert!(s.hints_remaining <= HINT_LIMIT);
        assert_eq!(
            s.current_display().chars().filter(|c| *c != ' ').count(),
            s.secret_word.len()
        );
        let expected = if s.correct_letters.is_superset(s.word_letters) {
            Outcome::Won
        } else if s.attempts_remaining == 0 {
            Outcome::Lost
        } else {
            Outcome::InProgress
        };
        assert_eq!(s.outcome, expected);
    }

    #[test]
    fn test_letter_set_basics() {
        let mut set = LetterSet::new();
        assert!(set.is_empty());
        assert!(set.insert('c'));
        assert!(set.insert('a'));
        assert!(!set.insert('c'));
        assert!(!set.insert('1'));
        assert!(!set.insert('A'));
        assert_eq!(set.len(), 2);
        assert!(set.contains('a'));
        assert!(!set.contains('b'));
        assert_eq!(set.iter().collect::<String>(), "ac");
        assert_eq!(set.to_string(), "[a, c]");
        assert_eq!(LetterSet::new().to_string(), "[]");
    }

    #[test]
    fn test_letter_set_superset() {
        let word: LetterSet = "banana".chars().collect();
        let partial: LetterSet = "ab".chars().collect();
        assert_eq!(word.len(), 3);
        assert!(word.is_superset(partial));
        assert!(!partial.is_superset(word));
        assert!(word.is_superset(LetterSet::new()));
    }

    #[test]
    fn test_normalize_guess() {
        assert_eq!(normalize_guess("  B").unwrap(), 'b');
        assert_eq!(normalize_guess("a").unwrap(), 'a');
        assert_eq!(normalize_guess("Zebra\n").unwrap(), 'z');
        assert!(matches!(normalize_guess(""), Err(GameError::GuessFormat(_))));
        assert!(matches!(normalize_guess("   "), Err(GameError::GuessFormat(_))));
        assert!(matches!(normalize_guess("3"), Err(GameError::GuessFormat(_))));
        assert!(matches!(normalize_guess("?a"), Err(GameError::GuessFormat(_))));
        assert!(matches!(normalize_guess("é"), Err(GameError::GuessFormat(_))));
    }

    #[test]
    fn test_new_session_initial_state() {
        let s = session("Cat");
        assert_eq!(s.secret_word(), "cat");
        assert_eq!(s.attempts_remaining(), 7);
        assert_eq!(s.hints_remaining(), 3);
        assert!(s.guessed_letters().is_empty());
        assert!(s.correct_letters().is_empty());
        assert_eq!(s.outcome(), Outcome::InProgress);
        assert_eq!(s.current_display(), "_ _ _");
        assert_eq!(s.wrong_guesses(), 0);
    }

    #[test]
    fn test_with_secret_rejects_invalid_words() {
        assert!(matches!(GameSession::with_secret(""), Err(GameError::InvalidWord(_))));
        assert!(matches!(
            GameSession::with_secret("ice-cream"),
            Err(GameError::InvalidWord(_))
        ));
        assert!(matches!(
            GameSession::with_secret("café"),
            Err(GameError::InvalidWord(_))
        ));
    }

    #[test]
    fn test_new_session_empty_words_checked_before_draw() {
        let words: Vec<String> = Vec::new();
        let result = GameSession::new(&words, &mut UnusableRng);
        assert!(matches!(result, Err(GameError::EmptyWordSource)));
    }

    #[test]
    fn test_new_session_selects_from_words() {
        let words = ["Apple", "grape", "lemon"];
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let s = GameSession::new(&words, &mut rng).unwrap();
            assert!(["apple", "grape", "lemon"].contains(&s.secret_word()));
        }
    }

    #[test]
    fn test_new_session_seeded_rng_is_reproducible() {
        let words = ["apple", "grape", "lemon", "melon", "peach"];
        let first = GameSession::new(&words, &mut StdRng::seed_from_u64(42)).unwrap();
        let second = GameSession::new(&words, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(first.secret_word(), second.secret_word());
    }

    #[test]
    fn test_new_session_reaches_every_word() {
        let words = ["apple", "grape", "lemon"];
        let mut rng = StdRng::seed_from_u64(1);
        let mut seen = Vec::new();
        for _ in 0..200 {
            let s = GameSession::new(&words, &mut rng).unwrap();
            if !seen.contains(&s.secret_word().to_string()) {
                seen.push(s.secret_word().to_string());
            }
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_cat_scenario() {
        let mut s = session("cat");
        assert_eq!(s.apply_guess('c').unwrap(), GuessResult::Correct);
        assert_eq!(s.current_display(), "c _ _");
        assert_eq!(s.apply_guess('x').unwrap(), GuessResult::Incorrect);
        assert_eq!(s.attempts_remaining(), 6);
        assert_eq!(s.apply_guess('a').unwrap(), GuessResult::Correct);
        assert_eq!(s.outcome(), Outcome::InProgress);
        assert_eq!(s.apply_guess('t').unwrap(), GuessResult::Correct);
        assert_eq!(s.outcome(), Outcome::Won);
        assert_eq!(s.current_display(), "c a t");
        assert_eq!(s.guessed_letters().to_string(), "[a, c, t, x]");
    }

    #[test]
    fn test_dog_scenario() {
        let mut s = session("dog");
        for (i, letter) in ['x', 'y', 'z', 'w', 'v', 'u', 't'].into_iter().enumerate() {
            assert_eq!(s.apply_guess(letter).unwrap(), GuessResult::Incorrect);
            assert_eq!(usize::from(s.attempts_remaining()), 6 - i);
        }
        assert_eq!(s.attempts_remaining(), 0);
        assert_eq!(s.outcome(), Outcome::Lost);
        assert_eq!(s.wrong_guesses(), MAX_ATTEMPTS);
        assert_eq!(s.current_display(), "_ _ _");
    }

    #[test]
    fn test_owl_scenario() {
        let mut s = session("owl");
        assert_eq!(s.apply_hint().unwrap(), HintResult::HintRevealed('o'));
        assert_eq!(s.hints_remaining(), 2);
        assert_eq!(s.apply_hint().unwrap(), HintResult::HintRevealed('w'));
        assert_eq!(s.hints_remaining(), 1);
        assert_eq!(s.apply_hint().unwrap(), HintResult::HintRevealed('l'));
        assert_eq!(s.hints_remaining(), 0);
        assert_eq!(s.outcome(), Outcome::Won);
        assert_eq!(s.apply_hint().unwrap(), HintResult::NoHintsLeft);
        assert!(matches!(s.apply_guess('a'), Err(GameError::SessionTerminated)));
        assert_eq!(s.current_display(), "o w l");
        assert!(s.guessed_letters().is_empty());
    }

    #[test]
    fn test_duplicate_guess_changes_nothing() {
        let mut s = session("banana");
        s.apply_guess('a').unwrap();
        s.apply_guess('q').unwrap();
        let before = s.clone();

        assert_eq!(s.apply_guess('a').unwrap(), GuessResult::AlreadyGuessed);
        assert_eq!(s.apply_guess('q').unwrap(), GuessResult::AlreadyGuessed);
        assert_eq!(s.apply_guess('Q').unwrap(), GuessResult::AlreadyGuessed);
        assert_eq!(s.attempts_remaining(), before.attempts_remaining());
        assert_eq!(s.hints_remaining(), before.hints_remaining());
        assert_eq!(s.correct_letters(), before.correct_letters());
        assert_eq!(s.guessed_letters(), before.guessed_letters());
    }

    #[test]
    fn test_apply_guess_rejects_non_letters() {
        let mut s = session("cat");
        assert!(matches!(s.apply_guess('3'), Err(GameError::GuessFormat(_))));
        assert!(matches!(s.apply_guess(' '), Err(GameError::GuessFormat(_))));
        assert_eq!(s.attempts_remaining(), MAX_ATTEMPTS);
        assert!(s.guessed_letters().is_empty());
    }

    #[test]
    fn test_apply_guess_folds_case() {
        let mut s = session("cat");
        assert_eq!(s.apply_guess('C').unwrap(), GuessResult::Correct);
        assert!(s.guessed_letters().contains('c'));
    }

    #[test]
    fn test_repeated_letters_revealed_together() {
        let mut s = session("banana");
        s.apply_guess('a').unwrap();
        assert_eq!(s.current_display(), "_ a _ a _ a");
        assert_eq!(s.apply_hint().unwrap(), HintResult::HintRevealed('b'));
        assert_eq!(s.apply_hint().unwrap(), HintResult::HintRevealed('n'));
        assert_eq!(s.outcome(), Outcome::Won);
        assert_eq!(s.hints_remaining(), 1);
    }

    #[test]
    fn test_hint_skips_revealed_positions() {
        let mut s = session("rhythm");
        s.apply_guess('r').unwrap();
        s.apply_guess('h').unwrap();
        assert_eq!(s.apply_hint().unwrap(), HintResult::HintRevealed('y'));
        assert_eq!(s.current_display(), "r h y _ h _");
    }

    #[test]
    fn test_guessing_hinted_letter_is_correct() {
        let mut s = session("rust");
        assert_eq!(s.apply_hint().unwrap(), HintResult::HintRevealed('r'));
        assert_eq!(s.apply_guess('r').unwrap(), GuessResult::Correct);
        assert_eq!(s.attempts_remaining(), MAX_ATTEMPTS);
        assert_eq!(s.apply_guess('r').unwrap(), GuessResult::AlreadyGuessed);
    }

    #[test]
    fn test_hints_run_out() {
        let mut s = session("quixotic");
        for _ in 0..HINT_LIMIT {
            assert!(matches!(s.apply_hint().unwrap(), HintResult::HintRevealed(_)));
        }
        let before = s.clone();
        assert_eq!(s.apply_hint().unwrap(), HintResult::NoHintsLeft);
        assert_eq!(s.correct_letters(), before.correct_letters());
        assert_eq!(s.outcome(), Outcome::InProgress);
    }

    #[test]
    fn test_no_hint_available_when_fully_revealed() {
        let mut s = session("cat");
        s.correct_letters = s.word_letters;
        assert_eq!(s.apply_hint().unwrap(), HintResult::NoHintAvailable);
        assert_eq!(s.hints_remaining(), HINT_LIMIT);
    }

    #[test]
    fn test_finished_session_is_frozen() {
        let mut s = session("dog");
        for letter in "abcefhi".chars() {
            s.apply_guess(letter).unwrap();
        }
        assert_eq!(s.outcome(), Outcome::Lost);
        let before = s.clone();

        for letter in 'a'..='z' {
            assert!(matches!(s.apply_guess(letter), Err(GameError::SessionTerminated)));
        }
        assert!(matches!(s.apply_hint(), Err(GameError::SessionTerminated)));
        assert_eq!(s.outcome(), Outcome::Lost);
        assert_eq!(s.attempts_remaining(), before.attempts_remaining());
        assert_eq!(s.hints_remaining(), before.hints_remaining());
        assert_eq!(s.guessed_letters(), before.guessed_letters());
        assert_eq!(s.correct_letters(), before.correct_letters());
    }

    #[test]
    fn test_win_on_last_attempt() {
        let mut s = session("ab");
        for letter in "cdefgh".chars() {
            s.apply_guess(letter).unwrap();
        }
        assert_eq!(s.attempts_remaining(), 1);
        s.apply_guess('a').unwrap();
        assert_eq!(s.apply_guess('b').unwrap(), GuessResult::Correct);
        assert_eq!(s.outcome(), Outcome::Won);
        assert_eq!(s.attempts_remaining(), 1);
    }

    #[test]
    fn test_invariants_hold_across_play() {
        let words = ["cat", "banana", "rhythm", "queue", "jazz", "strengths"];
        let orders = [
            "etaoinshrdlcumwfgypbvkjxqz",
            "zqxjkvbpygfwmucldrhsnioate",
            "aeiouybcdfghjklmnpqrstvwxz",
        ];
        for word in words {
            for order in orders {
                for hint_every in [0, 2, 3] {
                    let mut s = session(word);
                    let mut prev_attempts = s.attempts_remaining();
                    let mut prev_hints = s.hints_remaining();
                    assert_invariants(&s);
                    for (i, letter) in order.chars().enumerate() {
                        if s.is_over() {
                            break;
                        }
                        if hint_every > 0 && i % hint_every == 0 {
                            let result = s.apply_hint().unwrap();
                            if matches!(result, HintResult::HintRevealed(_)) {
                                assert_eq!(s.hints_remaining(), prev_hints - 1);
                            } else {
                                assert_eq!(s.hints_remaining(), prev_hints);
                            }
                            assert_eq!(s.attempts_remaining(), prev_attempts);
                            prev_hints = s.hints_remaining();
                            assert_invariants(&s);
                            if s.is_over() {
                                break;
                            }
                        }
                        let result = s.apply_guess(letter).unwrap();
                        if result == GuessResult::Incorrect {
                            assert_eq!(s.attempts_remaining(), prev_attempts - 1);
                        } else {
                            assert_eq!(s.attempts_remaining(), prev_attempts);
                        }
                        assert_eq!(s.hints_remaining(), prev_hints);
                        prev_attempts = s.attempts_remaining();
                        assert_invariants(&s);
                    }
                    assert!(s.is_over(), "{word} with {order} should finish");
                }
            }
        }
    }
}
