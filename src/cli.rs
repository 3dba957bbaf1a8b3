use crate::engine::{GuessResult, HintResult, Outcome};
use crate::error::GameError;
use crate::game_state::{GameInterface, TurnView};
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

/// Hangman: guess the word one letter at a time
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited word list file
    #[arg(short = 'i', long = "input")]
    pub wordlist_path: Option<PathBuf>,

    /// Use the full-screen terminal interface
    #[arg(short = 't', long = "tui")]
    pub tui: bool,

    /// Seed for word selection, for reproducible games
    #[arg(short = 's', long = "seed")]
    pub seed: Option<u64>,

    /// Append log output to this file instead of stderr
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// UI Input/Output functions

pub fn display_welcome(view: &TurnView) {
    println!("Welcome to Hangman!");
    println!("A word has been selected. Start guessing!");
    println!("Word: {}", view.masked_word);
}

pub fn display_turn(view: &TurnView) {
    println!("Word: {}", view.masked_word);
    println!("Attempts remaining: {}", view.attempts_remaining);
    println!("Letters already guessed: {}", view.guessed_letters);
    println!("Hints remaining: {}", view.hints_remaining);
    print!("Enter a letter guess or 'hint': ");
    flush_prompt(&mut io::stdout());
}

/// Flushes a prompt printed without a newline. Returns false if the flush failed.
pub fn flush_prompt<W: Write>(out: &mut W) -> bool {
    match out.flush() {
        Ok(()) => true,
        Err(e) => {
            log::warn!("Failed to flush prompt: {e}");
            false
        }
    }
}

pub fn read_line<R: BufRead>(reader: &mut R) -> Option<String> {
    let mut input = String::new();
    match reader.read_line(&mut input) {
        Ok(0) => None,
        Ok(_) => Some(input),
        Err(e) => {
            log::warn!("Failed to read input: {e}");
            None
        }
    }
}

pub fn display_invalid_input(error: &GameError) {
    match error {
        GameError::GuessFormat(_) => {
            println!("Invalid guess. Please enter a single letter or 'hint'.");
        }
        other => println!("{other}"),
    }
}

pub fn display_guess_result(result: GuessResult, view: &TurnView) {
    match result {
        GuessResult::Correct => {
            println!("Correct guess!");
            println!("Updated Word: {}", view.masked_word);
        }
        GuessResult::Incorrect => println!("Incorrect guess!"),
        GuessResult::AlreadyGuessed => println!("You already guessed that letter. Try again."),
    }
}

pub fn display_hint_result(result: HintResult) {
    match result {
        HintResult::HintRevealed(letter) => {
            println!("Hint: The word contains the letter '{letter}'.");
        }
        HintResult::NoHintsLeft => println!("You have used all your hints."),
        HintResult::NoHintAvailable => println!("Every letter is already revealed."),
    }
}

pub fn display_outcome(outcome: Outcome, secret_word: &str) {
    match outcome {
        Outcome::Won => {
            println!("Congratulations! You won the ultimate game of Hangman!");
            println!("The word is: {secret_word}");
        }
        Outcome::Lost => {
            println!("Game over! You lost.");
            println!("The word was: {secret_word}");
        }
        Outcome::InProgress => {}
    }
}

/// CLI implementation of the GameInterface trait
/// This struct wraps a BufRead reader and implements the game interface for line-based play
pub struct CliInterface<R: BufRead> {
    reader: R,
}

impl<R: BufRead> CliInterface<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> GameInterface for CliInterface<R> {
    fn display_welcome(&mut self, view: &TurnView) {
        display_welcome(view);
    }

    fn display_turn(&mut self, view: &TurnView) {
        display_turn(view);
    }

    fn read_input(&mut self) -> Option<String> {
        let line = read_line(&mut self.reader);
        if line.is_none() {
            println!();
        }
        line
    }

    fn display_invalid_input(&mut self, error: &GameError) {
        display_invalid_input(error);
    }

    fn display_guess_result(&mut self, _letter: char, result: GuessResult, view: &TurnView) {
        display_guess_result(result, view);
    }

    fn display_hint_result(&mut self, result: HintResult, _view: &TurnView) {
        display_hint_result(result);
    }

    fn display_outcome(&mut self, outcome: Outcome, secret_word: &str) {
        display_outcome(outcome, secret_word);
    }
}
