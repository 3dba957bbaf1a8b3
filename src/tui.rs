//! TUI (Terminal User Interface) module for Hangman
//!
//! This module provides a full-screen terminal interface using Ratatui.
//!
//! # Architecture
//! - `InputLine`: line editor fed by key events, independent of the terminal
//! - `TuiInterface`: rendering plus the `GameInterface` implementation
//!
//! # State Machine
//! - `EnteringGuess` → (player submits) → `EnteringGuess`
//! - Terminal state: `GameOver`, left by any key press

use crate::engine::{GuessResult, HintResult, MAX_ATTEMPTS, Outcome};
use crate::error::GameError;
use crate::game_state::{GameInterface, TurnView};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};
use std::io;
use std::time::Duration;

const MAX_INPUT_LEN: usize = 16;
const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ASCII_CONTROL_CHAR_THRESHOLD: u32 = 32;
const GALLOWS_WIDTH: u16 = 17;

// Style constants for consistent UI
const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const SUCCESS_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const INFO_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);
const MESSAGE_STYLE: Style = Style::new().fg(Color::Cyan);
const WORD_STYLE: Style = Style::new().fg(Color::White).add_modifier(Modifier::BOLD);

/// Gallows drawing for the given number of wrong guesses.
#[must_use]
pub fn gallows_lines(wrong_guesses: u8) -> Vec<String> {
    let head = match wrong_guesses {
        0 => ' ',
        w if w < MAX_ATTEMPTS => 'O',
        _ => 'X',
    };
    let arms = match wrong_guesses {
        0 | 1 => "   ",
        2 => " | ",
        3 => "/| ",
        _ => "/|\\",
    };
    let legs = match wrong_guesses {
        0..=4 => "   ",
        5 => "/  ",
        _ => "/ \\",
    };

    vec![
        "  +---+".to_string(),
        "  |   |".to_string(),
        format!("  {head}   |"),
        format!(" {arms}  |"),
        format!(" {legs}  |"),
        "      |".to_string(),
        "=========".to_string(),
    ]
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum KeyAction {
    Submit(String),
    Quit,
}

/// Single-line editor for guesses and the `hint` keyword.
#[derive(Debug, Default)]
struct InputLine {
    buffer: String,
    error: Option<String>,
}

impl InputLine {
    fn has_modifier_keys(key: &KeyEvent) -> bool {
        key.modifiers.contains(KeyModifiers::ALT) || key.modifiers.contains(KeyModifiers::CONTROL)
    }

    fn on_key(&mut self, key: KeyEvent) -> Option<KeyAction> {
        self.error = None;
        match key.code {
            KeyCode::Esc => return Some(KeyAction::Quit),
            KeyCode::Char(_) if Self::has_modifier_keys(&key) => {
                debug_log!("InputLine::on_key() - Ignoring modified key: {:?}", key.modifiers);
            }
            KeyCode::Char(c) if self.buffer.chars().count() < MAX_INPUT_LEN => {
                self.buffer.push(c);
            }
            KeyCode::Char(_) => {
                self.error = Some("Input is too long!".to_string());
            }
            KeyCode::Backspace => {
                self.buffer.pop();
            }
            KeyCode::Enter if self.buffer.trim().is_empty() => {
                self.buffer.clear();
                self.error = Some("Type a letter or 'hint' first.".to_string());
            }
            KeyCode::Enter => return Some(KeyAction::Submit(std::mem::take(&mut self.buffer))),
            _ => {
                debug_log!("InputLine::on_key() - Ignoring key: {:?}", key.code);
            }
        }
        None
    }
}

/// Message, error and status lines shown around the board.
#[derive(Debug)]
struct ScreenText {
    message: String,
    message_style: Style,
    error_message: String,
    status: String,
}

impl ScreenText {
    fn new() -> Self {
        Self {
            message: String::new(),
            message_style: MESSAGE_STYLE,
            error_message: String::new(),
            status: String::new(),
        }
    }

    fn set_message(&mut self, message: String, style: Style) {
        self.message = message;
        self.message_style = style;
        self.error_message.clear();
    }

    fn show_welcome(&mut self) {
        self.status.clear();
        self.set_message(
            "Welcome to Hangman! A word has been selected. Start guessing!".to_string(),
            MESSAGE_STYLE,
        );
    }

    fn show_outcome(&mut self, outcome: Outcome, secret_word: &str) {
        match outcome {
            Outcome::Won => {
                self.status = "You won!".to_string();
                self.set_message(
                    format!("Congratulations! The word is: {secret_word}"),
                    SUCCESS_STYLE,
                );
            }
            Outcome::Lost => {
                self.status = "Game over!".to_string();
                self.set_message(format!("You lost. The word was: {secret_word}"), ERROR_STYLE);
            }
            Outcome::InProgress => {}
        }
    }
}

#[derive(Debug)]
enum TuiState {
    EnteringGuess,
    /// Game has ended - the word is revealed and any key leaves
    GameOver,
}

/// Context for rendering the UI - groups related parameters to avoid too many function arguments.
struct RenderContext<'a> {
    view: Option<&'a TurnView>,
    input: &'a InputLine,
    state: &'a TuiState,
    message: &'a str,
    message_style: Style,
    error_message: &'a str,
    status: &'a str,
}

/// Main TUI interface component.
///
/// Manages terminal rendering, input handling, and game state display.
pub struct TuiInterface {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    view: Option<TurnView>,
    input: InputLine,
    state: TuiState,
    text: ScreenText,
}

impl TuiInterface {
    pub fn new() -> Result<Self, io::Error> {
        info_log!("TuiInterface::new() - Initializing TUI");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        info_log!("Terminal setup complete: raw mode, alternate screen, cursor hidden");

        Ok(Self {
            terminal,
            view: None,
            input: InputLine::default(),
            state: TuiState::EnteringGuess,
            text: ScreenText::new(),
        })
    }

    pub fn cleanup(&mut self) -> Result<(), io::Error> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn draw(&mut self) -> Result<(), io::Error> {
        let ctx = RenderContext {
            view: self.view.as_ref(),
            input: &self.input,
            state: &self.state,
            message: &self.text.message,
            message_style: self.text.message_style,
            error_message: &self.text.error_message,
            status: &self.text.status,
        };

        self.terminal.draw(|f| {
            Self::render_static(f, &ctx);
        })?;
        Ok(())
    }

    /// Log and handle draw errors appropriately
    fn draw_or_log(&mut self) {
        if let Err(e) = self.draw() {
            debug_log!("Draw error: {}", e);
        }
    }

    fn render_static(f: &mut Frame, ctx: &RenderContext) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Min(9),    // Gallows and word
                Constraint::Length(4), // Messages
                Constraint::Length(3), // Input
                Constraint::Length(3), // Instructions
            ])
            .split(f.area());

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(GALLOWS_WIDTH), Constraint::Min(20)])
            .split(chunks[1]);

        Self::render_title(f, chunks[0]);
        Self::render_gallows(f, body[0], ctx.view);
        Self::render_word(f, body[1], ctx.view, ctx.status);
        Self::render_messages(f, chunks[2], ctx);
        Self::render_input(f, chunks[3], ctx.input, ctx.state);
        Self::render_instructions(f, chunks[4], ctx.state);
    }

    fn render_title(f: &mut Frame, area: Rect) {
        let title = Paragraph::new("HANGMAN")
            .style(HEADER_STYLE)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(title, area);
    }

    fn render_gallows(f: &mut Frame, area: Rect, view: Option<&TurnView>) {
        let wrong = view.map_or(0, |v| v.wrong_guesses);
        let lines: Vec<Line> = gallows_lines(wrong).into_iter().map(Line::from).collect();
        let paragraph =
            Paragraph::new(lines).block(Block::default().title("Gallows").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_word(f: &mut Frame, area: Rect, view: Option<&TurnView>, status: &str) {
        let mut lines = Vec::new();

        if let Some(view) = view {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(view.masked_word.clone(), WORD_STYLE),
            ]));
            lines.push(Line::from(""));
            lines.push(Line::from(vec![
                Span::styled("Attempts remaining: ", INFO_STYLE),
                Span::raw(format!(
                    "{} {}",
                    view.attempts_remaining,
                    "♥".repeat(usize::from(view.attempts_remaining))
                )),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Hints remaining: ", INFO_STYLE),
                Span::raw(view.hints_remaining.to_string()),
            ]));
            lines.push(Line::from(vec![
                Span::styled("Guessed: ", INFO_STYLE),
                Span::raw(view.guessed_letters.to_string()),
            ]));
        }

        if !status.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(vec![Span::styled(status, HEADER_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Word").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_messages(f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let mut lines = Vec::new();
        if !ctx.message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.message, ctx.message_style)]));
        }
        if !ctx.error_message.is_empty() {
            lines.push(Line::from(vec![Span::styled(ctx.error_message, ERROR_STYLE)]));
        }
        if let Some(error) = &ctx.input.error {
            lines.push(Line::from(vec![Span::styled(error.as_str(), ERROR_STYLE)]));
        }

        let paragraph = Paragraph::new(lines)
            .block(Block::default().title("Information").borders(Borders::ALL))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_input(f: &mut Frame, area: Rect, input: &InputLine, state: &TuiState) {
        let text = match state {
            TuiState::EnteringGuess => format!("> {}_", input.buffer),
            TuiState::GameOver => String::new(),
        };
        let paragraph =
            Paragraph::new(text).block(Block::default().title("Guess").borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn render_instructions(f: &mut Frame, area: Rect, state: &TuiState) {
        let paragraph = Paragraph::new(instructions(state))
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(paragraph, area);
    }

    fn next_key(&mut self) -> Result<Option<KeyEvent>, io::Error> {
        if !event::poll(Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(None);
        }

        match event::read()? {
            Event::Key(key) => {
                // Only process Press events, ignore Release and Repeat to avoid double input
                if key.kind != KeyEventKind::Press {
                    return Ok(None);
                }
                // Replacement and control characters show up when alt-tabbing
                if let KeyCode::Char(c) = key.code
                    && (c == '\u{FFFD}' || (c as u32) < ASCII_CONTROL_CHAR_THRESHOLD)
                {
                    debug_log!("next_key() - Ignoring invalid character {:?}", c);
                    return Ok(None);
                }
                Ok(Some(key))
            }
            Event::Resize(_, _) => {
                self.draw_or_log();
                Ok(None)
            }
            other => {
                debug_log!("next_key() - Ignoring event: {:?}", other);
                Ok(None)
            }
        }
    }

    fn wait_for_any_key(&mut self) {
        loop {
            match self.next_key() {
                Ok(Some(_)) => return,
                Ok(None) => {}
                Err(e) => {
                    debug_log!("wait_for_any_key() - Input error: {}", e);
                    return;
                }
            }
        }
    }
}

fn instructions(state: &TuiState) -> &'static str {
    match state {
        TuiState::EnteringGuess => "Type a letter or 'hint' | ENTER: Submit | ESC: Quit",
        TuiState::GameOver => "Press any key to exit",
    }
}

impl GameInterface for TuiInterface {
    fn display_welcome(&mut self, view: &TurnView) {
        self.view = Some(view.clone());
        self.text.show_welcome();
    }

    fn display_turn(&mut self, view: &TurnView) {
        self.view = Some(view.clone());
        self.state = TuiState::EnteringGuess;
        self.draw_or_log();
    }

    fn read_input(&mut self) -> Option<String> {
        loop {
            self.draw_or_log();
            let key = match self.next_key() {
                Ok(Some(key)) => key,
                Ok(None) => continue,
                Err(e) => {
                    info_log!("read_input() - Error reading input, quitting: {}", e);
                    return None;
                }
            };
            match self.input.on_key(key) {
                Some(KeyAction::Submit(line)) => {
                    info_log!("read_input() - Submitted {:?}", line);
                    return Some(line);
                }
                Some(KeyAction::Quit) => {
                    info_log!("read_input() - ESC pressed, quitting");
                    return None;
                }
                None => {}
            }
        }
    }

    fn display_invalid_input(&mut self, error: &GameError) {
        self.text.error_message = match error {
            GameError::GuessFormat(_) => {
                "Invalid guess. Please enter a single letter or 'hint'.".to_string()
            }
            other => other.to_string(),
        };
    }

    fn display_guess_result(&mut self, letter: char, result: GuessResult, view: &TurnView) {
        self.view = Some(view.clone());
        match result {
            GuessResult::Correct => {
                self.text.set_message(
                    format!("Correct guess! '{letter}' is in the word."),
                    SUCCESS_STYLE,
                );
            }
            GuessResult::Incorrect => {
                self.text.set_message(
                    format!("Incorrect guess! '{letter}' is not in the word."),
                    ERROR_STYLE,
                );
            }
            GuessResult::AlreadyGuessed => {
                self.text.set_message(
                    format!("You already guessed '{letter}'. Try again."),
                    INFO_STYLE,
                );
            }
        }
    }

    fn display_hint_result(&mut self, result: HintResult, view: &TurnView) {
        self.view = Some(view.clone());
        match result {
            HintResult::HintRevealed(letter) => self.text.set_message(
                format!("Hint: The word contains the letter '{letter}'."),
                INFO_STYLE,
            ),
            HintResult::NoHintsLeft => {
                self.text.set_message("You have used all your hints.".to_string(), ERROR_STYLE);
            }
            HintResult::NoHintAvailable => self.text.set_message(
                "Every letter is already revealed.".to_string(),
                MESSAGE_STYLE,
            ),
        }
    }

    fn display_outcome(&mut self, outcome: Outcome, secret_word: &str) {
        if outcome == Outcome::InProgress {
            return;
        }
        self.state = TuiState::GameOver;
        self.text.show_outcome(outcome, secret_word);
        self.draw_or_log();
        self.wait_for_any_key();
    }
}

impl Drop for TuiInterface {
    fn drop(&mut self) {
        if let Err(e) = self.cleanup() {
            debug_log!("TuiInterface::drop() - Cleanup failed: {}", e);
        }
    }
}
