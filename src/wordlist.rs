use crate::debug_log;
use crate::error::GameError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const EMBEDDED_WORDLIST: &str = include_str!("resources/words.txt");

const CONFIG_DIR_NAME: &str = "hangman";
const WORDLIST_FILE_NAME: &str = "words.txt";

fn parse_word(line: &str) -> Option<String> {
    let word = line.trim().to_lowercase();
    if word.is_empty() {
        return None;
    }
    if !word.chars().all(|c| c.is_ascii_lowercase()) {
        debug_log!("Skipping word list entry {:?}", line);
        return None;
    }
    Some(word)
}

pub fn load_words_from_str(data: &str) -> Vec<String> {
    data.lines().filter_map(parse_word).collect()
}

pub fn load_words_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<String>, GameError> {
    let path = path.as_ref();
    let source = |source| GameError::WordSource {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(source)?;
    let reader = BufReader::new(file);
    let mut words = Vec::new();
    for line in reader.lines() {
        if let Some(word) = parse_word(&line.map_err(source)?) {
            words.push(word);
        }
    }

    if words.is_empty() {
        return Err(GameError::EmptyWordSource);
    }
    Ok(words)
}

/// Location of the per-user word list: `<config dir>/hangman/words.txt`.
#[must_use]
pub fn default_wordlist_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(WORDLIST_FILE_NAME))
}

/// Picks the word list for a game: an explicit path, else the per-user file
/// if one exists, else the embedded list.
pub fn resolve_words(explicit: Option<&Path>) -> Result<Vec<String>, GameError> {
    if let Some(path) = explicit {
        return load_words_from_file(path);
    }
    if let Some(path) = default_wordlist_path()
        && path.is_file()
    {
        log::info!("Using word list {}", path.display());
        return load_words_from_file(&path);
    }
    Ok(load_words_from_str(EMBEDDED_WORDLIST))
}
