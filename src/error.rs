use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("word source contains no usable words")]
    EmptyWordSource,
    #[error("failed to read word list from '{}': {source}", .path.display())]
    WordSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{0}' is not a word made of the letters a-z")]
    InvalidWord(String),
    #[error("invalid guess {0:?}: expected a single letter")]
    GuessFormat(String),
    #[error("the game is already over")]
    SessionTerminated,
}
