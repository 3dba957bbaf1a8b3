use hangman::cli::{CliInterface, parse_cli};
use hangman::game_state::{GameInterface, play};
use hangman::logging::init_logging;
use hangman::tui::TuiInterface;
use hangman::wordlist::resolve_words;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::io;

fn main() {
    let cli = parse_cli();
    if let Err(e) = init_logging(cli.log_file.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        return;
    }

    let words = match resolve_words(cli.wordlist_path.as_deref()) {
        Ok(words) => words,
        Err(e) => {
            eprintln!("{e}");
            return;
        }
    };
    log::info!("Loaded {} words", words.len());

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let stdin = io::stdin();
    let mut interface: Box<dyn GameInterface> = if cli.tui {
        match TuiInterface::new() {
            Ok(tui) => Box::new(tui),
            Err(e) => {
                eprintln!("Failed to start the terminal interface: {e}");
                return;
            }
        }
    } else {
        Box::new(CliInterface::new(stdin.lock()))
    };

    match play(&words, &mut rng, interface.as_mut()) {
        Ok(outcome) => log::info!("Game ended: {outcome:?}"),
        Err(e) => {
            drop(interface);
            eprintln!("Could not start a game: {e}");
        }
    }
}
