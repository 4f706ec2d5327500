use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use zcalc::{Config, InputState, Key, Keypad};

/// Drive the keypad calculator from the terminal.
///
/// Each argument (or each whitespace-separated word on stdin) is a button
/// label: 0-9 . + - * / % +/- = C
#[derive(Debug, Parser)]
#[command(name = "zcalc", version, about)]
struct Cli {
    /// Keys to press in order. Reads lines from stdin when omitted.
    #[arg(allow_hyphen_values = true)]
    keys: Vec<String>,

    /// Config file (defaults to the user config directory).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also print the state flags.
    #[arg(long)]
    show_state: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn press_labels<'a>(
    keypad: &Keypad,
    state: InputState,
    labels: impl IntoIterator<Item = &'a str>,
) -> InputState {
    labels
        .into_iter()
        .fold(state, |state, label| match label.parse::<Key>() {
            Ok(key) => keypad.apply(state, key),
            Err(e) => {
                warn!("skipping input: {} (valid keys: {})", e, valid_labels());
                state
            }
        })
}

fn valid_labels() -> String {
    Key::all()
        .iter()
        .map(Key::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

fn render(state: &InputState, show_state: bool) -> String {
    if show_state {
        format!(
            "{}\t[last_was_operator={} result_displayed={}]",
            state.display(),
            state.last_was_operator,
            state.result_displayed
        )
    } else {
        state.display().to_string()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;
    let keypad = config.keypad();
    debug!(limits = ?keypad.limits(), error_token = %config.error_token, "keypad ready");

    if !cli.keys.is_empty() {
        let state = press_labels(&keypad, InputState::new(), cli.keys.iter().map(String::as_str));
        println!("{}", render(&state, cli.show_state));
        return Ok(());
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut state = InputState::new();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        state = press_labels(&keypad, state, line.split_whitespace());
        writeln!(stdout, "{}", render(&state, cli.show_state))?;
        stdout.flush()?;
    }

    Ok(())
}
