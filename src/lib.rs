//! Keypad calculator core.
//!
//! [`keypad`] builds the expression one key at a time and [`calculator`]
//! evaluates it when `=` is pressed.

pub mod calculator;
pub mod config;
pub mod keypad;

pub use calculator::{CalcResult, evaluate, evaluate_expression};
pub use config::Config;
pub use keypad::{InputState, Key, Keypad, apply};
