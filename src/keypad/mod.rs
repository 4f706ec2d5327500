//! Keypad input handling.
//!
//! Turns discrete key presses into the expression shown on the display:
//! - `key`: the logical keys and their button labels
//! - `sign`: the `+/-` policy
//! - `state`: the pure transition function

mod key;
mod sign;
mod state;

pub use key::{BinaryOp, Key, KeyError};
pub use sign::{last_binary_operator, toggle_sign};
pub use state::{
    InputState, Keypad, Limits, MAX_DIGITS_AFTER_OPERATOR, MAX_DIGITS_BEFORE_OPERATOR, apply,
};
