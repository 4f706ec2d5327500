//! Logical keypad keys.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("unknown key '{0}'")]
    Unknown(String),
}

/// One of the four binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 4] = [
        BinaryOp::Add,
        BinaryOp::Subtract,
        BinaryOp::Multiply,
        BinaryOp::Divide,
    ];

    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            _ => None,
        }
    }

    /// Check if `c` is one of `+ - * /`.
    pub fn is_symbol(c: char) -> bool {
        Self::from_symbol(c).is_some()
    }
}

/// A key press on the keypad.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A digit 0-9.
    Digit(u8),
    /// The decimal point.
    Decimal,
    /// `+ - * /`
    Operator(BinaryOp),
    /// `%`
    Percent,
    /// `+/-`
    SignToggle,
    /// `=`
    Equals,
    /// `C`
    Clear,
}

impl Key {
    /// The character this key appends to the expression, if any.
    pub fn as_char(self) -> Option<char> {
        match self {
            Self::Digit(d) => char::from_digit(u32::from(d), 10),
            Self::Decimal => Some('.'),
            Self::Operator(op) => Some(op.symbol()),
            Self::Percent => Some('%'),
            Self::SignToggle | Self::Equals | Self::Clear => None,
        }
    }

    /// Every key on the keypad, in button order.
    pub fn all() -> Vec<Key> {
        let mut keys: Vec<Key> = (0..=9).map(Key::Digit).collect();
        keys.push(Key::Decimal);
        keys.extend(BinaryOp::ALL.into_iter().map(Key::Operator));
        keys.extend([Key::Percent, Key::SignToggle, Key::Equals, Key::Clear]);
        keys
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.as_char() {
            Some(c) => write!(f, "{c}"),
            None => match self {
                Self::SignToggle => write!(f, "+/-"),
                Self::Equals => write!(f, "="),
                _ => write!(f, "C"),
            },
        }
    }
}

impl FromStr for Key {
    type Err = KeyError;

    /// Parse a button label.
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        let key = match label {
            "+/-" | "+-" | "±" => Key::SignToggle,
            "=" => Key::Equals,
            "C" | "c" | "AC" => Key::Clear,
            "." => Key::Decimal,
            "%" => Key::Percent,
            "x" | "X" | "×" => Key::Operator(BinaryOp::Multiply),
            "÷" => Key::Operator(BinaryOp::Divide),
            _ => {
                let mut chars = label.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_digit() => Key::Digit(c as u8 - b'0'),
                    (Some(c), None) => match BinaryOp::from_symbol(c) {
                        Some(op) => Key::Operator(op),
                        None => return Err(KeyError::Unknown(label.to_string())),
                    },
                    _ => return Err(KeyError::Unknown(label.to_string())),
                }
            }
        };
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_button_labels() {
        assert_eq!("7".parse(), Ok(Key::Digit(7)));
        assert_eq!(".".parse(), Ok(Key::Decimal));
        assert_eq!("+".parse(), Ok(Key::Operator(BinaryOp::Add)));
        assert_eq!("-".parse(), Ok(Key::Operator(BinaryOp::Subtract)));
        assert_eq!("*".parse(), Ok(Key::Operator(BinaryOp::Multiply)));
        assert_eq!("/".parse(), Ok(Key::Operator(BinaryOp::Divide)));
        assert_eq!("%".parse(), Ok(Key::Percent));
        assert_eq!("+/-".parse(), Ok(Key::SignToggle));
        assert_eq!("=".parse(), Ok(Key::Equals));
        assert_eq!("C".parse(), Ok(Key::Clear));
    }

    #[test]
    fn test_parse_aliases() {
        assert_eq!("X".parse(), Ok(Key::Operator(BinaryOp::Multiply)));
        assert_eq!("÷".parse(), Ok(Key::Operator(BinaryOp::Divide)));
        assert_eq!("±".parse(), Ok(Key::SignToggle));
        assert_eq!("AC".parse(), Ok(Key::Clear));
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            "12".parse::<Key>(),
            Err(KeyError::Unknown("12".to_string()))
        );
        assert!("".parse::<Key>().is_err());
        assert!("^".parse::<Key>().is_err());
    }

    #[test]
    fn test_all_keys_round_trip_through_labels() {
        let keys = Key::all();
        assert_eq!(keys.len(), 19);
        for key in keys {
            assert_eq!(key.to_string().parse(), Ok(key));
        }
    }
}
