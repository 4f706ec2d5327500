//! Arithmetic parsing and evaluation.
//!
//! A small recursive-descent evaluator over `f64`:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-')* primary
//! primary := number | '(' expr ')'
//! ```
//!
//! A sign may not repeat (`--3`), and parentheses nest at most
//! [`MAX_DEPTH`] deep, so no input can exhaust the stack.
//!
//! Operators of one level associate left to right. All arithmetic is plain
//! IEEE-754, so `1/0` is `Infinity` and `0/0` is `NaN` rather than errors.

use std::fmt;
use std::iter::Peekable;
use std::vec::IntoIter;

use thiserror::Error;

/// Failure to parse an arithmetic expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("empty expression")]
    Empty,
    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },
    #[error("unknown name '{0}'")]
    UnknownName(String),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
    #[error("unexpected token '{0}'")]
    UnexpectedToken(Token),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("parentheses nested deeper than {0}")]
    TooDeep(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Token {
    Num(f64),
    Plus,
    Minus,
    Star,
    Slash,
    ParenOpen,
    ParenClose,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::Num(num) => write!(f, "{num}"),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::ParenOpen => write!(f, "("),
            Token::ParenClose => write!(f, ")"),
        }
    }
}

/// Parse and evaluate `input` in one go.
pub fn eval_str(input: &str) -> Result<f64, EvalError> {
    let tokens = tokenize(input)?;
    if tokens.is_empty() {
        return Err(EvalError::Empty);
    }

    let mut parser = Parser {
        tokens: tokens.into_iter().peekable(),
        depth: 0,
    };
    let value = parser.parse_expr()?;

    match parser.tokens.next() {
        Some(token) => Err(EvalError::UnexpectedToken(token)),
        None => Ok(value),
    }
}

/// Split the input into tokens, skipping whitespace.
pub fn tokenize(input: &str) -> Result<Vec<Token>, EvalError> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let ch = chars[i];
        let token = match ch {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::ParenOpen,
            ')' => Token::ParenClose,
            c if c.is_ascii_digit() || c == '.' => {
                let (value, next) = lex_number(&chars, i)?;
                tokens.push(Token::Num(value));
                i = next;
                continue;
            }
            c if c.is_ascii_alphabetic() => {
                let end = scan(&chars, i, |c| c.is_ascii_alphabetic());
                let name: String = chars[i..end].iter().collect();
                let value = match name.as_str() {
                    "Infinity" => f64::INFINITY,
                    "NaN" => f64::NAN,
                    _ => return Err(EvalError::UnknownName(name)),
                };
                tokens.push(Token::Num(value));
                i = end;
                continue;
            }
            ch => return Err(EvalError::UnexpectedChar { ch, pos: i }),
        };
        tokens.push(token);
        i += 1;
    }

    Ok(tokens)
}

/// Lex `digits [. digits] [e [+-] digits]` starting at `start`.
///
/// Either side of the point may be empty (`3.`, `.5`) but not both.
fn lex_number(chars: &[char], start: usize) -> Result<(f64, usize), EvalError> {
    let int_end = scan(chars, start, |c| c.is_ascii_digit());
    let mut end = int_end;
    let mut has_digits = int_end > start;

    if chars.get(end) == Some(&'.') {
        let frac_end = scan(chars, end + 1, |c| c.is_ascii_digit());
        has_digits |= frac_end > end + 1;
        end = frac_end;
    }

    let text = |end: usize| chars[start..end].iter().collect::<String>();
    if !has_digits {
        return Err(EvalError::InvalidNumber(text(end)));
    }

    if matches!(chars.get(end), Some('e' | 'E')) {
        let mut exp_start = end + 1;
        if matches!(chars.get(exp_start), Some('+' | '-')) {
            exp_start += 1;
        }
        let exp_end = scan(chars, exp_start, |c| c.is_ascii_digit());
        if exp_end == exp_start {
            return Err(EvalError::InvalidNumber(text(exp_end)));
        }
        end = exp_end;
    }

    let literal = text(end);
    literal
        .parse::<f64>()
        .map(|value| (value, end))
        .map_err(|_| EvalError::InvalidNumber(literal))
}

fn scan(chars: &[char], from: usize, pred: impl Fn(char) -> bool) -> usize {
    let mut i = from;
    while i < chars.len() && pred(chars[i]) {
        i += 1;
    }
    i
}

/// Deepest parenthesis nesting accepted before giving up.
pub const MAX_DEPTH: usize = 256;

type Tokens = Peekable<IntoIter<Token>>;

struct Parser {
    tokens: Tokens,
    depth: usize,
}

impl Parser {
    fn parse_expr(&mut self) -> Result<f64, EvalError> {
        let mut value = self.parse_term()?;

        while let Some(op) = self
            .tokens
            .next_if(|t| matches!(t, Token::Plus | Token::Minus))
        {
            let rhs = self.parse_term()?;
            value = match op {
                Token::Plus => value + rhs,
                _ => value - rhs,
            };
        }

        Ok(value)
    }

    fn parse_term(&mut self) -> Result<f64, EvalError> {
        let mut value = self.parse_unary()?;

        while let Some(op) = self
            .tokens
            .next_if(|t| matches!(t, Token::Star | Token::Slash))
        {
            let rhs = self.parse_unary()?;
            value = match op {
                Token::Star => value * rhs,
                _ => value / rhs,
            };
        }

        Ok(value)
    }

    /// Leading signs are folded in a loop. `--` and `++` are rejected,
    /// mixed runs like `-+` are fine.
    fn parse_unary(&mut self) -> Result<f64, EvalError> {
        let mut negate = false;
        let mut previous = None;

        while let Some(sign) = self
            .tokens
            .next_if(|t| matches!(t, Token::Plus | Token::Minus))
        {
            if previous == Some(sign) {
                return Err(EvalError::UnexpectedToken(sign));
            }
            if sign == Token::Minus {
                negate = !negate;
            }
            previous = Some(sign);
        }

        let value = self.parse_primary()?;
        Ok(if negate { -value } else { value })
    }

    fn parse_primary(&mut self) -> Result<f64, EvalError> {
        match self.tokens.next() {
            Some(Token::Num(value)) => Ok(value),
            Some(Token::ParenOpen) => {
                if self.depth >= MAX_DEPTH {
                    return Err(EvalError::TooDeep(MAX_DEPTH));
                }
                self.depth += 1;
                let value = self.parse_expr()?;
                self.depth -= 1;

                match self.tokens.next() {
                    Some(Token::ParenClose) => Ok(value),
                    Some(token) => Err(EvalError::UnexpectedToken(token)),
                    None => Err(EvalError::UnexpectedEnd),
                }
            }
            Some(token) => Err(EvalError::UnexpectedToken(token)),
            None => Err(EvalError::UnexpectedEnd),
        }
    }
}
