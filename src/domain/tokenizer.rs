//! Splits DAIDE text into parenthesis and word tokens.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, instrument};

static TOKEN_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[()]|[^\s()]+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Open,
    Close,
    Word(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Open => write!(f, "("),
            Token::Close => write!(f, ")"),
            Token::Word(word) => write!(f, "{}", word),
        }
    }
}

/// Tokenizes `text` and wraps the sequence in one outer pair of parentheses.
///
/// Surplus closing parens are balanced by prepending opening ones; surplus
/// opening parens are left for the builder, which closes them at end of input.
#[instrument(level = "trace")]
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = vec![Token::Open];
    tokens.extend(TOKEN_REGEX.find_iter(text).map(|m| match m.as_str() {
        "(" => Token::Open,
        ")" => Token::Close,
        word => Token::Word(word.to_string()),
    }));
    tokens.push(Token::Close);

    let opens = tokens.iter().filter(|t| **t == Token::Open).count();
    let closes = tokens.iter().filter(|t| **t == Token::Close).count();
    if closes > opens {
        let missing = closes - opens;
        debug!("padding {} unmatched closing parens", missing);
        let mut padded = vec![Token::Open; missing];
        padded.append(&mut tokens);
        tokens = padded;
    }
    tokens
}
