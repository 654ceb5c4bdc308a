use std::error;

use super::*;

// Every failure in the core is a contract violation by the caller. The three
// classes mirror what callers can get wrong: a malformed model, an operation
// out of sequence, or a hand with an illegal tile count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    InvalidModel(String),
    InvalidGameState(String),
    InvalidHand(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidModel(s) => write!(f, "invalid model: {}", s),
            Error::InvalidGameState(s) => write!(f, "invalid game state: {}", s),
            Error::InvalidHand(s) => write!(f, "invalid hand: {}", s),
        }
    }
}

impl error::Error for Error {}
