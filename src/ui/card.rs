//! Addressing of rendered cards.
//!
//! Positions are shown and typed 1-based: `p2` is the second pinned idea,
//! `3.1` is the first idea of the third generation in history.

use std::fmt;
use std::str::FromStr;

use crate::error::CardError;

/// Zero-based position of a card in one of the two galleries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardRef {
    Pinned(usize),
    History { generation: usize, idea: usize },
}

impl fmt::Display for CardRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardRef::Pinned(index) => write!(f, "p{}", index + 1),
            CardRef::History { generation, idea } => write!(f, "{}.{}", generation + 1, idea + 1),
        }
    }
}

impl FromStr for CardRef {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        let invalid = || CardError::Invalid(raw.to_string());
        let one_based = |part: &str| -> Result<usize, CardError> {
            match part.parse::<usize>() {
                Ok(n) if n > 0 => Ok(n - 1),
                _ => Err(invalid()),
            }
        };

        if let Some(rest) = raw.strip_prefix('p').or_else(|| raw.strip_prefix('P')) {
            return Ok(CardRef::Pinned(one_based(rest)?));
        }

        let (generation, idea) = raw.split_once('.').ok_or_else(invalid)?;
        Ok(CardRef::History {
            generation: one_based(generation)?,
            idea: one_based(idea)?,
        })
    }
}
