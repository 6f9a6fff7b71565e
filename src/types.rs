//! Core types and data structures for the CoinSpark idea generator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Number of ideas requested from the model per generation.
pub const IDEAS_PER_GENERATION: usize = 3;

/// Inclusive bounds of the simulated hype score.
pub const HYPE_SCORE_MIN: u8 = 50;
pub const HYPE_SCORE_MAX: u8 = 100;

/// The seven descriptive fields of a meme coin idea, exactly as the model
/// returns them. Anything else in the payload is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct IdeaDraft {
    pub coin_name: String,
    pub ticker: String,
    pub concept: String,
    pub mascot: String,
    pub emoji: String,
    pub slogan: String,
    pub community_vibe: String,
}

impl IdeaDraft {
    /// Attach a hype score, producing the finished idea.
    pub fn with_hype_score(self, hype_score: u8) -> Idea {
        Idea {
            coin_name: self.coin_name,
            ticker: self.ticker,
            concept: self.concept,
            mascot: self.mascot,
            emoji: self.emoji,
            slogan: self.slogan,
            community_vibe: self.community_vibe,
            hype_score,
        }
    }
}

/// A generated meme coin concept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub coin_name: String,
    /// Usually 3-5 characters, but the model is not held to it.
    pub ticker: String,
    pub concept: String,
    pub mascot: String,
    pub emoji: String,
    pub slogan: String,
    pub community_vibe: String,
    /// Display-only score in `[HYPE_SCORE_MIN, HYPE_SCORE_MAX]`.
    pub hype_score: u8,
}

impl Idea {
    /// Identity used for pin deduplication.
    pub fn key(&self) -> IdeaKey<'_> {
        IdeaKey {
            coin_name: &self.coin_name,
            concept: &self.concept,
        }
    }

    pub fn same_identity(&self, other: &Idea) -> bool {
        self.key() == other.key()
    }
}

/// Borrowed `(coinName, concept)` identity pair of an [`Idea`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdeaKey<'a> {
    pub coin_name: &'a str,
    pub concept: &'a str,
}

/// One completed request: its inputs and the batch of ideas it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Generation {
    pub topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    pub ideas: Vec<Idea>,
    pub created_at: DateTime<Utc>,
}

impl Generation {
    pub fn new(topic: impl Into<String>, style: Option<String>, ideas: Vec<Idea>) -> Self {
        Self {
            topic: topic.into(),
            style,
            ideas,
            created_at: Utc::now(),
        }
    }
}

/// Terminal colour palette preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

/// Normalise an optional style input: blank means no style.
pub fn normalize_style(style: Option<&str>) -> Option<String> {
    style
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}
