//! "Surprise Me" inputs.

use rand::seq::SliceRandom;
use rand::Rng;

pub const SURPRISE_TOPICS: &[&str] = &[
    "Sleepy Sloths",
    "Space Cats",
    "Pizza-Loving Pigeons",
    "Quantum Frogs",
    "Disco Llamas",
    "Retired Office Printers",
    "Existential Toasters",
    "Competitive Napping",
];

pub const SURPRISE_STYLES: &[&str] = &[
    "Cyberpunk",
    "Retro 80s",
    "Wholesome",
    "Absurdist",
    "Corporate Satire",
    "Medieval Fantasy",
];

/// Uniformly pick one topic and one style.
pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static str) {
    let topic = SURPRISE_TOPICS.choose(rng).copied().unwrap_or("Sleepy Sloths");
    let style = SURPRISE_STYLES.choose(rng).copied().unwrap_or("Cyberpunk");
    (topic, style)
}
