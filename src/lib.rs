//! CoinSpark - satirical meme coin idea generator
//!
//! Asks a generative text model for batches of three meme coin ideas,
//! scores them with a simulated hype score, and keeps a local history and
//! a pinned shortlist.

pub mod config;
pub mod curation;
pub mod error;
pub mod generator;
pub mod store;
pub mod types;
pub mod ui;

// Re-export main types for convenience
pub use config::AppConfig;
pub use curation::{Curator, PinChange};
pub use error::{CardError, ClipboardError, GenerateError, StoreError};
pub use generator::{CompletionTransport, GeminiTransport, IdeaGenerator, RawResponse};
pub use store::{KeyValueStore, MemoryStore, PersistentStore, SqliteStore};
pub use types::{Generation, Idea, IdeaDraft, Theme};
