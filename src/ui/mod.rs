//! Presentation layer: card addressing, transient state, rendering,
//! clipboard export and the interactive shell.

pub mod app;
pub mod card;
pub mod clipboard;
pub mod render;
pub mod shell;
pub mod state;
pub mod surprise;

pub use app::{App, GenerationRequest, PendingGeneration};
pub use card::CardRef;
pub use clipboard::{Clipboard, SystemClipboard};
pub use render::Palette;
pub use state::UiState;
