//! Transient presentation state. Nothing here is persisted except the
//! theme, which the app saves separately.

use std::time::{Duration, Instant};

use crate::types::Theme;
use crate::ui::card::CardRef;

/// How long a card shows "Copied!" after a successful copy.
pub const COPIED_FEEDBACK: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub topic: String,
    pub style: String,
    pub loading: bool,
    pub error: Option<String>,
    pub theme: Theme,
    copied: Option<(CardRef, Instant)>,
}

impl UiState {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn set_error(&mut self, err: &dyn std::error::Error) {
        self.error = Some(err.to_string());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn mark_copied(&mut self, card: CardRef, now: Instant) {
        self.copied = Some((card, now));
    }

    /// True while `card` is inside its feedback window.
    pub fn is_copied(&self, card: CardRef, now: Instant) -> bool {
        match self.copied {
            Some((copied, at)) => {
                copied == card && now.saturating_duration_since(at) < COPIED_FEEDBACK
            }
            None => false,
        }
    }
}
