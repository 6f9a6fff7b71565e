//! Application controller tying the generator, curation state, clipboard
//! and presentation state together.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::curation::{Curator, PinChange};
use crate::error::{CardError, GenerateError};
use crate::generator::{validate_topic, IdeaGenerator};
use crate::store::PersistentStore;
use crate::types::{normalize_style, Generation, Idea, Theme};
use crate::ui::card::CardRef;
use crate::ui::clipboard::Clipboard;
use crate::ui::render::{self, CardFlags, Palette};
use crate::ui::state::UiState;
use crate::ui::surprise;

/// Inputs of an accepted generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub topic: String,
    pub style: Option<String>,
}

/// An in-flight generation running on its own task. Resolves to the
/// generator's result; it cannot be cancelled once started.
pub struct PendingGeneration {
    request: GenerationRequest,
    handle: JoinHandle<Result<Vec<Idea>, GenerateError>>,
}

impl PendingGeneration {
    pub fn request(&self) -> &GenerationRequest {
        &self.request
    }

    pub fn into_request(self) -> GenerationRequest {
        self.request
    }
}

impl Future for PendingGeneration {
    type Output = Result<Vec<Idea>, GenerateError>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(|joined| {
            joined.unwrap_or_else(|e| {
                Err(GenerateError::Transport(format!("generation task failed: {e}")))
            })
        })
    }
}

pub struct App {
    generator: Arc<IdeaGenerator>,
    curator: Curator,
    prefs: PersistentStore,
    clipboard: Box<dyn Clipboard>,
    rng: StdRng,
    color: bool,
    pub ui: UiState,
}

impl App {
    pub async fn new(
        generator: Arc<IdeaGenerator>,
        store: PersistentStore,
        clipboard: Box<dyn Clipboard>,
        history_cap: Option<usize>,
    ) -> Self {
        let theme = store.load_theme().await;
        let curator = Curator::load(store.clone(), history_cap).await;
        Self {
            generator,
            curator,
            prefs: store,
            clipboard,
            rng: StdRng::from_entropy(),
            color: false,
            ui: UiState::new(theme),
        }
    }

    /// Seed the source used for "Surprise Me" picks.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn curator(&self) -> &Curator {
        &self.curator
    }

    pub fn palette(&self) -> Palette {
        Palette::new(self.ui.theme, self.color)
    }

    /// Accept a generation request and start it on a background task.
    /// Refused while another request is in flight.
    pub fn start_generation(
        &mut self,
        topic: &str,
        style: Option<&str>,
    ) -> Result<PendingGeneration, GenerateError> {
        if self.ui.loading {
            return Err(GenerateError::Busy);
        }

        self.ui.topic = topic.to_string();
        self.ui.style = style.unwrap_or_default().to_string();

        let topic = match validate_topic(topic) {
            Ok(topic) => topic.to_string(),
            Err(e) => {
                self.ui.set_error(&e);
                return Err(e);
            }
        };
        let request = GenerationRequest {
            topic,
            style: normalize_style(style),
        };

        self.ui.loading = true;
        let generator = Arc::clone(&self.generator);
        let task_request = request.clone();
        let handle = tokio::spawn(async move {
            generator
                .generate(&task_request.topic, task_request.style.as_deref())
                .await
        });

        Ok(PendingGeneration { request, handle })
    }

    /// Pick a random topic and style and start generating with them.
    pub fn start_surprise(&mut self) -> Result<PendingGeneration, GenerateError> {
        if self.ui.loading {
            return Err(GenerateError::Busy);
        }
        let (topic, style) = surprise::pick(&mut self.rng);
        info!("Surprise pick: '{}' in '{}' style", topic, style);
        self.start_generation(topic, Some(style))
    }

    /// Record the outcome of a finished request.
    pub async fn finish_generation(
        &mut self,
        request: GenerationRequest,
        result: Result<Vec<Idea>, GenerateError>,
    ) -> Result<(), GenerateError> {
        self.ui.loading = false;
        match result {
            Ok(ideas) => {
                let generation = Generation::new(request.topic, request.style, ideas);
                self.curator.add_generation(generation).await;
                self.ui.clear_error();
                Ok(())
            }
            Err(e) => {
                warn!("Generation failed: {}", e);
                self.ui.set_error(&e);
                Err(e)
            }
        }
    }

    /// Start, await and record one generation.
    pub async fn generate(
        &mut self,
        topic: &str,
        style: Option<&str>,
    ) -> Result<(), GenerateError> {
        let mut pending = self.start_generation(topic, style)?;
        let result = (&mut pending).await;
        self.finish_generation(pending.into_request(), result).await
    }

    pub async fn surprise(&mut self) -> Result<(), GenerateError> {
        let mut pending = self.start_surprise()?;
        let result = (&mut pending).await;
        self.finish_generation(pending.into_request(), result).await
    }

    pub fn idea_at(&self, card: CardRef) -> Result<&Idea, CardError> {
        let found = match card {
            CardRef::Pinned(index) => self.curator.pinned().get(index),
            CardRef::History { generation, idea } => self
                .curator
                .history()
                .get(generation)
                .and_then(|g| g.ideas.get(idea)),
        };
        found.ok_or_else(|| CardError::NotFound(card.to_string()))
    }

    pub async fn toggle_pin(&mut self, card: CardRef) -> Result<PinChange, CardError> {
        let idea = self.idea_at(card)?.clone();
        let change = self.curator.toggle_pin(&idea).await;
        self.ui.clear_error();
        Ok(change)
    }

    /// Copy the card's text block. Returns whether the clipboard accepted
    /// it; a clipboard failure is only logged.
    pub fn copy(&mut self, card: CardRef, now: Instant) -> Result<bool, CardError> {
        let text = render::clipboard_text(self.idea_at(card)?);
        match self.clipboard.set_text(&text) {
            Ok(()) => {
                self.ui.mark_copied(card, now);
                self.ui.clear_error();
                Ok(true)
            }
            Err(e) => {
                warn!("Copy of {} failed: {}", card, e);
                Ok(false)
            }
        }
    }

    pub async fn clear_history(&mut self) {
        self.curator.clear_history().await;
        self.ui.clear_error();
    }

    pub async fn clear_pinned(&mut self) {
        self.curator.clear_pinned().await;
        self.ui.clear_error();
    }

    pub async fn set_theme(&mut self, theme: Theme) {
        self.ui.theme = theme;
        self.prefs.save_theme(theme).await;
        self.ui.clear_error();
    }

    pub async fn toggle_theme(&mut self) -> Theme {
        let theme = self.ui.theme.toggled();
        self.set_theme(theme).await;
        theme
    }

    fn flags(&self, card: CardRef, idea: &Idea, now: Instant) -> CardFlags {
        CardFlags {
            pinned: self.curator.is_pinned(idea),
            copied: self.ui.is_copied(card, now),
        }
    }

    pub fn render_pinned(&self, now: Instant) -> String {
        let palette = self.palette();
        let mut out = vec![palette.title("📌 Pinned Ideas")];
        if self.curator.pinned().is_empty() {
            out.push(palette.muted("  Nothing pinned yet. Use `pin <card>` on an idea you like."));
        }
        for (index, idea) in self.curator.pinned().iter().enumerate() {
            let card = CardRef::Pinned(index);
            out.push(render::render_card(idea, card, self.flags(card, idea, now), &palette));
        }
        out.join("\n")
    }

    pub fn render_history(&self, now: Instant) -> String {
        let palette = self.palette();
        let mut out = vec![palette.title("🕘 History")];
        if self.curator.history().is_empty() {
            out.push(palette.muted("  No generations yet. Try `generate <topic>` or `surprise`."));
        }
        for (g, generation) in self.curator.history().iter().enumerate() {
            out.push(render::render_generation_header(g, generation, &palette));
            for (i, idea) in generation.ideas.iter().enumerate() {
                let card = CardRef::History { generation: g, idea: i };
                out.push(render::render_card(idea, card, self.flags(card, idea, now), &palette));
            }
        }
        out.join("\n")
    }

    /// Full screen: status line, pinned gallery, history gallery.
    pub fn render(&self, now: Instant) -> String {
        let palette = self.palette();
        let mut sections = Vec::new();
        if let Some(error) = &self.ui.error {
            sections.push(render::render_error(error, &palette));
        }
        if self.ui.loading {
            sections.push(palette.muted("Generating ideas..."));
        }
        sections.push(self.render_pinned(now));
        sections.push(self.render_history(now));
        sections.join("\n\n")
    }
}
