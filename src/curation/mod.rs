//! Curation state: generation history and pinned ideas.
//!
//! Collections live in memory and are written back through the
//! [`PersistentStore`] after every mutation, both of them, every time.
//! Nothing is batched. A second process writing the same store simply
//! overwrites whatever was there.

use tracing::{debug, info, warn};

use crate::store::{PersistentStore, HISTORY_KEY, PINNED_KEY};
use crate::types::{Generation, Idea};

/// Keep the first (most recent) entry for each identity.
fn dedup_pinned(stored: Vec<Idea>) -> Vec<Idea> {
    let total = stored.len();
    let mut pinned: Vec<Idea> = Vec::with_capacity(total);
    for idea in stored {
        if !pinned.iter().any(|p| p.same_identity(&idea)) {
            pinned.push(idea);
        }
    }
    if pinned.len() < total {
        warn!("Dropped {} duplicate pinned ideas from the store", total - pinned.len());
    }
    pinned
}

/// Result of [`Curator::toggle_pin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinChange {
    Pinned,
    Unpinned,
}

pub struct Curator {
    store: PersistentStore,
    history: Vec<Generation>,
    pinned: Vec<Idea>,
    history_cap: Option<usize>,
}

impl Curator {
    /// Hydrate from the store. Broken stored data starts empty.
    pub async fn load(store: PersistentStore, history_cap: Option<usize>) -> Self {
        let mut history = store.load_history().await;
        let pinned = dedup_pinned(store.load_pinned().await);

        if let Some(cap) = history_cap {
            history.truncate(cap);
        }

        info!(
            "Loaded {} generations and {} pinned ideas",
            history.len(),
            pinned.len()
        );

        Self {
            store,
            history,
            pinned,
            history_cap,
        }
    }

    /// Most recent first.
    pub fn history(&self) -> &[Generation] {
        &self.history
    }

    /// Most recently pinned first.
    pub fn pinned(&self) -> &[Idea] {
        &self.pinned
    }

    pub fn is_pinned(&self, idea: &Idea) -> bool {
        self.pinned.iter().any(|p| p.same_identity(idea))
    }

    /// Prepend `generation`, dropping the oldest beyond the history cap.
    pub async fn add_generation(&mut self, generation: Generation) {
        debug!("Adding generation for topic '{}'", generation.topic);
        self.history.insert(0, generation);

        if let Some(cap) = self.history_cap {
            if self.history.len() > cap {
                debug!("History over cap {}, dropping {}", cap, self.history.len() - cap);
                self.history.truncate(cap);
            }
        }

        self.persist().await;
    }

    /// Unpin every entry sharing `idea`'s identity, or pin it at the front.
    pub async fn toggle_pin(&mut self, idea: &Idea) -> PinChange {
        let before = self.pinned.len();
        self.pinned.retain(|p| !p.same_identity(idea));

        let change = if self.pinned.len() < before {
            PinChange::Unpinned
        } else {
            self.pinned.insert(0, idea.clone());
            PinChange::Pinned
        };

        debug!("{:?} '{}'", change, idea.coin_name);
        self.persist().await;
        change
    }

    pub async fn clear_history(&mut self) {
        self.history.clear();
        self.persist().await;
    }

    pub async fn clear_pinned(&mut self) {
        self.pinned.clear();
        self.persist().await;
    }

    async fn persist(&self) {
        self.store.save_collection(HISTORY_KEY, &self.history).await;
        self.store.save_collection(PINNED_KEY, &self.pinned).await;
    }
}
