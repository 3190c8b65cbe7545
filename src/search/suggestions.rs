use crate::search::traits::SuggestionProvider;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Maximum suggestions returned for one query
const MAX_SUGGESTIONS: usize = 5;

/// Shorter queries clear the list without asking the provider
pub const MIN_QUERY_LEN: usize = 3;

/// Offline suggestion provider backed by a fixed list of places
#[derive(Debug, Clone)]
pub struct StaticSuggestions {
    places: Vec<String>,
}

impl StaticSuggestions {
    pub fn new(places: Vec<String>) -> Self {
        Self { places }
    }
}

impl Default for StaticSuggestions {
    fn default() -> Self {
        Self::new(
            [
                "Los Angeles, CA",
                "Los Angeles International Airport (LAX)",
                "San Francisco, CA",
                "San Francisco International Airport (SFO)",
                "San Diego, CA",
                "Las Vegas, NV",
                "Seattle, WA",
                "New York, NY",
                "Newark Liberty International Airport (EWR)",
                "Chicago, IL",
                "Denver, CO",
                "Miami, FL",
                "Orlando, FL",
                "Boston, MA",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }
}

#[async_trait]
impl SuggestionProvider for StaticSuggestions {
    async fn suggest(&self, query: &str) -> Result<Vec<String>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        Ok(self
            .places
            .iter()
            .filter(|place| place.to_lowercase().contains(&needle))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect())
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

/// Per-keystroke suggestion lookups where the last query typed wins.
///
/// Each query spawns a lookup; a response is published only if no newer
/// query was issued while it was in flight. Provider failures publish an
/// empty list.
pub struct SuggestionFeed<P: SuggestionProvider + 'static> {
    provider: Arc<P>,
    generation: Arc<AtomicU64>,
    tx: Arc<watch::Sender<Vec<String>>>,
}

impl<P: SuggestionProvider + 'static> SuggestionFeed<P> {
    pub fn new(provider: P) -> Self {
        Self::with_shared(Arc::new(provider))
    }

    /// Feed backed by a provider shared with other feeds
    pub fn with_shared(provider: Arc<P>) -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            provider,
            generation: Arc::new(AtomicU64::new(0)),
            tx: Arc::new(tx),
        }
    }

    /// Latest published suggestions
    pub fn current(&self) -> Vec<String> {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<String>> {
        self.tx.subscribe()
    }

    /// Start a lookup for `query`. Callers may drop the handle.
    ///
    /// Queries under [`MIN_QUERY_LEN`] characters clear the list at once,
    /// supersede any lookup still in flight and return `None`.
    pub fn on_query_changed(&self, query: &str) -> Option<JoinHandle<()>> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if query.chars().count() < MIN_QUERY_LEN {
            debug!("Query {:?} too short, clearing suggestions", query);
            self.tx.send_replace(Vec::new());
            return None;
        }

        let latest = Arc::clone(&self.generation);
        let provider = Arc::clone(&self.provider);
        let tx = Arc::clone(&self.tx);
        let query = query.to_string();

        Some(tokio::spawn(async move {
            let suggestions = match provider.suggest(&query).await {
                Ok(found) => found,
                Err(e) => {
                    warn!(
                        "{} suggestion lookup for {:?} failed: {:#}",
                        provider.source_name(),
                        query,
                        e
                    );
                    Vec::new()
                }
            };

            if latest.load(Ordering::SeqCst) != generation {
                debug!("Dropping stale suggestions for {:?}", query);
                return;
            }

            tx.send_replace(suggestions);
        }))
    }
}

/// Separate suggestion lists for the pickup and drop-off location fields
pub struct LocationSuggestions<P: SuggestionProvider + 'static> {
    pickup: SuggestionFeed<P>,
    drop_off: SuggestionFeed<P>,
}

impl<P: SuggestionProvider + 'static> LocationSuggestions<P> {
    pub fn new(provider: P) -> Self {
        let provider = Arc::new(provider);
        Self {
            pickup: SuggestionFeed::with_shared(Arc::clone(&provider)),
            drop_off: SuggestionFeed::with_shared(provider),
        }
    }

    pub fn pickup(&self) -> &SuggestionFeed<P> {
        &self.pickup
    }

    pub fn drop_off(&self) -> &SuggestionFeed<P> {
        &self.drop_off
    }

    pub fn on_pickup_changed(&self, query: &str) -> Option<JoinHandle<()>> {
        self.pickup.on_query_changed(query)
    }

    pub fn on_drop_off_changed(&self, query: &str) -> Option<JoinHandle<()>> {
        self.drop_off.on_query_changed(query)
    }
}
