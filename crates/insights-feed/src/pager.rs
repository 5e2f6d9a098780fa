use std::collections::BTreeSet;

use insights_client::{Error, PageRequest, Utterance, UtteranceFilters};
use tokio::sync::{Mutex, mpsc};

use crate::UtteranceSource;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Identity of an accumulated item. Utterance ids are not unique across pages,
/// so the position in the accumulated sequence is part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ItemKey {
    pub utterance_id: String,
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedItem {
    pub key: ItemKey,
    pub utterance: Utterance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied { received: usize },
    /// Nothing was requested: a fetch was already in flight, there were no
    /// more pages, or the filters did not change.
    Skipped,
    /// The response arrived after the filters changed and was dropped.
    Discarded,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeedSnapshot {
    pub filters: UtteranceFilters,
    pub items: Vec<FeedItem>,
    pub total_count: u64,
    pub current_page: u32,
    pub has_more: bool,
    pub loading: bool,
    pub loading_more: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub speakers: Vec<String>,
    pub departments: Vec<String>,
    pub regions: Vec<String>,
}

struct FeedState {
    filters: UtteranceFilters,
    // Bumped by every reset. Completions tagged with an older value are stale.
    generation: u64,
    items: Vec<FeedItem>,
    total_count: u64,
    current_page: u32,
    has_more: bool,
    loading: bool,
    loading_more: bool,
    error: Option<String>,
}

impl FeedState {
    fn new(filters: UtteranceFilters) -> Self {
        Self {
            filters,
            generation: 0,
            items: Vec::new(),
            total_count: 0,
            current_page: 0,
            has_more: false,
            loading: false,
            loading_more: false,
            error: None,
        }
    }

    fn append(&mut self, batch: Vec<Utterance>) {
        let start = self.items.len();
        self.items
            .extend(batch.into_iter().enumerate().map(|(i, utterance)| FeedItem {
                key: ItemKey {
                    utterance_id: utterance.utterance_id.clone(),
                    position: start + i,
                },
                utterance,
            }));
    }
}

/// Filterable, append-only view over the utterance endpoint.
///
/// A reset (initial load or filter change) replaces the accumulated items with
/// page 1. `load_more` appends the next page and is a no-op while any fetch is
/// in flight. The sentinel-visibility trigger and a manual "load more" control
/// both call [`PagedFeed::load_more`].
pub struct PagedFeed<S> {
    source: S,
    page_size: u32,
    state: Mutex<FeedState>,
}

impl<S: UtteranceSource> PagedFeed<S> {
    pub fn new(source: S) -> Self {
        Self::with_filters(source, UtteranceFilters::default())
    }

    pub fn with_filters(source: S, filters: UtteranceFilters) -> Self {
        Self {
            source,
            page_size: DEFAULT_PAGE_SIZE,
            state: Mutex::new(FeedState::new(filters)),
        }
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub async fn filters(&self) -> UtteranceFilters {
        self.state.lock().await.filters.clone()
    }

    pub async fn snapshot(&self) -> FeedSnapshot {
        let state = self.state.lock().await;
        FeedSnapshot {
            filters: state.filters.clone(),
            items: state.items.clone(),
            total_count: state.total_count,
            current_page: state.current_page,
            has_more: state.has_more,
            loading: state.loading,
            loading_more: state.loading_more,
            error: state.error.clone(),
        }
    }

    /// Sorted distinct values over the accumulated items, for filter pick-lists.
    pub async fn facets(&self) -> Facets {
        let state = self.state.lock().await;
        let distinct = |field: fn(&Utterance) -> &str| -> Vec<String> {
            state
                .items
                .iter()
                .map(|item| field(&item.utterance).to_string())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect()
        };

        Facets {
            speakers: distinct(|u| u.speaker.as_str()),
            departments: distinct(|u| u.department.as_str()),
            regions: distinct(|u| u.region.as_str()),
        }
    }

    pub async fn reset_and_fetch(&self) -> Result<FetchOutcome, Error> {
        let (generation, params) = {
            let mut state = self.state.lock().await;
            state.generation += 1;
            state.items.clear();
            state.current_page = 1;
            state.has_more = true;
            state.loading = true;
            state.loading_more = false;
            state.error = None;
            (
                state.generation,
                state.filters.to_params(PageRequest::first(self.page_size)),
            )
        };

        tracing::debug!(generation, "utterance_reset_started");
        let result = self.source.fetch_utterances(params).await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            tracing::debug!(
                stale = generation,
                current = state.generation,
                "utterance_reset_discarded"
            );
            return Ok(FetchOutcome::Discarded);
        }
        state.loading = false;

        match result {
            Ok(data) => {
                let received = data.items.len();
                state.append(data.items);
                state.total_count = data.total_count;
                state.has_more = received == self.page_size as usize;
                Ok(FetchOutcome::Applied { received })
            }
            Err(err) => {
                tracing::warn!(error = %err, "utterance_reset_failed");
                state.total_count = 0;
                state.has_more = false;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn load_more(&self) -> Result<FetchOutcome, Error> {
        let (generation, next_page, params) = {
            let mut state = self.state.lock().await;
            if state.loading || state.loading_more || !state.has_more {
                return Ok(FetchOutcome::Skipped);
            }
            state.loading_more = true;
            let next_page = state.current_page + 1;
            let params = state
                .filters
                .to_params(PageRequest::new(next_page, self.page_size));
            (state.generation, next_page, params)
        };

        tracing::debug!(generation, page = next_page, "utterance_page_started");
        let result = self.source.fetch_utterances(params).await;

        let mut state = self.state.lock().await;
        if state.generation != generation {
            tracing::debug!(
                stale = generation,
                current = state.generation,
                page = next_page,
                "utterance_page_discarded"
            );
            return Ok(FetchOutcome::Discarded);
        }
        state.loading_more = false;

        match result {
            Ok(data) => {
                let received = data.items.len();
                state.append(data.items);
                state.current_page = next_page;
                state.has_more = received == self.page_size as usize;
                Ok(FetchOutcome::Applied { received })
            }
            Err(err) => {
                tracing::warn!(error = %err, page = next_page, "utterance_page_failed");
                state.has_more = false;
                state.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Stores `filters` and resets, unless they equal the current filters.
    pub async fn set_filters(&self, filters: UtteranceFilters) -> Result<FetchOutcome, Error> {
        {
            let mut state = self.state.lock().await;
            if state.filters == filters {
                return Ok(FetchOutcome::Skipped);
            }
            state.filters = filters;
        }
        self.reset_and_fetch().await
    }

    pub async fn set_search(&self, search: impl Into<String>) -> Result<FetchOutcome, Error> {
        let mut filters = self.filters().await;
        filters.search = search.into();
        self.set_filters(filters).await
    }

    /// Applies every settled search value until the sender side is dropped.
    pub async fn follow_search(&self, mut searches: mpsc::UnboundedReceiver<String>) {
        while let Some(search) = searches.recv().await {
            if let Err(err) = self.set_search(search).await {
                tracing::debug!(error = %err, "search_fetch_failed");
            }
        }
    }
}
