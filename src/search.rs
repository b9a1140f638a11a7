use std::{pin::Pin, time::Duration};

use tokio::time::{Instant, Sleep};
use tracing::trace;

use crate::model::{Catalog, NormalizedDish};

// Query must be strictly longer than this before filtering kicks in
pub const SEARCH_MIN_LENGTH: usize = 2;
// Quiet period between the last keystroke and evaluation
pub const SEARCH_DELAY: Duration = Duration::from_millis(300);


// Text search state: the current query and the last evaluated result list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    query: String,
    results: Vec<NormalizedDish>,
}

impl SearchState {
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[NormalizedDish] {
        &self.results
    }

    // Record a keystroke. Results only change on `evaluate`.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    // Debounced evaluation. Returns true when the result list was replaced.
    pub fn evaluate(&mut self, catalog: &Catalog) -> bool {
        let len = self.query.chars().count();
        if len > SEARCH_MIN_LENGTH {
            let needle = self.query.to_lowercase();
            self.results = catalog
                .dishes
                .iter()
                .filter(|dish| dish.name.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            trace!(query = %self.query, hits = self.results.len(), "search evaluated");
            true
        } else if self.query.is_empty() {
            self.results.clear();
            true
        } else {
            false
        }
    }

    pub fn reset(&mut self) {
        self.query.clear();
        self.results.clear();
    }
}


// Cancellable one-shot timer. Re-arming discards the pending deadline.
#[derive(Debug)]
pub struct Debouncer {
    delay: Duration,
    pending: Option<Pin<Box<Sleep>>>,
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Debouncer { delay, pending: None }
    }

    pub fn arm(&mut self) {
        let deadline = Instant::now() + self.delay;
        match &mut self.pending {
            Some(sleep) => sleep.as_mut().reset(deadline),
            None => self.pending = Some(Box::pin(tokio::time::sleep_until(deadline))),
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    // Resolves once the armed deadline passes, then disarms.
    // Never resolves while disarmed, so it can sit in a select! loop.
    pub async fn fired(&mut self) {
        match &mut self.pending {
            Some(sleep) => {
                sleep.as_mut().await;
                self.pending = None;
            }
            None => std::future::pending::<()>().await,
        }
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Debouncer::new(SEARCH_DELAY)
    }
}
