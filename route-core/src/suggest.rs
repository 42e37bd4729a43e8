use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

use tracing::warn;

use crate::{geocode::Geocoder, model::Suggestion};

/// Shortest query the place-search endpoint is bothered with.
const MIN_QUERY_LEN: usize = 2;

/// Debounced autocomplete over a [`Geocoder`].
///
/// Every keystroke calls [`Debouncer::input_changed`]; each call takes a fresh
/// ticket from a shared sequence counter, so a newer keystroke invalidates
/// both a pending timer and an already in-flight response. Only the result of
/// the latest call is ever handed back.
#[derive(Debug)]
pub struct Debouncer<G> {
    geocoder: Arc<G>,
    delay: Duration,
    seq: AtomicU64,
}

impl<G: Geocoder> Debouncer<G> {
    pub fn new(geocoder: Arc<G>, delay: Duration) -> Self {
        Self {
            geocoder,
            delay,
            seq: AtomicU64::new(0),
        }
    }

    /// React to the input field changing to `text`.
    ///
    /// Returns the new suggestion list, `Some(vec![])` to clear it (query too
    /// short), or `None` when this call was superseded or the lookup failed —
    /// in both of those cases the caller leaves its current list alone.
    pub async fn input_changed(&self, text: &str) -> Option<Vec<Suggestion>> {
        let ticket = self.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let query = text.trim().to_owned();
        if query.chars().count() < MIN_QUERY_LEN {
            return Some(Vec::new());
        }

        tokio::time::sleep(self.delay).await;
        if self.seq.load(Ordering::SeqCst) != ticket {
            // A newer keystroke arrived while we were waiting.
            return None;
        }

        match self.geocoder.suggest(&query).await {
            Ok(list) => (self.seq.load(Ordering::SeqCst) == ticket).then_some(list),
            Err(err) => {
                warn!(%err, query, "suggestion lookup failed");
                None
            }
        }
    }
}
