use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::core::error::Result;
use crate::features::search::dtos::SearchResult;
use crate::shared::constants::SEARCH_DEBOUNCE_MS;

/// What the search box currently shows
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchView {
    pub results: Vec<SearchResult>,
    /// A request for the latest query is in flight
    pub searching: bool,
}

/// Debounced search-as-you-type.
///
/// Every call to [`SearchDebouncer::input`] replaces the pending query. Once
/// no new input has arrived for the quiet period the query is sent, and its
/// response replaces the displayed results. A blank query clears the results
/// without sending anything, and a failed request clears them too. Responses
/// to queries that have since been superseded are dropped.
pub struct SearchDebouncer {
    queries: mpsc::UnboundedSender<String>,
    view: watch::Receiver<SearchView>,
    worker: JoinHandle<()>,
}

impl SearchDebouncer {
    /// Debouncer with the standard quiet period
    pub fn spawn<F, Fut>(fetch: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<SearchResult>>> + Send + 'static,
    {
        Self::with_quiet_period(Duration::from_millis(SEARCH_DEBOUNCE_MS), fetch)
    }

    pub fn with_quiet_period<F, Fut>(quiet: Duration, fetch: F) -> Self
    where
        F: Fn(String) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Vec<SearchResult>>> + Send + 'static,
    {
        let (queries, pending) = mpsc::unbounded_channel();
        let (publisher, view) = watch::channel(SearchView::default());
        let worker = tokio::spawn(run(pending, publisher, quiet, fetch));

        Self {
            queries,
            view,
            worker,
        }
    }

    /// Replace the query with the current contents of the search box
    pub fn input(&self, query: impl Into<String>) {
        // The worker only stops once `self` is dropped.
        let _ = self.queries.send(query.into());
    }

    pub fn results(&self) -> Vec<SearchResult> {
        self.view.borrow().results.clone()
    }

    pub fn is_searching(&self) -> bool {
        self.view.borrow().searching
    }

    /// Receiver notified whenever the displayed results change
    pub fn subscribe(&self) -> watch::Receiver<SearchView> {
        self.view.clone()
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.worker.abort();
    }
}

async fn run<F, Fut>(
    mut pending: mpsc::UnboundedReceiver<String>,
    publisher: watch::Sender<SearchView>,
    quiet: Duration,
    fetch: F,
) where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<Vec<SearchResult>>> + Send + 'static,
{
    let publisher = Arc::new(publisher);
    let latest = Arc::new(AtomicU64::new(0));

    while let Some(mut query) = pending.recv().await {
        loop {
            tokio::select! {
                next = pending.recv() => match next {
                    Some(next) => query = next,
                    None => return,
                },
                _ = tokio::time::sleep(quiet) => break,
            }
        }

        let seq = latest.fetch_add(1, Ordering::SeqCst) + 1;

        if query.trim().is_empty() {
            publisher.send_replace(SearchView::default());
            continue;
        }

        publisher.send_modify(|view| view.searching = true);

        let request = fetch(query.clone());
        let publisher = Arc::clone(&publisher);
        let latest = Arc::clone(&latest);
        tokio::spawn(async move {
            let results = match request.await {
                Ok(results) => results,
                Err(e) => {
                    tracing::warn!("Search for '{}' failed: {}", query, e);
                    Vec::new()
                }
            };

            publisher.send_if_modified(|view| {
                if latest.load(Ordering::SeqCst) != seq {
                    tracing::debug!("Dropping stale search response for '{}'", query);
                    return false;
                }
                *view = SearchView {
                    results,
                    searching: false,
                };
                true
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;
    use crate::features::search::dtos::SearchResultType;
    use std::sync::Mutex;
    use tokio::time::sleep;

    fn hit(title: &str) -> SearchResult {
        SearchResult {
            title: title.to_string(),
            url: format!("/products/{}", title),
            kind: SearchResultType::Product,
        }
    }

    /// Debouncer whose fetches are recorded; `slow` takes a second, `boom` fails
    fn recording() -> (SearchDebouncer, Arc<Mutex<Vec<String>>>) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&calls);
        let debouncer = SearchDebouncer::spawn(move |query: String| {
            seen.lock().unwrap().push(query.clone());
            async move {
                match query.as_str() {
                    "boom" => Err(AppError::ExternalServiceError("search down".to_string())),
                    "slow" => {
                        sleep(Duration::from_secs(1)).await;
                        Ok(vec![hit("slow")])
                    }
                    other => Ok(vec![hit(other)]),
                }
            }
        });
        (debouncer, calls)
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystroke_burst_sends_one_request() {
        let (debouncer, calls) = recording();

        debouncer.input("s");
        sleep(Duration::from_millis(100)).await;
        debouncer.input("se");
        sleep(Duration::from_millis(100)).await;
        debouncer.input("sen");
        sleep(Duration::from_millis(400)).await;

        assert_eq!(*calls.lock().unwrap(), vec!["sen".to_string()]);
        assert_eq!(debouncer.results(), vec![hit("sen")]);
        assert!(!debouncer.is_searching());
    }

    #[tokio::test(start_paused = true)]
    async fn test_nothing_sent_before_quiet_period() {
        let (debouncer, calls) = recording();

        debouncer.input("sensor");
        sleep(Duration::from_millis(200)).await;

        assert!(calls.lock().unwrap().is_empty());
        assert!(debouncer.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_query_clears_without_request() {
        let (debouncer, calls) = recording();

        debouncer.input("sensor");
        sleep(Duration::from_millis(400)).await;
        assert_eq!(debouncer.results(), vec![hit("sensor")]);

        debouncer.input("   ");
        sleep(Duration::from_millis(400)).await;

        assert!(debouncer.results().is_empty());
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_request_clears_results() {
        let (debouncer, _calls) = recording();

        debouncer.input("sensor");
        sleep(Duration::from_millis(400)).await;
        assert!(!debouncer.results().is_empty());

        debouncer.input("boom");
        sleep(Duration::from_millis(400)).await;
        assert!(debouncer.results().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_response_does_not_overwrite_newer_one() {
        let (debouncer, calls) = recording();

        debouncer.input("slow");
        sleep(Duration::from_millis(400)).await;
        assert!(debouncer.is_searching());

        debouncer.input("fast");
        sleep(Duration::from_millis(400)).await;
        assert_eq!(debouncer.results(), vec![hit("fast")]);

        // The slow response lands now and must be ignored.
        sleep(Duration::from_secs(2)).await;
        assert_eq!(debouncer.results(), vec![hit("fast")]);
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["slow".to_string(), "fast".to_string()]
        );
    }
}
