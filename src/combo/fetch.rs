use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

/// Why a suggestion lookup produced no list
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered {status}")]
    Status { url: String, status: u16 },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("suggestions unavailable: {0}")]
    Unavailable(String),
}

/// The "fetch suggestions" capability a combobox consumes.
///
/// Implementations must be idempotent and safe to call repeatedly with the
/// same or overlapping queries; they run on a worker thread.
pub trait SuggestionSource<T>: Send + Sync {
    fn fetch(&self, query: Option<&str>) -> Result<Vec<T>, FetchError>;
}

impl<T, F> SuggestionSource<T> for F
where
    F: Fn(Option<&str>) -> Result<Vec<T>, FetchError> + Send + Sync,
{
    fn fetch(&self, query: Option<&str>) -> Result<Vec<T>, FetchError> {
        self(query)
    }
}

/// A finished lookup, tagged with the sequence number it was issued under
#[derive(Debug)]
pub struct FetchResponse<T> {
    pub seq: u64,
    pub query: String,
    pub result: Result<Vec<T>, FetchError>,
}

/// Runs lookups off the event loop and hands back only the latest one.
///
/// Every `issue` bumps the sequence number; `poll` drains the channel and
/// drops any response whose number is not the most recent. Dropping the
/// fetcher drops the receiver, so late responses go nowhere.
pub struct Fetcher<T> {
    source: Arc<dyn SuggestionSource<T>>,
    tx: mpsc::Sender<FetchResponse<T>>,
    rx: mpsc::Receiver<FetchResponse<T>>,
    latest: u64,
    in_flight: bool,
}

impl<T> Fetcher<T> {
    pub fn new(source: Arc<dyn SuggestionSource<T>>) -> Self {
        let (tx, rx) = mpsc::channel();
        Fetcher {
            source,
            tx,
            rx,
            latest: 0,
            in_flight: false,
        }
    }

    /// Supersede whatever is in flight without starting a new lookup.
    pub fn invalidate(&mut self) {
        self.latest += 1;
        self.in_flight = false;
    }

    /// True while the latest issued lookup has not come back yet
    pub fn is_pending(&self) -> bool {
        self.in_flight
    }

    /// Non-blocking: return the response to the latest request if it has
    /// arrived, discarding superseded ones.
    pub fn poll(&mut self) -> Option<FetchResponse<T>> {
        let mut fresh = None;
        while let Ok(resp) = self.rx.try_recv() {
            if resp.seq == self.latest {
                self.in_flight = false;
                fresh = Some(resp);
            } else {
                log::debug!(
                    "dropping stale suggestions for {:?} (#{}, latest #{})",
                    resp.query,
                    resp.seq,
                    self.latest
                );
            }
        }
        fresh
    }
}

impl<T: Send + 'static> Fetcher<T> {
    /// Start a lookup for `query` on a worker thread. Returns its sequence number.
    pub fn issue(&mut self, query: String) -> u64 {
        self.latest += 1;
        let seq = self.latest;
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        log::debug!("fetching suggestions for {query:?} (#{seq})");

        let spawned = thread::Builder::new()
            .name("suggest-fetch".into())
            .spawn(move || {
                let result = source.fetch(Some(&query));
                // Receiver is gone once the owning combobox is torn down
                let _ = tx.send(FetchResponse { seq, query, result });
            });
        match spawned {
            Ok(_) => self.in_flight = true,
            Err(e) => {
                log::warn!("could not start suggestion fetch: {e}");
                self.in_flight = false;
            }
        }
        seq
    }
}
