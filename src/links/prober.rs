//! Link reachability probing with per-run memoization

use crate::fetch::Transport;
use crate::url::{resolve_probe_target, ProbeTarget};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::OnceCell;
use url::Url;

/// Probes link targets, remembering each resolved URL's outcome
///
/// A prober belongs to a single analysis run. Concurrent probes of the same
/// resolved URL share one request: the first caller performs it and the rest
/// wait for its outcome.
pub struct LinkProber<T: Transport> {
    transport: Arc<T>,
    timeout: Duration,
    cache: Mutex<HashMap<String, Arc<OnceCell<bool>>>>,
}

impl<T: Transport> LinkProber<T> {
    /// Creates a prober with an empty cache
    ///
    /// # Arguments
    ///
    /// * `transport` - The transport probes are sent through
    /// * `timeout` - Per-probe timeout, independent of any outer cancellation
    pub fn new(transport: Arc<T>, timeout: Duration) -> Self {
        Self {
            transport,
            timeout,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Decides whether `href` found on the page at `base` is reachable
    ///
    /// Exempt hrefs (fragments, queries, `mailto:`, `tel:`, non-HTTP schemes)
    /// are reachable without a request; hrefs that cannot be resolved are not.
    pub async fn is_accessible(&self, href: &str, base: &Url) -> bool {
        match resolve_probe_target(href, base) {
            ProbeTarget::Exempt => true,
            ProbeTarget::Unresolvable => false,
            ProbeTarget::Probe(url) => self.probe(&url).await,
        }
    }

    /// Probes an absolute URL, at most once per prober
    pub async fn probe(&self, url: &Url) -> bool {
        let cell = {
            let mut cache = self.cache.lock().unwrap_or_else(PoisonError::into_inner);
            cache.entry(url.as_str().to_string()).or_default().clone()
        };

        if let Some(accessible) = cell.get() {
            tracing::debug!(url = %url, accessible, "probe cache hit");
            return *accessible;
        }

        *cell.get_or_init(|| self.request(url)).await
    }

    /// Number of distinct URLs seen by this prober
    pub fn cached_urls(&self) -> usize {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    async fn request(&self, url: &Url) -> bool {
        let outcome = tokio::time::timeout(self.timeout, self.transport.get(url, self.timeout)).await;

        let accessible = match outcome {
            Ok(Ok(response)) => (200..400).contains(&response.status()),
            Ok(Err(e)) => {
                tracing::debug!(url = %url, error = %e, "probe failed");
                false
            }
            Err(_) => {
                tracing::debug!(url = %url, timeout = ?self.timeout, "probe timed out");
                false
            }
        };

        tracing::debug!(url = %url, accessible, "probed link");
        accessible
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::fetch::{TransportError, TransportResponse};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers every request with a status chosen by path, counting calls
    pub(crate) struct CountingTransport {
        pub calls: AtomicUsize,
        pub delay: Duration,
    }

    impl CountingTransport {
        pub fn new() -> Self {
            Self::with_delay(Duration::ZERO)
        }

        pub fn with_delay(delay: Duration) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay,
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Transport for CountingTransport {
        async fn get(
            &self,
            url: &Url,
            _timeout: Duration,
        ) -> Result<TransportResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let path = url.path();
            if path.contains("refused") {
                return Err(TransportError::new("connection refused"));
            }
            let status = if path.contains("missing") {
                404
            } else if path.contains("moved") {
                301
            } else if path.contains("error") {
                500
            } else {
                200
            };
            Ok(TransportResponse::from_bytes(status, ""))
        }
    }

    fn base() -> Url {
        Url::parse("https://example.com/dir/page").unwrap()
    }

    fn prober(transport: &Arc<CountingTransport>) -> LinkProber<CountingTransport> {
        LinkProber::new(Arc::clone(transport), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_exempt_links_are_not_probed() {
        let transport = Arc::new(CountingTransport::new());
        let prober = prober(&transport);

        for href in [
            "#fragment",
            "?page=2",
            "mailto:test@example.com",
            "tel:+1234567890",
            "ftp://files.example.com/a",
        ] {
            assert!(prober.is_accessible(href, &base()).await, "{}", href);
        }

        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_status_ranges() {
        let transport = Arc::new(CountingTransport::new());
        let prober = prober(&transport);

        assert!(prober.is_accessible("/ok", &base()).await);
        assert!(prober.is_accessible("/moved", &base()).await);
        assert!(!prober.is_accessible("/missing", &base()).await);
        assert!(!prober.is_accessible("/error", &base()).await);
        assert!(!prober.is_accessible("https://down.example/refused", &base()).await);
    }

    #[tokio::test]
    async fn test_same_url_probed_once() {
        let transport = Arc::new(CountingTransport::new());
        let prober = prober(&transport);

        // Both resolve to https://example.com/dir/other
        assert!(prober.is_accessible("other", &base()).await);
        assert!(prober.is_accessible("/dir/other", &base()).await);
        assert!(prober.is_accessible("https://example.com/dir/other", &base()).await);

        assert_eq!(transport.calls(), 1);
        assert_eq!(prober.cached_urls(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_probes_share_one_request() {
        let transport = Arc::new(CountingTransport::with_delay(Duration::from_millis(50)));
        let prober = Arc::new(prober(&transport));
        let url = Url::parse("https://example.com/shared").unwrap();

        let mut handles = Vec::new();
        for _ in 0..8 {
            let prober = Arc::clone(&prober);
            let url = url.clone();
            handles.push(tokio::spawn(async move { prober.probe(&url).await }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_probe_timeout_is_inaccessible() {
        let transport = Arc::new(CountingTransport::with_delay(Duration::from_secs(5)));
        let prober = LinkProber::new(Arc::clone(&transport), Duration::from_millis(20));

        assert!(!prober.is_accessible("/slow", &base()).await);
    }
}
