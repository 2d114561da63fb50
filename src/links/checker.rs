//! Concurrent link checking for one page

use crate::config::AnalysisConfig;
use crate::fetch::Transport;
use crate::links::{Link, LinkProber, LinkSummary, LinkTally};
use crate::url::{is_internal_link, resolve_probe_target, ProbeTarget};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Outcome of checking every link on a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkCheckReport {
    /// Links whose outcome is known, in document order
    pub links: Vec<Link>,

    /// Aggregated counters and lists
    pub summary: LinkSummary,

    /// True if cancellation cut the check short
    pub canceled: bool,
}

/// Classifies and probes the links of one page
///
/// Each link gets its own task; at most `max_concurrent` probes are in flight
/// at once. A checker owns a fresh [`LinkProber`], so its memoization cache
/// lives exactly as long as one analysis run.
pub struct LinkChecker<T: Transport> {
    prober: Arc<LinkProber<T>>,
    max_concurrent: usize,
    max_links_to_check: Option<usize>,
}

impl<T: Transport> LinkChecker<T> {
    /// Creates a checker
    ///
    /// # Arguments
    ///
    /// * `transport` - Transport probes are sent through
    /// * `probe_timeout` - Per-probe timeout
    /// * `max_concurrent` - Width of the probe gate
    /// * `max_links_to_check` - Links past this many are classified but not probed
    pub fn new(
        transport: Arc<T>,
        probe_timeout: Duration,
        max_concurrent: usize,
        max_links_to_check: Option<usize>,
    ) -> Self {
        Self {
            prober: Arc::new(LinkProber::new(transport, probe_timeout)),
            max_concurrent: max_concurrent.max(1),
            max_links_to_check,
        }
    }

    /// Creates a checker from the analysis configuration
    pub fn from_config(transport: Arc<T>, config: &AnalysisConfig) -> Self {
        Self::new(
            transport,
            config.link_check_timeout(),
            config.max_concurrent_link_checks,
            config.max_links_to_check,
        )
    }

    /// Checks every `href` found on the page at `base`
    ///
    /// Classification (internal/external) is synchronous and covers every
    /// link. Probes run concurrently and complete in any order; their outcomes
    /// are folded back in document order.
    ///
    /// If `cancel` fires, outstanding probes are abandoned and the report holds
    /// whatever had completed; abandoned links are counted as `unchecked`.
    pub async fn check(
        &self,
        hrefs: &[String],
        base: &Url,
        cancel: &CancellationToken,
    ) -> LinkCheckReport {
        let tally = Arc::new(Mutex::new(LinkTally::new()));
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();
        let probe_limit = self.max_links_to_check.unwrap_or(usize::MAX);

        for (position, href) in hrefs.iter().enumerate() {
            let index = lock(&tally).push(href.as_str(), is_internal_link(href, base));

            if position >= probe_limit {
                lock(&tally).record(index, true);
                continue;
            }

            let url = match resolve_probe_target(href, base) {
                ProbeTarget::Exempt => {
                    lock(&tally).record(index, true);
                    continue;
                }
                ProbeTarget::Unresolvable => {
                    tracing::debug!(href = %href, "unresolvable link");
                    lock(&tally).record(index, false);
                    continue;
                }
                ProbeTarget::Probe(url) => url,
            };

            let prober = Arc::clone(&self.prober);
            let semaphore = Arc::clone(&semaphore);
            let tally = Arc::clone(&tally);
            let cancel = cancel.clone();

            tasks.spawn(async move {
                let _permit = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return,
                    permit = semaphore.acquire_owned() => match permit {
                        Ok(permit) => permit,
                        Err(_) => return,
                    },
                };

                let accessible = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => return,
                    accessible = prober.probe(&url) => accessible,
                };

                lock(&tally).record(index, accessible);
            });
        }

        let mut canceled = false;
        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::warn!(
                        outstanding = tasks.len(),
                        "link checking canceled, returning partial results"
                    );
                    tasks.abort_all();
                    canceled = true;
                    break;
                }
                joined = tasks.join_next() => match joined {
                    Some(Ok(())) => {}
                    Some(Err(e)) => tracing::warn!("link probe task failed: {}", e),
                    None => break,
                },
            }
        }

        let tally = lock(&tally);
        let summary = tally.summarize();
        tracing::debug!(
            internal = summary.internal,
            external = summary.external,
            inaccessible = summary.inaccessible,
            unchecked = summary.unchecked,
            "link check finished"
        );

        LinkCheckReport {
            links: tally.links(),
            summary,
            canceled,
        }
    }

    /// Number of distinct URLs probed so far
    pub fn probed_urls(&self) -> usize {
        self.prober.cached_urls()
    }
}

fn lock(tally: &Mutex<LinkTally>) -> std::sync::MutexGuard<'_, LinkTally> {
    tally.lock().unwrap_or_else(PoisonError::into_inner)
}
