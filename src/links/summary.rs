//! Per-link records and their aggregation into a [`LinkSummary`]

use crate::url::link_host;
use serde::Serialize;

/// One discovered `<a href>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Link {
    /// The raw `href` value
    pub url: String,

    /// True if the link points inside the analyzed site
    pub is_internal: bool,

    /// True if the link is exempt from probing or its probe succeeded
    pub is_accessible: bool,
}

/// Aggregated link analysis of one page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LinkSummary {
    /// Links pointing inside the analyzed site
    pub internal: usize,

    /// Links pointing elsewhere, including host-less schemes (`mailto:`)
    pub external: usize,

    /// Links whose probe failed
    pub inaccessible: usize,

    /// Links whose probe was abandoned because the analysis was canceled
    pub unchecked: usize,

    /// Raw hrefs of inaccessible links, in document order
    pub broken_links: Vec<String>,

    /// Distinct hosts of external links, in first-seen order
    pub external_hosts: Vec<String>,
}

impl LinkSummary {
    /// Total number of links found on the page
    pub fn total(&self) -> usize {
        self.internal + self.external
    }
}

#[derive(Debug)]
struct TallyEntry {
    href: String,
    is_internal: bool,
    accessible: Option<bool>,
}

/// Collects probe outcomes as they complete, in any order
///
/// Every link is classified up front; outcomes are recorded against the link's
/// position in the document, so the folded summary does not depend on the
/// order in which concurrent probes finish.
#[derive(Debug, Default)]
pub struct LinkTally {
    entries: Vec<TallyEntry>,
}

impl LinkTally {
    /// Creates an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a classified link and returns its index
    pub fn push(&mut self, href: impl Into<String>, is_internal: bool) -> usize {
        self.entries.push(TallyEntry {
            href: href.into(),
            is_internal,
            accessible: None,
        });
        self.entries.len() - 1
    }

    /// Records the probe outcome of the link at `index`
    ///
    /// Unknown indices are ignored.
    pub fn record(&mut self, index: usize, accessible: bool) {
        if let Some(entry) = self.entries.get_mut(index) {
            entry.accessible = Some(accessible);
        }
    }

    /// Number of registered links
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Links whose outcome is known, in document order
    pub fn links(&self) -> Vec<Link> {
        self.entries
            .iter()
            .filter_map(|entry| {
                entry.accessible.map(|is_accessible| Link {
                    url: entry.href.clone(),
                    is_internal: entry.is_internal,
                    is_accessible,
                })
            })
            .collect()
    }

    /// Folds the tally into a summary, in document order
    pub fn summarize(&self) -> LinkSummary {
        let mut summary = LinkSummary::default();

        for entry in &self.entries {
            if entry.is_internal {
                summary.internal += 1;
            } else {
                summary.external += 1;
                if let Some(host) = link_host(&entry.href) {
                    if !summary.external_hosts.contains(&host) {
                        summary.external_hosts.push(host);
                    }
                }
            }

            match entry.accessible {
                Some(true) => {}
                Some(false) => {
                    summary.inaccessible += 1;
                    summary.broken_links.push(entry.href.clone());
                }
                None => summary.unchecked += 1,
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts() {
        let mut tally = LinkTally::new();
        let a = tally.push("/about", true);
        let b = tally.push("https://other.com/x", false);
        let c = tally.push("mailto:test@example.com", false);
        tally.record(c, true);
        tally.record(b, false);
        tally.record(a, true);

        let summary = tally.summarize();
        assert_eq!(summary.internal, 1);
        assert_eq!(summary.external, 2);
        assert_eq!(summary.inaccessible, 1);
        assert_eq!(summary.unchecked, 0);
        assert_eq!(summary.broken_links, vec!["https://other.com/x"]);
        assert_eq!(summary.external_hosts, vec!["other.com"]);
        assert_eq!(summary.total(), 3);
    }

    #[test]
    fn test_external_hosts_first_seen_order() {
        let mut tally = LinkTally::new();
        for href in [
            "https://b.com/1",
            "https://a.com/1",
            "https://B.com/2",
            "https://c.com/",
            "https://a.com/2",
        ] {
            let index = tally.push(href, false);
            tally.record(index, true);
        }

        assert_eq!(
            tally.summarize().external_hosts,
            vec!["b.com", "a.com", "c.com"]
        );
    }

    #[test]
    fn test_broken_links_in_document_order() {
        let mut tally = LinkTally::new();
        let first = tally.push("/one", true);
        let second = tally.push("/two", true);
        // Completion order is the reverse of document order
        tally.record(second, false);
        tally.record(first, false);

        assert_eq!(tally.summarize().broken_links, vec!["/one", "/two"]);
    }

    #[test]
    fn test_unrecorded_links_are_unchecked() {
        let mut tally = LinkTally::new();
        let done = tally.push("/done", true);
        tally.push("/pending", true);
        tally.record(done, true);

        let summary = tally.summarize();
        assert_eq!(summary.internal, 2);
        assert_eq!(summary.unchecked, 1);
        assert_eq!(summary.inaccessible, 0);
        assert_eq!(tally.links().len(), 1);
        assert_eq!(tally.links()[0].url, "/done");
    }

    #[test]
    fn test_record_unknown_index_is_ignored() {
        let mut tally = LinkTally::new();
        tally.record(7, false);
        assert!(tally.is_empty());
        assert_eq!(tally.summarize(), LinkSummary::default());
    }
}
