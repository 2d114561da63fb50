//! Link classification and reachability probing
//!
//! Every `<a href>` on a page is classified as internal or external and, unless
//! exempt, probed for reachability. Probes run concurrently behind a counting
//! semaphore; their outcomes are memoized per resolved URL for the duration of
//! one analysis and aggregated into a [`LinkSummary`].

mod checker;
mod prober;
mod summary;

pub use checker::{LinkCheckReport, LinkChecker};
pub use prober::LinkProber;
pub use summary::{Link, LinkSummary, LinkTally};
