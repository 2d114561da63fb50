//! Analysis coordinator that drives one page through every stage
//!
//! The coordinator:
//! 1. Validates the target URL
//! 2. Fetches the page under the request timeout, racing cancellation
//! 3. Parses the body and extracts page metrics
//! 4. Classifies and probes every link
//! 5. Assembles the final [`AnalysisResult`]

use crate::analysis::{AnalysisFailure, AnalysisResult};
use crate::analyzer::HtmlAnalyzer;
use crate::config::{AnalysisConfig, Config};
use crate::fetch::{
    classify_transport_error, fetch_page, status_error, ReqwestTransport, Transport,
};
use crate::links::LinkChecker;
use crate::state::AnalysisStage;
use crate::url::validate_target_url;
use crate::AnalyzerError;
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;

/// Analyzes web pages through an injected transport
///
/// The analyzer itself holds no per-run state: every call to
/// [`PageAnalyzer::analyze_url`] gets a fresh probe cache, so concurrent
/// analyses of different pages never share results.
pub struct PageAnalyzer<T: Transport> {
    transport: Arc<T>,
    config: AnalysisConfig,
    html: HtmlAnalyzer,
}

impl PageAnalyzer<ReqwestTransport> {
    /// Creates an analyzer backed by the production `reqwest` transport
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_reqwest(config: &Config) -> Result<Self, reqwest::Error> {
        let transport = ReqwestTransport::new(&config.user_agent)?;
        Ok(Self::new(Arc::new(transport), config.analysis.clone()))
    }
}

impl<T: Transport> PageAnalyzer<T> {
    /// Creates an analyzer that sends every request through `transport`
    pub fn new(transport: Arc<T>, config: AnalysisConfig) -> Self {
        let html = HtmlAnalyzer::from_config(&config);
        Self {
            transport,
            config,
            html,
        }
    }

    /// The analysis configuration in use
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyzes the page at `url`
    ///
    /// # Arguments
    ///
    /// * `url` - The page to analyze; must be an absolute HTTP(S) URL
    /// * `cancel` - Cancels the analysis; link checks in flight are abandoned
    ///   and the partial link summary is returned
    ///
    /// # Returns
    ///
    /// * `Ok(AnalysisResult)` - The page was fetched and analyzed
    /// * `Err(AnalysisFailure)` - The analysis failed; for non-2xx statuses the
    ///   failure carries a partial result with the status code and elapsed time
    pub async fn analyze_url(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<AnalysisResult, AnalysisFailure> {
        let started = Instant::now();
        let mut stage = AnalysisStage::Validating;
        tracing::info!("Starting analysis of {}", url);

        let target = validate_target_url(url, self.config.max_url_length)
            .map_err(|e| fail(&mut stage, e.into()))?;

        advance(&mut stage, AnalysisStage::Fetching)?;

        let timeout = self.config.request_timeout();
        let fetch = fetch_page(
            self.transport.as_ref(),
            &target,
            timeout,
            self.config.max_content_size,
        );

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(AnalyzerError::FetchCanceled { url: url.to_string() }),
            fetched = tokio::time::timeout(timeout, fetch) => match fetched {
                Ok(Ok(page)) => Ok(page),
                Ok(Err(e)) => Err(classify_transport_error(url, &e)),
                Err(_) => Err(AnalyzerError::FetchTimeout { url: url.to_string() }),
            },
        };

        let page = match outcome {
            Ok(page) => page,
            Err(error) => {
                tracing::warn!("Failed to fetch {}: {}", url, error);
                return Err(fail(&mut stage, error));
            }
        };

        if !page.is_success() {
            tracing::warn!("{} returned HTTP {}", url, page.status_code);
            let partial = AnalysisResult::partial(url, page.status_code, started.elapsed());
            return Err(fail(&mut stage, status_error(page.status_code)).with_partial(partial));
        }

        advance(&mut stage, AnalysisStage::Parsing)?;

        let content = page.text();
        let parsed = self
            .html
            .parse(&content, target.as_str())
            .map_err(|e| fail(&mut stage, e))?;

        advance(&mut stage, AnalysisStage::ClassifyingLinks)?;

        let checker = LinkChecker::from_config(Arc::clone(&self.transport), &self.config);
        let report = checker.check(&parsed.links, &parsed.base_url, cancel).await;

        advance(&mut stage, AnalysisStage::Done)?;

        let result = AnalysisResult {
            url: url.to_string(),
            html_version: parsed.html_version,
            title: parsed.title,
            headings: parsed.headings,
            links: report.summary,
            has_login_form: parsed.has_login_form,
            load_time: started.elapsed(),
            content_length: page.body.len(),
            status_code: page.status_code,
        };

        tracing::info!(
            "Analyzed {} in {:?}: {} links ({} inaccessible)",
            url,
            result.load_time,
            result.links.total(),
            result.links.inaccessible
        );

        Ok(result)
    }
}

/// Moves `stage` forward, turning an illegal move into a failure
fn advance(stage: &mut AnalysisStage, next: AnalysisStage) -> Result<(), AnalysisFailure> {
    match stage.transition(next) {
        Ok(moved) => {
            *stage = moved;
            Ok(())
        }
        Err(error) => Err(fail(stage, error)),
    }
}

/// Records a failure in the current stage and marks the run failed
fn fail(stage: &mut AnalysisStage, error: AnalyzerError) -> AnalysisFailure {
    let failed_in = *stage;
    if let Ok(moved) = stage.transition(AnalysisStage::Failed) {
        *stage = moved;
    }
    tracing::debug!("Analysis failed during {}: {}", failed_in, error);
    AnalysisFailure::new(error, failed_in)
}
