//! Integration tests for page analysis
//!
//! These tests use wiremock to create mock HTTP servers and run the full
//! analysis (fetch, parse, link probing) through the production transport.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use webpage_analyzer::config::{AnalysisConfig, Config};
use webpage_analyzer::output::format_json;
use webpage_analyzer::{AnalysisStage, AnalyzerError, PageAnalyzer, ReqwestTransport};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates an analyzer using the production transport and the given limits
fn create_analyzer(analysis: AnalysisConfig) -> PageAnalyzer<ReqwestTransport> {
    let config = Config {
        analysis,
        ..Config::default()
    };
    PageAnalyzer::with_reqwest(&config).expect("Failed to build HTTP client")
}

fn test_config() -> AnalysisConfig {
    AnalysisConfig {
        request_timeout_secs: 5,
        link_check_timeout_secs: 5,
        max_links_to_check: Some(50),
        ..AnalysisConfig::default()
    }
}

async fn mount_page(server: &MockServer, page_path: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_string(body.to_string())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_five_anchor_page() {
    let mock_server = MockServer::start().await;

    let page = r##"<!DOCTYPE html>
<html>
<head><title>Test Page</title></head>
<body>
    <h1>Main Heading</h1>
    <h2>Sub Heading</h2>
    <h2>Another Sub Heading</h2>
    <a href="/internal-page">Internal Link</a>
    <a href="relative-page">Relative Link</a>
    <a href="#fragment">Fragment Link</a>
    <a href="mailto:test@example.com">Email Link</a>
    <a href="tel:+1234567890">Phone Link</a>
</body>
</html>"##;

    mount_page(&mock_server, "/", 200, page).await;

    // Each linked page must be probed exactly once
    Mock::given(method("GET"))
        .and(path("/internal-page"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/relative-page"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let analyzer = create_analyzer(test_config());
    let url = format!("{}/", mock_server.uri());

    let result = analyzer
        .analyze_url(&url, &CancellationToken::new())
        .await
        .expect("Analysis should succeed");

    assert_eq!(result.html_version, "HTML");
    assert_eq!(result.title, "Test Page");
    assert_eq!(result.headings.get("h1"), Some(&1));
    assert_eq!(result.headings.get("h2"), Some(&2));
    assert_eq!(result.headings.get("h3"), None);
    assert_eq!(result.links.internal, 3);
    assert_eq!(result.links.external, 2);
    assert_eq!(result.links.inaccessible, 0);
    assert!(result.links.broken_links.is_empty());
    assert!(!result.has_login_form);
    assert_eq!(result.status_code, 200);
    assert_eq!(result.content_length, page.len());
}

#[tokio::test]
async fn test_not_found_returns_partial_result() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/gone", 404, "Not Found").await;

    let analyzer = create_analyzer(test_config());
    let url = format!("{}/gone", mock_server.uri());

    let failure = analyzer
        .analyze_url(&url, &CancellationToken::new())
        .await
        .expect_err("404 should fail the analysis");

    assert_eq!(failure.stage, AnalysisStage::Fetching);
    assert_eq!(failure.error.status_code(), Some(404));
    assert_eq!(failure.to_string(), "HTTP 404: page not found");

    let partial = failure.partial.expect("404 should carry a partial result");
    assert_eq!(partial.status_code, 404);
    assert_eq!(partial.url, url);
    assert!(partial.html_version.is_empty());
}

#[tokio::test]
async fn test_forbidden_mentions_bot_protection() {
    let mock_server = MockServer::start().await;
    mount_page(&mock_server, "/", 403, "").await;

    let analyzer = create_analyzer(test_config());
    let failure = analyzer
        .analyze_url(&format!("{}/", mock_server.uri()), &CancellationToken::new())
        .await
        .expect_err("403 should fail the analysis");

    assert!(failure.to_string().contains("likely bot protection"));
}

#[tokio::test]
async fn test_login_page() {
    let mock_server = MockServer::start().await;

    let page = r#"<!DOCTYPE html PUBLIC "-//W3C//DTD XHTML 1.0 Strict//EN"
    "http://www.w3.org/TR/xhtml1/DTD/xhtml1-strict.dtd">
<html>
<head><title>  Sign in  </title></head>
<body>
    <form action="/session" method="post">
        <label for="user">Email</label>
        <input type="text" id="user" name="email">
        <input type="password" name="password">
        <button type="submit">Continue</button>
    </form>
</body>
</html>"#;
    mount_page(&mock_server, "/login", 200, page).await;

    let analyzer = create_analyzer(test_config());
    let result = analyzer
        .analyze_url(
            &format!("{}/login", mock_server.uri()),
            &CancellationToken::new(),
        )
        .await
        .expect("Analysis should succeed");

    assert_eq!(result.html_version, "XHTML 1.0 Strict");
    assert_eq!(result.title, "Sign in");
    assert!(result.has_login_form);
    assert_eq!(result.links.total(), 0);
}

#[tokio::test]
async fn test_broken_and_external_links() {
    let mock_server = MockServer::start().await;
    let other_server = MockServer::start().await;

    let page = format!(
        r#"<html><body>
        <a href="/ok">ok</a>
        <a href="/missing">missing</a>
        <a href="/server-error">server error</a>
        <a href="{other}/external-ok">external ok</a>
        <a href="{other}/external-missing">external missing</a>
        </body></html>"#,
        other = other_server.uri()
    );
    mount_page(&mock_server, "/", 200, &page).await;
    mount_page(&mock_server, "/ok", 200, "ok").await;
    mount_page(&mock_server, "/server-error", 500, "boom").await;
    mount_page(&other_server, "/external-ok", 200, "ok").await;

    let analyzer = create_analyzer(test_config());
    let result = analyzer
        .analyze_url(&format!("{}/", mock_server.uri()), &CancellationToken::new())
        .await
        .expect("Analysis should succeed");

    assert_eq!(result.links.internal, 3);
    assert_eq!(result.links.external, 2);
    assert_eq!(result.links.inaccessible, 3);
    assert_eq!(
        result.links.broken_links,
        vec![
            "/missing".to_string(),
            "/server-error".to_string(),
            format!("{}/external-missing", other_server.uri()),
        ]
    );
    assert_eq!(result.links.external_hosts, vec!["127.0.0.1".to_string()]);
    assert_eq!(result.html_version, "Unknown/No DOCTYPE");
}

#[tokio::test]
async fn test_repeated_link_probed_once() {
    let mock_server = MockServer::start().await;

    let page = r#"<html><body>
        <a href="/shared">one</a>
        <a href="/shared">two</a>
        <a href="shared">three</a>
        <a href="/shared">four</a>
    </body></html>"#;
    mount_page(&mock_server, "/", 200, page).await;

    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(50)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let analyzer = create_analyzer(test_config());
    let result = analyzer
        .analyze_url(&format!("{}/", mock_server.uri()), &CancellationToken::new())
        .await
        .expect("Analysis should succeed");

    assert_eq!(result.links.internal, 4);
    assert_eq!(result.links.inaccessible, 0);
}

#[tokio::test]
async fn test_invalid_url_is_rejected() {
    let analyzer = create_analyzer(test_config());

    for url in ["", "ftp://example.com/file", "not a url", "http://bad..host/"] {
        let failure = analyzer
            .analyze_url(url, &CancellationToken::new())
            .await
            .expect_err("invalid URL should be rejected");

        assert_eq!(failure.stage, AnalysisStage::Validating, "url: {:?}", url);
        assert!(
            matches!(failure.error, AnalyzerError::InvalidUrl(_)),
            "url: {:?}",
            url
        );
    }
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let analyzer = create_analyzer(AnalysisConfig {
        request_timeout_secs: 1,
        link_check_timeout_secs: 1,
        ..AnalysisConfig::default()
    });

    let failure = analyzer
        .analyze_url(
            &format!("{}/slow", mock_server.uri()),
            &CancellationToken::new(),
        )
        .await
        .expect_err("slow page should time out");

    assert_eq!(failure.stage, AnalysisStage::Fetching);
    assert!(matches!(failure.error, AnalyzerError::FetchTimeout { .. }));
}

#[tokio::test]
async fn test_unreachable_host_is_network_error() {
    // Nothing listens on port 1
    let analyzer = create_analyzer(test_config());

    let failure = analyzer
        .analyze_url("http://127.0.0.1:1/", &CancellationToken::new())
        .await
        .expect_err("connection should fail");

    assert_eq!(failure.stage, AnalysisStage::Fetching);
    assert!(failure.error.is_network(), "got: {:?}", failure.error);
    assert!(failure.partial.is_none());
}

#[tokio::test]
async fn test_oversized_body_is_truncated() {
    let mock_server = MockServer::start().await;

    let mut page = String::from("<html><head><title>Big</title></head><body>");
    page.push_str(&"<p>filler</p>".repeat(1000));
    page.push_str("</body></html>");
    mount_page(&mock_server, "/", 200, &page).await;

    let analyzer = create_analyzer(AnalysisConfig {
        max_content_size: 2048,
        ..test_config()
    });

    let result = analyzer
        .analyze_url(&format!("{}/", mock_server.uri()), &CancellationToken::new())
        .await
        .expect("Truncated page should still be analyzed");

    assert_eq!(result.content_length, 2048);
    assert_eq!(result.title, "Big");
}

#[tokio::test]
async fn test_json_report() {
    let mock_server = MockServer::start().await;
    mount_page(
        &mock_server,
        "/",
        200,
        "<!DOCTYPE html><title>Json</title><article><h3>x</h3></article>",
    )
    .await;

    let analyzer = create_analyzer(test_config());
    let result = analyzer
        .analyze_url(&format!("{}/", mock_server.uri()), &CancellationToken::new())
        .await
        .expect("Analysis should succeed");

    let json: serde_json::Value =
        serde_json::from_str(&format_json(&result).expect("serializable")).expect("valid JSON");

    assert_eq!(json["title"], "Json");
    assert_eq!(json["headings"]["h3"], 1);
    assert_eq!(json["status_code"], 200);
    assert!(json["load_time_ms"].is_u64());
    assert_eq!(json["links"]["internal"], 0);
}
