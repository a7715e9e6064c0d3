use std::time::Duration;

use listing_engine::{FetchError, FetchSettings, Fetcher, RetryingFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn quick_settings(max_retries: u32) -> FetchSettings {
    FetchSettings {
        max_retries,
        backoff_unit: Duration::from_millis(5),
        ..FetchSettings::default()
    }
}

#[tokio::test]
async fn returns_decoded_body_on_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/room"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>ok</html>", "text/html; charset=utf-8"),
        )
        .mount(&server)
        .await;

    let fetcher = RetryingFetcher::new(quick_settings(0)).expect("client");
    let body = fetcher
        .fetch(&format!("{}/room", server.uri()))
        .await
        .expect("fetch ok");
    assert_eq!(body, "<html>ok</html>");
}

#[tokio::test]
async fn decodes_non_utf8_pages_via_declared_charset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/latin1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(b"caf\xe9".to_vec(), "text/html; charset=iso-8859-1"),
        )
        .mount(&server)
        .await;

    let fetcher = RetryingFetcher::new(quick_settings(0)).expect("client");
    let body = fetcher
        .fetch(&format!("{}/latin1", server.uri()))
        .await
        .expect("fetch ok");
    assert_eq!(body, "caf\u{e9}");
}

#[tokio::test]
async fn recovers_when_a_retry_succeeds_within_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/flaky"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("recovered", "text/html"))
        .mount(&server)
        .await;

    let fetcher = RetryingFetcher::new(quick_settings(2)).expect("client");
    let body = fetcher
        .fetch(&format!("{}/flaky", server.uri()))
        .await
        .expect("third attempt succeeds");
    assert_eq!(body, "recovered");

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn non_success_statuses_are_retried_not_accepted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(404))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("found it", "text/html"))
        .mount(&server)
        .await;

    let fetcher = RetryingFetcher::new(quick_settings(1)).expect("client");
    let body = fetcher
        .fetch(&format!("{}/moved", server.uri()))
        .await
        .expect("second attempt succeeds");
    assert_eq!(body, "found it");
}

#[tokio::test]
async fn exhausts_the_budget_after_exactly_max_retries_plus_one_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/down"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let fetcher = RetryingFetcher::new(quick_settings(2)).expect("client");
    let error = fetcher
        .fetch(&format!("{}/down", server.uri()))
        .await
        .expect_err("budget exhausted");
    match error {
        FetchError::Exhausted { attempts, url, .. } => {
            assert_eq!(attempts, 3);
            assert!(url.ends_with("/down"));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 3);
}

#[tokio::test]
async fn zero_retries_means_a_single_attempt() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/once"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = RetryingFetcher::new(quick_settings(0)).expect("client");
    let error = fetcher
        .fetch(&format!("{}/once", server.uri()))
        .await
        .expect_err("no retry budget");
    assert!(matches!(error, FetchError::Exhausted { attempts: 1, .. }));

    let requests = server.received_requests().await.expect("recording enabled");
    assert_eq!(requests.len(), 1);
}

#[tokio::test]
async fn sends_the_configured_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/headers"))
        .and(wiremock::matchers::header("User-Agent", "listing-harvester-test"))
        .and(wiremock::matchers::header("Accept-Language", "en-US,en;q=0.9"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("ok", "text/html"))
        .mount(&server)
        .await;

    let settings = FetchSettings {
        user_agent: "listing-harvester-test".to_string(),
        ..quick_settings(0)
    };
    let fetcher = RetryingFetcher::new(settings).expect("client");
    let body = fetcher
        .fetch(&format!("{}/headers", server.uri()))
        .await
        .expect("headers matched");
    assert_eq!(body, "ok");
}
