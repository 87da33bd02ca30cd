//! Draining a mock wiki's job queue through the test environment

use mediawiki_api::MediawikiApiError;
use mediawiki_api::test_environment::{TestEnvironment, TestEnvironmentConfig};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct MockWiki {
    server: MockServer,
    rt: Runtime,
}

impl MockWiki {
    /// A wiki whose job queue starts at `jobs` and loses one job per main
    /// page view
    fn with_jobs(jobs: u64) -> (Self, Arc<AtomicU64>) {
        let rt = Runtime::new().unwrap();
        let server = rt.block_on(MockServer::start());
        let queue = Arc::new(AtomicU64::new(jobs));
        let base = format!("{}/wiki/Main_Page", server.uri());

        rt.block_on(async {
            Mock::given(method("GET"))
                .and(path("/w/api.php"))
                .and(query_param("siprop", "general"))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                    "query": {"general": {"base": base, "sitename": "Mock Wiki"}}
                })))
                .mount(&server)
                .await;

            let statistics = queue.clone();
            Mock::given(method("GET"))
                .and(path("/w/api.php"))
                .and(query_param("siprop", "statistics"))
                .respond_with(move |_req: &wiremock::Request| {
                    let jobs = statistics.load(Ordering::SeqCst);
                    ResponseTemplate::new(200).set_body_json(json!({
                        "query": {"statistics": {"jobs": jobs.to_string()}}
                    }))
                })
                .mount(&server)
                .await;

            let views = queue.clone();
            Mock::given(method("GET"))
                .and(path("/wiki/Main_Page"))
                .respond_with(move |_req: &wiremock::Request| {
                    let _ = views.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                        n.checked_sub(1)
                    });
                    ResponseTemplate::new(200).set_body_string("<html>Main Page</html>")
                })
                .mount(&server)
                .await;
        });

        (Self { server, rt }, queue)
    }

    fn environment(&self) -> TestEnvironment {
        TestEnvironment::new(TestEnvironmentConfig {
            api_url: Some(format!("{}/w/api.php", self.server.uri())),
            ..Default::default()
        })
        .unwrap()
    }

    fn page_views(&self) -> usize {
        self.rt
            .block_on(self.server.received_requests())
            .unwrap_or_default()
            .iter()
            .filter(|r| r.url.path() == "/wiki/Main_Page")
            .count()
    }
}

#[test]
fn test_run_jobs_stops_at_attempt_cap() {
    let (wiki, queue) = MockWiki::with_jobs(12);

    let report = wiki.environment().run_jobs(10).unwrap();

    assert_eq!(report.initial_length, 12);
    assert_eq!(report.attempts, 10);
    assert_eq!(report.final_length, 2);
    assert_eq!(queue.load(Ordering::SeqCst), 2);
    assert_eq!(wiki.page_views(), 10);
}

#[test]
fn test_run_jobs_stops_on_empty_queue() {
    let (wiki, _queue) = MockWiki::with_jobs(4);

    let report = wiki.environment().run_jobs(10).unwrap();

    assert_eq!(report.attempts, 4);
    assert_eq!(report.final_length, 0);
    assert_eq!(wiki.page_views(), 4);
}

#[test]
fn test_bad_override_fails_before_any_request() {
    let (wiki, _queue) = MockWiki::with_jobs(1);

    let result = TestEnvironment::new(TestEnvironmentConfig {
        api_url: Some(format!("{}/w/index.php", wiki.server.uri())),
        ..Default::default()
    });

    assert!(matches!(result, Err(MediawikiApiError::ConfigurationError(_))));
    assert_eq!(
        wiki.rt
            .block_on(wiki.server.received_requests())
            .unwrap_or_default()
            .len(),
        0
    );
}
