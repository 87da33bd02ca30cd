//! # test_environment
//!
//! Harness for integration tests against a live MediaWiki installation.
//!
//! The target is `https://deployment.wikimedia.beta.wmflabs.org/w/api.php`
//! unless `MEDIAWIKI_API_URL` points elsewhere. The harness also knows how
//! to drain the wiki's job queue, which only works when the installation
//! has `$wgJobRunRate` above zero: jobs then run as a side effect of
//! ordinary page views.
//!
//! ```no_run
//! use mediawiki_api::params;
//! use mediawiki_api::test_environment::{TestEnvironment, init_logging};
//!
//! init_logging();
//! let env = TestEnvironment::new_default().expect("bad MEDIAWIKI_API_URL");
//! env.factory().new_user_blocker().block("Vandal", params! {}).unwrap();
//! env.run_jobs(10).unwrap();
//! ```

use crate::errors::{MediawikiApiError, Result};
use crate::factory::MediawikiFactory;
use crate::networking::client::blocking::DEFAULT_USER_AGENT;
use crate::networking::{ApiClient, Client, MediawikiApi, create_client, get_page};
use crate::params;
use crate::request::SimpleRequest;
use log::{debug, info, warn};
use std::rc::Rc;
use std::time::{Duration, Instant};
use url::Url;

/// Environment variable overriding the target endpoint
pub const MEDIAWIKI_API_URL_VAR: &str = "MEDIAWIKI_API_URL";
/// Endpoint used when no override is set
pub const DEFAULT_API_URL: &str = "https://deployment.wikimedia.beta.wmflabs.org/w/api.php";

/// Install `pretty_env_logger`; later calls are no-ops
pub fn init_logging() {
    let _ = pretty_env_logger::try_init();
}

/// Acceptance rule for an overridden endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRule {
    pub required_suffix: String,
}

impl Default for EndpointRule {
    fn default() -> Self {
        Self {
            required_suffix: "api.php".to_string(),
        }
    }
}

impl EndpointRule {
    pub fn validate(&self, url: &str) -> Result<()> {
        if !url.ends_with(&self.required_suffix) {
            return Err(MediawikiApiError::ConfigurationError(format!(
                "URL incorrect: {url} (the {MEDIAWIKI_API_URL_VAR} environment variable \
                 should end in '{}')",
                self.required_suffix
            )));
        }
        Url::parse(url).map_err(|e| {
            MediawikiApiError::ConfigurationError(format!("URL incorrect: {url} ({e})"))
        })?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct TestEnvironmentConfig {
    /// Override endpoint; `None` or empty selects `default_api_url`
    pub api_url: Option<String>,
    pub default_api_url: String,
    pub rule: EndpointRule,
    pub user_agent: String,
}

impl Default for TestEnvironmentConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            default_api_url: DEFAULT_API_URL.to_string(),
            rule: EndpointRule::default(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl TestEnvironmentConfig {
    /// Configuration with the override read from `MEDIAWIKI_API_URL`
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Configuration with the override read through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            api_url: lookup(MEDIAWIKI_API_URL_VAR),
            ..Self::default()
        }
    }

    /// The endpoint to use. Only an override is checked against the rule,
    /// exactly as given; an empty override counts as unset.
    pub fn resolve_api_url(&self) -> Result<String> {
        match self.api_url.as_deref() {
            Some(url) if !url.is_empty() => {
                self.rule.validate(url)?;
                Ok(url.to_string())
            }
            _ => Ok(self.default_api_url.clone()),
        }
    }
}

/// One API session and a factory bound to it, built once per test run
pub struct TestEnvironment<C: ApiClient = MediawikiApi> {
    api: Rc<C>,
    factory: MediawikiFactory<C>,
}

impl TestEnvironment<MediawikiApi> {
    /// Build from `config`, failing before any client exists if the
    /// endpoint is rejected
    pub fn new(config: TestEnvironmentConfig) -> Result<Self> {
        let api_url = config.resolve_api_url()?;
        let client = create_client(&config.user_agent)?;
        debug!("Test environment targets {}", api_url);
        Ok(Self::with_api(MediawikiApi::with_client(api_url, client)))
    }

    pub fn new_default() -> Result<Self> {
        Self::new(TestEnvironmentConfig::from_env())
    }

    /// Job runner that triggers with plain HTTP page loads
    pub fn job_runner(&self) -> JobRunner<MediawikiApi, HttpPageTrigger> {
        let trigger = HttpPageTrigger::new(self.api.http_client().clone());
        JobRunner::new(Rc::clone(&self.api), trigger)
    }

    /// Run queued jobs; see [`JobRunner::run_jobs`]
    pub fn run_jobs(&self, max_attempts: u32) -> Result<RunJobsReport> {
        self.job_runner().run_jobs(max_attempts)
    }
}

impl<C: ApiClient> TestEnvironment<C> {
    pub fn with_api(api: C) -> Self {
        let api = Rc::new(api);
        Self {
            factory: MediawikiFactory::from_shared(Rc::clone(&api)),
            api,
        }
    }

    pub fn api(&self) -> &C {
        &self.api
    }

    pub fn factory(&self) -> &MediawikiFactory<C> {
        &self.factory
    }
}

/// Something that provokes job execution on the wiki.
///
/// Best effort: success only means the trigger was delivered, not that any
/// job ran.
pub trait PageTrigger {
    fn trigger(&self, url: &str) -> Result<()>;
}

/// Loads a page over plain HTTP
pub struct HttpPageTrigger {
    client: Client,
}

impl HttpPageTrigger {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

impl PageTrigger for HttpPageTrigger {
    fn trigger(&self, url: &str) -> Result<()> {
        get_page(url, &self.client)?;
        Ok(())
    }
}

/// What a call to [`JobRunner::run_jobs`] observed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunJobsReport {
    pub attempts: u32,
    pub initial_length: u64,
    pub final_length: u64,
}

/// Whether polling ends after `attempts` triggers.
///
/// Stops once the queue is empty, once `max_attempts` triggers were sent,
/// or once the queue shrank by at least `max_attempts` since the start.
/// Whether the last condition is intended is an open compatibility
/// question: the other reading keeps polling only while
/// `initial - current > max_attempts`, which usually stops after one attempt.
pub fn should_stop_polling(initial: u64, current: u64, attempts: u32, max_attempts: u32) -> bool {
    current == 0
        || attempts >= max_attempts
        || initial.saturating_sub(current) >= u64::from(max_attempts)
}

/// Number of jobs currently in the queue
pub fn job_queue_length<C: ApiClient + ?Sized>(api: &C) -> Result<u64> {
    let request = SimpleRequest::new(
        "query",
        params! { "meta" => "siteinfo", "siprop" => "statistics" },
    );
    let out = api.get_request(&request)?;
    let jobs = &out["query"]["statistics"]["jobs"];
    jobs.as_u64()
        .or_else(|| jobs.as_str().and_then(|s| s.trim().parse().ok()))
        .ok_or_else(|| {
            MediawikiApiError::MalformedResponse(format!(
                "query.statistics.jobs is not a job count: {jobs}"
            ))
        })
}

/// The wiki's main page URL as reported by `siprop=general`
pub fn site_base_url<C: ApiClient + ?Sized>(api: &C) -> Result<String> {
    let request = SimpleRequest::new(
        "query",
        params! { "meta" => "siteinfo", "siprop" => "general" },
    );
    let out = api.get_request(&request)?;
    out["query"]["general"]["base"]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| {
            MediawikiApiError::MalformedResponse("query.general.base missing".to_string())
        })
}

/// Drains a wiki's job queue by repeatedly loading its main page
pub struct JobRunner<C: ApiClient, T: PageTrigger> {
    api: Rc<C>,
    trigger: T,
    timeout: Option<Duration>,
}

impl<C: ApiClient, T: PageTrigger> JobRunner<C, T> {
    pub fn new(api: Rc<C>, trigger: T) -> Self {
        Self {
            api,
            trigger,
            timeout: None,
        }
    }

    /// Also give up once `timeout` has elapsed
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Trigger the main page and re-check the queue until
    /// [`should_stop_polling`] says stop. At least one trigger is always sent.
    ///
    /// Jobs left in the queue afterwards are not an error. A failed trigger
    /// is logged and polling carries on; failed queue queries are returned.
    pub fn run_jobs(&self, max_attempts: u32) -> Result<RunJobsReport> {
        let base_url = site_base_url(&*self.api)?;
        let initial_length = job_queue_length(&*self.api)?;
        let started = Instant::now();
        info!("{} jobs queued, triggering {}", initial_length, base_url);

        let mut attempts = 0;
        let final_length = loop {
            attempts += 1;
            if let Err(e) = self.trigger.trigger(&base_url) {
                warn!("Trigger attempt {} failed: {}", attempts, e);
            }
            let current_length = job_queue_length(&*self.api)?;
            debug!("Attempt {}: {} jobs queued", attempts, current_length);

            if should_stop_polling(initial_length, current_length, attempts, max_attempts) {
                break current_length;
            }
            if let Some(timeout) = self.timeout {
                if started.elapsed() >= timeout {
                    warn!("Gave up running jobs after {:?}", timeout);
                    break current_length;
                }
            }
        };

        info!(
            "Ran jobs in {} attempts: {} -> {} queued",
            attempts, initial_length, final_length
        );
        Ok(RunJobsReport {
            attempts,
            initial_length,
            final_length,
        })
    }
}
