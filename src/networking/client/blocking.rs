//! Blocking HTTP client implementation for the Action API

use crate::errors::{MediawikiApiError, Result};
use crate::networking::ApiClient;
use crate::networking::auth::blocking::{fetch_token, token_type_for};
use crate::request::SimpleRequest;
use log::{debug, warn};
use reqwest::blocking::{Client, Response};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::time::Duration;

/// Request timeout applied by [`create_client`]
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// User agent sent when the caller does not choose one
pub const DEFAULT_USER_AGENT: &str = concat!("mediawiki-api-rs/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client for Action API operations
///
/// The cookie store keeps the session alive between the login request and
/// the calls made on its behalf.
///
/// # Returns
/// * Returns a configured reqwest Client
///
/// # Example
/// ```no_run
/// use mediawiki_api::networking::create_client;
/// let client = create_client("ExampleBot/1.0").expect("Failed to create client");
/// ```
pub fn create_client(useragent: &str) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .cookie_store(true)
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .user_agent(useragent)
        .build()
}

/// Get the requested URL with the provided client
///
/// Plain page loads, not API calls. Any non-success status is an error.
///
/// # Arguments
/// * `url` - URL to fetch
/// * `client` - reqwest Client to use
///
/// # Example
/// ```no_run
/// use mediawiki_api::networking::{create_client, get_page};
/// let client = create_client("ExampleBot/1.0").unwrap();
/// let response = get_page("https://test.wikipedia.org/wiki/Main_Page", &client);
/// ```
pub fn get_page(url: &str, client: &Client) -> Result<Response> {
    debug!("Did request to {}", url);
    let response = client.get(url).send()?;
    debug!("{} returned {}", url, response.status());
    Ok(response.error_for_status()?)
}

/// An Action API session backed by a blocking reqwest client
///
/// Tokens are cached per token type for the lifetime of the session. The
/// cache is a `RefCell`, so a session belongs to one thread.
pub struct MediawikiApi {
    api_url: String,
    client: Client,
    tokens: RefCell<HashMap<String, String>>,
}

impl MediawikiApi {
    /// Session against `api_url` using a default client
    pub fn new(api_url: impl Into<String>) -> Result<Self> {
        Ok(Self::with_client(api_url, create_client(DEFAULT_USER_AGENT)?))
    }

    /// Session against `api_url` using a caller-built client
    pub fn with_client(api_url: impl Into<String>, client: Client) -> Self {
        Self {
            api_url: api_url.into(),
            client,
            tokens: RefCell::new(HashMap::new()),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// The underlying HTTP client, sharing this session's cookies
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Forget every cached token
    pub fn clear_tokens(&self) {
        self.tokens.borrow_mut().clear();
    }

    fn decode(&self, action: &str, response: Response) -> Result<Value> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .unwrap_or_else(|_| "Failed to read response body".into());
            return Err(MediawikiApiError::ServerError { status, body });
        }

        let out: Value = serde_json::from_str(&response.text()?)?;
        if let Some(error) = out.get("error") {
            return Err(MediawikiApiError::ApiError {
                code: error["code"].as_str().unwrap_or("unknown").to_string(),
                info: error["info"].as_str().unwrap_or_default().to_string(),
            });
        }
        if let Some(warnings) = out.get("warnings") {
            warn!("API warnings for action={}: {}", action, warnings);
        }
        Ok(out)
    }
}

impl ApiClient for MediawikiApi {
    fn get_token(&self, action: &str) -> Result<String> {
        let token_type = token_type_for(action);
        if let Some(token) = self.tokens.borrow().get(token_type) {
            return Ok(token.clone());
        }
        let token = fetch_token(self, token_type)?;
        self.tokens
            .borrow_mut()
            .insert(token_type.to_string(), token.clone());
        Ok(token)
    }

    fn post_request(&self, request: &SimpleRequest) -> Result<Value> {
        debug!("POST action={} to {}", request.action(), self.api_url);
        let response = self
            .client
            .post(&self.api_url)
            .form(&request.to_wire_pairs())
            .send()?;
        self.decode(request.action(), response)
    }

    fn get_request(&self, request: &SimpleRequest) -> Result<Value> {
        debug!("GET action={} from {}", request.action(), self.api_url);
        let response = self
            .client
            .get(&self.api_url)
            .query(&request.to_wire_pairs())
            .send()?;
        self.decode(request.action(), response)
    }
}
