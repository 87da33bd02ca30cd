//! # networking
//!
//! Talking to a MediaWiki installation over its Action API.
//!
//! This module provides:
//! - The [`ApiClient`] trait every action service is written against
//! - A blocking, cookie-aware HTTP client implementing it ([`MediawikiApi`])
//! - Token acquisition and login/logout
//!
//! ## Usage - Blocking (default)
//!
//! ```no_run
//! use mediawiki_api::networking::{ApiClient, MediawikiApi, login, LoginInfo};
//! use mediawiki_api::{params, SimpleRequest};
//!
//! let api = MediawikiApi::new("https://test.wikipedia.org/w/api.php")
//!     .expect("Failed to create client");
//!
//! login(&api, &LoginInfo::new("Bot", "secret")).expect("login failed");
//!
//! let info = api
//!     .get_request(&SimpleRequest::new("query", params! { "meta" => "siteinfo" }))
//!     .expect("query failed");
//! println!("{}", info["query"]["general"]["sitename"]);
//! ```

// Module declarations
pub mod auth;
pub mod client;

use crate::errors::Result;
use crate::request::SimpleRequest;
use serde_json::Value;

/// One logical session against one MediaWiki installation.
///
/// Services never construct a client; they are handed one and call into it.
/// Implementations are free to keep session state (cookies, cached tokens)
/// and are not expected to be shared across threads.
pub trait ApiClient {
    /// Token authorizing `action` for the current session
    fn get_token(&self, action: &str) -> Result<String>;
    /// Send `request` as a POST and return the decoded JSON body
    fn post_request(&self, request: &SimpleRequest) -> Result<Value>;
    /// Send `request` as a GET and return the decoded JSON body
    fn get_request(&self, request: &SimpleRequest) -> Result<Value>;
}

// Re-export commonly used items for convenience
pub use auth::blocking::{fetch_token, login, logout, token_type_for};
pub use auth::{LoginInfo, get_login_info};
pub use client::blocking::{MediawikiApi, create_client, get_page};

// Re-export types from dependencies for convenience
pub use reqwest::blocking::Client;
