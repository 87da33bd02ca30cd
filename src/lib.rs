//! # mediawiki-api
//!
//! A blocking client for the MediaWiki Action API.
//!
//! Requests are an `action` name plus ordered parameters; state-changing
//! actions are wrapped in small services that fetch the right token and
//! issue a single POST through a shared [`networking::ApiClient`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mediawiki_api::networking::{MediawikiApi, get_login_info, login};
//! use mediawiki_api::{MediawikiFactory, User, params};
//!
//! let api = MediawikiApi::new("https://test.wikipedia.org/w/api.php").unwrap();
//! login(&api, &get_login_info("log.txt").unwrap()).unwrap();
//!
//! let factory = MediawikiFactory::new(api);
//! factory
//!     .new_user_blocker()
//!     .block(User::new("Vandal"), params! { "expiry" => "infinite" })
//!     .unwrap();
//! ```

pub mod datamodel;
pub mod errors;
pub mod factory;
pub mod networking;
pub mod request;
pub mod service;
pub mod test_environment;

pub use datamodel::{User, UserSubject};
pub use errors::{MediawikiApiError, Result};
pub use factory::MediawikiFactory;
pub use request::{ActionParameters, ParamValue, SimpleRequest, merge_params};
pub use service::{UserBlocker, UserUnblocker};
