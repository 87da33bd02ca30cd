//! Blocking token and login handling for the Action API
use crate::errors::{MediawikiApiError, Result};
use crate::networking::ApiClient;
use crate::networking::auth::LoginInfo;
use crate::networking::client::blocking::MediawikiApi;
use crate::params;
use crate::request::SimpleRequest;
use log::{debug, info};
use serde::Deserialize;

/// Token types that are requested under their own name; any other action
/// is authorized by the session's csrf token.
const DEDICATED_TOKEN_TYPES: [&str; 6] = [
    "createaccount",
    "login",
    "patrol",
    "rollback",
    "userrights",
    "watch",
];

/// Map an action name to the `meta=tokens` type authorizing it
///
/// # Example
/// ```
/// use mediawiki_api::networking::token_type_for;
/// assert_eq!(token_type_for("block"), "csrf");
/// assert_eq!(token_type_for("login"), "login");
/// ```
pub fn token_type_for(action: &str) -> &str {
    if DEDICATED_TOKEN_TYPES.iter().any(|t| *t == action) {
        action
    } else {
        "csrf"
    }
}

/// Fetch a fresh token of `token_type` for the client's session
///
/// # Arguments
/// * `api` - client whose session the token belongs to
/// * `token_type` - a `meta=tokens` type such as `csrf` or `login`
///
/// # Returns
/// * Returns the token, or `MalformedResponse` if the reply carries none
pub fn fetch_token<C: ApiClient + ?Sized>(api: &C, token_type: &str) -> Result<String> {
    let request = SimpleRequest::new("query", params! { "meta" => "tokens", "type" => token_type });
    let out = api.get_request(&request)?;
    let field = format!("{token_type}token");
    let token = out["query"]["tokens"][field.as_str()]
        .as_str()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            MediawikiApiError::MalformedResponse(format!("query.tokens.{field} missing"))
        })?;
    debug!("Fetched {} token", token_type);

    Ok(token.to_string())
}

/// `action=login` reply body
#[derive(Deserialize, Debug)]
struct LoginReply {
    login: LoginResult,
}

#[derive(Deserialize, Debug)]
struct LoginResult {
    result: String,
    #[serde(default)]
    reason: Option<String>,
}

/// Login with the provided credentials
///
/// # Arguments
/// * `api` - client with cookie store enabled
/// * `info` - account name and password
///
/// # Example
/// ```no_run
/// use mediawiki_api::networking::{MediawikiApi, get_login_info, login};
/// let api = MediawikiApi::new("https://test.wikipedia.org/w/api.php").unwrap();
/// login(&api, &get_login_info("log.txt").unwrap()).unwrap();
/// ```
pub fn login(api: &MediawikiApi, info: &LoginInfo) -> Result<()> {
    let token = api.get_token("login")?;
    let request = SimpleRequest::new(
        "login",
        params! {
            "lgname" => &*info.username,
            "lgpassword" => &*info.password,
            "lgtoken" => token,
        },
    );
    let out = api.post_request(&request);
    // tokens fetched before login belong to the anonymous session
    api.clear_tokens();

    let reply: LoginReply = serde_json::from_value(out?)?;
    if reply.login.result != "Success" {
        return Err(MediawikiApiError::LoginFailed(
            reply.login.reason.unwrap_or(reply.login.result),
        ));
    }
    info!("Logged in as {}", info.username);
    Ok(())
}

/// End the session, invalidating its cookies and tokens
pub fn logout(api: &MediawikiApi) -> Result<()> {
    let token = api.get_token("logout")?;
    api.post_request(&SimpleRequest::new("logout", params! { "token" => token }))?;
    api.clear_tokens();
    info!("Logged out");
    Ok(())
}
