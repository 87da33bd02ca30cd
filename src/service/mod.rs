//! Action services
//!
//! Each service maps one method call onto one named Action API action. A
//! service holds nothing but a handle to the shared [`ApiClient`]; every
//! call fetches its own token and issues exactly one request.

mod user_blocker;

pub use user_blocker::{UserBlocker, UserUnblocker};

use crate::datamodel::UserSubject;
use crate::errors::Result;
use crate::networking::ApiClient;
use crate::params;
use crate::request::{ActionParameters, SimpleRequest, merge_params};
use log::debug;

/// Run a state-changing `action` aimed at a user.
///
/// The subject is validated before any I/O. `field` (for example `user`)
/// and `token` overwrite same-named keys in `extra`. Errors from the token
/// fetch or the POST are returned as they are.
pub fn perform_user_action<C: ApiClient + ?Sized>(
    api: &C,
    action: &str,
    field: &str,
    subject: &UserSubject,
    extra: ActionParameters,
) -> Result<bool> {
    let name = subject.resolve()?;
    let token = api.get_token(action)?;
    let required = params! { field => name, "token" => token };

    debug!("{} {}", action, name);
    api.post_request(&SimpleRequest::new(action, merge_params(extra, required)))?;
    Ok(true)
}
