use crate::datamodel::UserSubject;
use crate::errors::Result;
use crate::networking::ApiClient;
use crate::request::ActionParameters;
use crate::service::perform_user_action;
use std::rc::Rc;

/// Blocks users via `action=block`
pub struct UserBlocker<C: ApiClient> {
    api: Rc<C>,
}

impl<C: ApiClient> UserBlocker<C> {
    pub fn new(api: Rc<C>) -> Self {
        Self { api }
    }

    /// Block `user`.
    ///
    /// `extra` carries optional wire parameters such as `expiry`, `reason`
    /// or `nocreate`. The `user` and `token` keys are always the computed
    /// ones, whatever `extra` contains.
    ///
    /// # Example
    /// ```no_run
    /// use mediawiki_api::{MediawikiFactory, params};
    /// use mediawiki_api::networking::MediawikiApi;
    /// let api = MediawikiApi::new("https://test.wikipedia.org/w/api.php").unwrap();
    /// let factory = MediawikiFactory::new(api);
    /// factory
    ///     .new_user_blocker()
    ///     .block("Vandal", params! { "expiry" => "1 week", "reason" => "spam" })
    ///     .unwrap();
    /// ```
    pub fn block(&self, user: impl Into<UserSubject>, extra: ActionParameters) -> Result<bool> {
        perform_user_action(&*self.api, "block", "user", &user.into(), extra)
    }
}

/// Lifts blocks via `action=unblock`
pub struct UserUnblocker<C: ApiClient> {
    api: Rc<C>,
}

impl<C: ApiClient> UserUnblocker<C> {
    pub fn new(api: Rc<C>) -> Self {
        Self { api }
    }

    /// Unblock `user`; same parameter rules as [`UserBlocker::block`]
    pub fn unblock(&self, user: impl Into<UserSubject>, extra: ActionParameters) -> Result<bool> {
        perform_user_action(&*self.api, "unblock", "user", &user.into(), extra)
    }
}
