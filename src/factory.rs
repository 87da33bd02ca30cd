//! Builds services bound to one shared session

use crate::networking::ApiClient;
use crate::service::{UserBlocker, UserUnblocker};
use std::rc::Rc;

/// Hands out services that all talk through the same [`ApiClient`]
pub struct MediawikiFactory<C: ApiClient> {
    api: Rc<C>,
}

impl<C: ApiClient> MediawikiFactory<C> {
    pub fn new(api: C) -> Self {
        Self::from_shared(Rc::new(api))
    }

    pub fn from_shared(api: Rc<C>) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &Rc<C> {
        &self.api
    }

    pub fn new_user_blocker(&self) -> UserBlocker<C> {
        UserBlocker::new(Rc::clone(&self.api))
    }

    pub fn new_user_unblocker(&self) -> UserUnblocker<C> {
        UserUnblocker::new(Rc::clone(&self.api))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params;
    use crate::service::testing::RecordingApi;

    #[test]
    fn test_services_share_the_client() {
        let factory = MediawikiFactory::new(RecordingApi::default());

        factory.new_user_blocker().block("A", params! {}).unwrap();
        factory.new_user_unblocker().unblock("A", params! {}).unwrap();

        let actions: Vec<_> = factory
            .api()
            .posts
            .borrow()
            .iter()
            .map(|r| r.action().to_string())
            .collect();
        assert_eq!(actions, vec!["block", "unblock"]);
    }
}
