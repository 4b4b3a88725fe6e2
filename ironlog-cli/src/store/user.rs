use tokio::sync::watch;

use crate::api::ApiClient;
use crate::models::UserAccount;

/// Profile of the logged-in user
pub struct UserStore {
    state: watch::Sender<Option<UserAccount>>,
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl UserStore {
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self { state }
    }

    pub fn current(&self) -> Option<UserAccount> {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<UserAccount>> {
        self.state.subscribe()
    }

    /// Load the profile. On failure the error is logged and `None` is
    /// returned; the cached user is dropped once the session is gone.
    pub async fn fetch_user(&self, api: &ApiClient) -> Option<UserAccount> {
        match api.whoami().await {
            Ok(user) => {
                if let Err(e) = api.tokens().cache_pro_flag(user.is_pro) {
                    tracing::warn!("Could not cache entitlement flag: {}", e);
                }
                self.state.send_replace(Some(user.clone()));
                Some(user)
            }
            Err(e) => {
                tracing::warn!("Failed to fetch user: {}", e);
                if e.requires_login() {
                    self.clear();
                }
                None
            }
        }
    }

    pub fn clear(&self) {
        self.state.send_replace(None);
    }
}
