use std::sync::Arc;

use crate::api::models::{Credentials, ProfileUpdate, Registration, Session};
use crate::api::BlogApi;
use crate::auth::guard::LOGIN_REQUIRED;
use crate::auth::storage::SessionStorage;
use crate::error::{ClientError, ClientResult};
use crate::notify::Notifier;

pub const REGISTERED: &str = "User registered successfully!";
pub const LOGGED_IN: &str = "Login Successful!";
pub const LOGGED_OUT: &str = "Logged out successfully";

/// Owner of the authenticated session.
///
/// Every successful mutation is written through to durable storage before the
/// method returns, so the stored copy never lags the in-memory one.
pub struct SessionStore {
    api: BlogApi,
    storage: Arc<dyn SessionStorage>,
    notifier: Arc<dyn Notifier>,
    current: Option<Session>,
}

impl SessionStore {
    /// Hydrate from durable storage. An unreadable copy counts as logged out.
    pub fn new(api: BlogApi, storage: Arc<dyn SessionStorage>, notifier: Arc<dyn Notifier>) -> Self {
        let current = match storage.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "stored session is unreadable, starting logged out");
                None
            }
        };
        if let Some(session) = &current {
            tracing::info!(user = %session.username, "restored session");
        }
        Self {
            api,
            storage,
            notifier,
            current,
        }
    }

    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.current.as_ref().map(|s| s.token.as_str())
    }

    pub fn is_logged_in(&self) -> bool {
        self.current.is_some()
    }

    /// Saving persists before the session is held. Clearing drops the held
    /// session first, so a failed storage clear still leaves nobody logged in.
    fn replace(&mut self, session: Option<Session>) -> ClientResult<()> {
        match session {
            Some(s) => {
                self.storage.save(&s)?;
                self.current = Some(s);
                Ok(())
            }
            None => {
                self.current = None;
                self.storage.clear()
            }
        }
    }

    fn establish(&mut self, session: ClientResult<Session>, message: &str) -> ClientResult<Session> {
        let session = session?;
        self.replace(Some(session.clone()))?;
        tracing::info!(user = %session.username, "session established");
        self.notifier.success(message);
        Ok(session)
    }

    pub async fn register(&mut self, registration: &Registration) -> ClientResult<Session> {
        let result = self.api.register(registration).await;
        let result = self.establish(result, REGISTERED);
        self.notifier.surface(result)
    }

    pub async fn login(&mut self, credentials: &Credentials) -> ClientResult<Session> {
        let result = self.api.login(credentials).await;
        let result = self.establish(result, LOGGED_IN);
        self.notifier.surface(result)
    }

    /// Tell the server, then drop the local session whatever the server said.
    ///
    /// The returned error, if any, is the server's; the local session is gone either way.
    pub async fn logout(&mut self) -> ClientResult<()> {
        let server = self.api.logout(self.token()).await;
        let local = self.replace(None);
        tracing::info!("session cleared");

        let result = server.and(local);
        if result.is_ok() {
            self.notifier.success(LOGGED_OUT);
        }
        self.notifier.surface(result)
    }

    /// Patch the user and merge the echoed fields over the session.
    pub async fn update_profile(
        &mut self,
        update: &ProfileUpdate,
        success_message: &str,
    ) -> ClientResult<Session> {
        let result = self.apply_update(update).await;
        if result.is_ok() {
            self.notifier.success(success_message);
        }
        self.notifier.surface(result)
    }

    async fn apply_update(&mut self, update: &ProfileUpdate) -> ClientResult<Session> {
        let (id, token) = match &self.current {
            Some(s) => (s.id.clone(), s.token.clone()),
            None => return Err(ClientError::validation(LOGIN_REQUIRED)),
        };
        let echoed = self.api.update_user(&id, Some(&token), update).await?;

        // Re-read current: the merge target is whatever is held when the response lands.
        let merged = match &self.current {
            Some(s) => s.merged_with(&echoed)?,
            None => return Err(ClientError::validation(LOGIN_REQUIRED)),
        };
        self.replace(Some(merged.clone()))?;
        Ok(merged)
    }
}
