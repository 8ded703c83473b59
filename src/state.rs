use std::sync::Arc;

use crate::api::{BlogApi, HttpTransport, Transport};
use crate::auth::guard::{self, GuardOutcome};
use crate::auth::storage::{FileSessionStorage, SessionStorage};
use crate::auth::SessionStore;
use crate::config::Config;
use crate::content::ContentStore;
use crate::error::ClientResult;
use crate::notify::Notifier;
use crate::routes::{self, NavItem, Route};

/// Everything a front end needs: both stores plus the seams they were built on.
pub struct App {
    pub session: SessionStore,
    pub content: ContentStore,
    pub storage: Arc<dyn SessionStorage>,
    pub notifier: Arc<dyn Notifier>,
}

impl App {
    pub fn new(
        transport: Arc<dyn Transport>,
        storage: Arc<dyn SessionStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let api = BlogApi::new(transport);
        Self {
            session: SessionStore::new(api.clone(), storage.clone(), notifier.clone()),
            content: ContentStore::new(api, notifier.clone()),
            storage,
            notifier,
        }
    }

    /// Real HTTP transport and the file-backed session from `config`.
    pub fn from_config(config: &Config, notifier: Arc<dyn Notifier>) -> ClientResult<Self> {
        let transport = Arc::new(HttpTransport::new(&config.api)?);
        let storage = Arc::new(FileSessionStorage::new(config.session_path()));
        tracing::debug!(
            base_url = %config.api.base_url,
            session = %config.session_path().display(),
            "client configured"
        );
        Ok(Self::new(transport, storage, notifier))
    }

    pub fn guard(&self, route: &Route) -> GuardOutcome {
        guard::check(route, self.storage.as_ref(), self.notifier.as_ref())
    }

    pub fn menu(&self) -> Vec<NavItem> {
        routes::menu(self.session.is_logged_in())
    }
}
