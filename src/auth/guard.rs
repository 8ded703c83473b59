use crate::auth::storage::SessionStorage;
use crate::notify::Notifier;
use crate::routes::Route;

pub const LOGIN_REQUIRED: &str = "You need to login first";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
    Proceed,
    Redirect(Route),
}

/// Gate navigation on the presence of a stored session.
///
/// Only checks that something is stored; an expired token still passes and the
/// first API call made with it reports the failure.
pub fn check(route: &Route, storage: &dyn SessionStorage, notifier: &dyn Notifier) -> GuardOutcome {
    if !route.is_protected() || storage.has_session() {
        return GuardOutcome::Proceed;
    }
    tracing::debug!(%route, "no stored session, redirecting to login");
    notifier.warning(LOGIN_REQUIRED);
    GuardOutcome::Redirect(Route::Login)
}
