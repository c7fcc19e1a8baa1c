//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;

use crate::domain::{RentalBookingService, UserAccountService};
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::InMemoryStore;
use crate::outbound::password::{BcryptPasswordHasher, MIN_BCRYPT_COST};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state backed by a fresh in-memory store and a cheap bcrypt cost.
///
/// The store is returned too so tests can seed cars and inspect rentals.
pub fn memory_state() -> (HttpState, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let hasher = BcryptPasswordHasher::new(MIN_BCRYPT_COST).expect("minimum cost is valid");
    let accounts = Arc::new(UserAccountService::new(store.clone(), Arc::new(hasher)));
    let rentals = Arc::new(RentalBookingService::new(store.clone(), store.clone()));
    (HttpState::new(accounts.clone(), accounts, rentals), store)
}

/// Extract the `session` cookie set on a response.
pub fn session_cookie(res: &ServiceResponse) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned())
        .expect("session cookie set")
}
