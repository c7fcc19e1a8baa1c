//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthService, ProfileService, RentalService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthService>,
    pub profile: Arc<dyn ProfileService>,
    pub rentals: Arc<dyn RentalService>,
}

impl HttpState {
    /// Construct state from the three driving ports.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use car_rental::domain::{RentalBookingService, UserAccountService};
    /// use car_rental::inbound::http::state::HttpState;
    /// use car_rental::outbound::memory::InMemoryStore;
    /// use car_rental::outbound::password::BcryptPasswordHasher;
    ///
    /// let store = Arc::new(InMemoryStore::new());
    /// let accounts = Arc::new(UserAccountService::new(
    ///     store.clone(),
    ///     Arc::new(BcryptPasswordHasher::default()),
    /// ));
    /// let rentals = Arc::new(RentalBookingService::new(store.clone(), store));
    /// let state = HttpState::new(accounts.clone(), accounts, rentals);
    /// let _auth = state.auth.clone();
    /// ```
    pub fn new(
        auth: Arc<dyn AuthService>,
        profile: Arc<dyn ProfileService>,
        rentals: Arc<dyn RentalService>,
    ) -> Self {
        Self {
            auth,
            profile,
            rentals,
        }
    }
}
