//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! domain-friendly operations such as persisting or retrieving the caller's
//! [`SessionIdentity`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, SessionIdentity};

pub(crate) const IDENTITY_KEY: &str = "identity";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated identity in the session cookie.
    ///
    /// The session id is renewed so a pre-login cookie cannot be replayed.
    pub fn persist_identity(&self, identity: &SessionIdentity) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(IDENTITY_KEY, identity)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current identity from the session, if present.
    pub fn identity(&self) -> Result<Option<SessionIdentity>, Error> {
        match self.0.get::<SessionIdentity>(IDENTITY_KEY) {
            Ok(identity) => Ok(identity),
            Err(error) => {
                tracing::warn!("invalid identity in session cookie: {error}");
                Ok(None)
            }
        }
    }

    /// Require an authenticated identity or return `401 Unauthorized`.
    pub fn require_identity(&self) -> Result<SessionIdentity, Error> {
        self.identity()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop every session entry and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
