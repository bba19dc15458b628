//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The signed-in [`Principal`] is stored as JSON in the private session
//! cookie. Handlers call [`SessionContext::require_principal`] and pass the
//! result explicitly into the use case.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, Principal};

pub(crate) const PRINCIPAL_KEY: &str = "principal";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated principal, rotating the session id.
    pub fn persist_principal(&self, principal: &Principal) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(PRINCIPAL_KEY, principal)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current principal, if any.
    ///
    /// Unreadable session entries are treated as signed out.
    pub fn principal(&self) -> Result<Option<Principal>, Error> {
        match self.0.get::<Principal>(PRINCIPAL_KEY) {
            Ok(principal) => Ok(principal),
            Err(error) => {
                warn!(%error, "discarding unreadable principal in session cookie");
                self.0.remove(PRINCIPAL_KEY);
                Ok(None)
            }
        }
    }

    /// Require a signed-in principal or return `401 Unauthorized`.
    pub fn require_principal(&self) -> Result<Principal, Error> {
        self.principal()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Drop all session state.
    pub fn clear(&self) {
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
