//! Token authentication for HTTP handlers.
//!
//! Clients present the token issued at login as
//! `Authorization: Token <40 hex characters>`. Handlers that need a caller
//! take an [`AuthenticatedUser`] argument; extraction fails with
//! `401 Unauthorized` when the header is missing, malformed or revoked.

use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{AuthToken, Error, User};
use crate::inbound::http::state::HttpState;

/// Authorization scheme expected in front of the token.
pub const TOKEN_SCHEME: &str = "Token";

/// Caller resolved from the request's auth token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    user: User,
    token: AuthToken,
}

impl AuthenticatedUser {
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Token the request was authenticated with.
    pub fn token(&self) -> &AuthToken {
        &self.token
    }
}

/// Read the token from the `Authorization` header.
fn presented_token(headers: &HeaderMap) -> Result<AuthToken, Error> {
    let raw = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthorized("authentication credentials were not provided"))?;
    let malformed = || Error::unauthorized("invalid token header");
    let value = raw.to_str().map_err(|_| malformed())?;
    let (scheme, token) = value.trim().split_once(' ').ok_or_else(malformed)?;
    if !scheme.eq_ignore_ascii_case(TOKEN_SCHEME) {
        return Err(malformed());
    }
    AuthToken::parse(token).ok_or_else(malformed)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = presented_token(req.headers());
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let state = state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            let token = token?;
            let user = state.accounts_query.authenticate(&token).await?;
            Ok(Self { user, token })
        })
    }
}
