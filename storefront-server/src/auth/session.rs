//! Session Context
//!
//! A session cookie carries an opaque token. The server keeps one row per
//! token holding two independent pieces of state:
//!
//! - an optional login identity (user id + username)
//! - an optional cart-correlation id, minted lazily on first cart access
//!
//! A guest has a cart id and no identity; a freshly logged-in user may have
//! an identity and no cart id yet. Neither is derived from the other.

use axum::extract::FromRequestParts;
use axum::response::{IntoResponseParts, ResponseParts};
use http::HeaderValue;
use http::header::{COOKIE, SET_COOKIE};
use http::request::Parts;
use sha2::{Digest, Sha256};
use shared::util::now_millis;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::repository::session::{self as session_repo, SessionRecord};
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode};

/// Session cookie name
pub const SESSION_COOKIE: &str = "storefront_session";

/// Authenticated user stored in the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
    pub username: String,
}

/// What the response must do with the session cookie
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CookieAction {
    Keep,
    Issue,
    Clear,
}

/// Per-request view of the session
#[derive(Debug, Clone)]
pub struct SessionContext {
    /// Raw token of the live session row, if any
    token: Option<String>,
    /// A cookie was sent but matched no live session
    stale: bool,
    action: CookieAction,
    ttl_secs: i64,
    secure: bool,
    /// Login identity
    pub identity: Option<Identity>,
    /// Cart-correlation id
    pub cart_id: Option<String>,
}

impl SessionContext {
    /// Identity of the logged-in user, or `NotAuthenticated`
    /// (`SessionExpired` when the cookie outlived its session).
    pub fn require_identity(&self) -> AppResult<&Identity> {
        match &self.identity {
            Some(identity) => Ok(identity),
            None if self.stale => Err(AppError::new(ErrorCode::SessionExpired)),
            None => Err(AppError::not_authenticated()),
        }
    }

    /// Cart id for this session, minting and persisting one on first use
    ///
    /// Creates a session row (and schedules `Set-Cookie`) when the request
    /// carried no live session.
    pub async fn ensure_cart_id(&mut self, state: &ServerState) -> AppResult<String> {
        if let Some(cart_id) = &self.cart_id {
            return Ok(cart_id.clone());
        }

        let cart_id = Uuid::new_v4().simple().to_string();
        // record_for reads self.cart_id, so it must be set before insert
        self.cart_id = Some(cart_id.clone());
        let persisted = match &self.token {
            Some(token) => {
                session_repo::set_cart_id(&state.pool, &token_hash(token), &cart_id).await
            }
            None => {
                let token = new_token();
                let result = session_repo::insert(&state.pool, &self.record_for(&token)).await;
                if result.is_ok() {
                    self.token = Some(token);
                    self.stale = false;
                    self.action = CookieAction::Issue;
                }
                result
            }
        };
        if let Err(e) = persisted {
            self.cart_id = None;
            return Err(e.into());
        }
        tracing::debug!(cart_id = %cart_id, "Cart id minted");
        Ok(cart_id)
    }

    /// Attach `identity` to the session
    ///
    /// The token is rotated on every login; the cart id carries over.
    pub async fn login(&mut self, state: &ServerState, identity: Identity) -> AppResult<()> {
        self.identity = Some(identity);

        let token = new_token();
        session_repo::insert(&state.pool, &self.record_for(&token)).await?;
        if let Some(old) = self.token.replace(token) {
            session_repo::delete(&state.pool, &token_hash(&old)).await?;
        }
        self.stale = false;
        self.action = CookieAction::Issue;
        Ok(())
    }

    /// Drop the whole session, identity and cart id alike
    ///
    /// Guest cart lines stay in the store but are no longer reachable.
    pub async fn logout(&mut self, state: &ServerState) -> AppResult<()> {
        if let Some(token) = self.token.take() {
            session_repo::delete(&state.pool, &token_hash(&token)).await?;
        }
        self.identity = None;
        self.cart_id = None;
        self.stale = false;
        self.action = CookieAction::Clear;
        Ok(())
    }

    /// Response part carrying the `Set-Cookie` header this request needs
    pub fn set_cookie(&self) -> SetSessionCookie {
        let value = match (self.action, &self.token) {
            (CookieAction::Issue, Some(token)) => Some(format!(
                "{SESSION_COOKIE}={token}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax{}",
                self.ttl_secs,
                if self.secure { "; Secure" } else { "" }
            )),
            (CookieAction::Clear, _) => Some(format!(
                "{SESSION_COOKIE}=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax{}",
                if self.secure { "; Secure" } else { "" }
            )),
            _ => None,
        };
        SetSessionCookie(value.and_then(|v| HeaderValue::from_str(&v).ok()))
    }

    fn record_for(&self, token: &str) -> SessionRecord {
        let now = now_millis();
        SessionRecord {
            token_hash: token_hash(token),
            user_id: self.identity.as_ref().map(|i| i.user_id),
            username: self.identity.as_ref().map(|i| i.username.clone()),
            cart_id: self.cart_id.clone(),
            created_at: now,
            expires_at: now + self.ttl_secs * 1000,
        }
    }
}

impl FromRequestParts<ServerState> for SessionContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let mut ctx = SessionContext {
            token: None,
            stale: false,
            action: CookieAction::Keep,
            ttl_secs: state.config.session_ttl_secs,
            secure: state.config.session_cookie_secure,
            identity: None,
            cart_id: None,
        };

        let Some(token) = cookie_token(parts) else {
            return Ok(ctx);
        };

        match session_repo::find_active(&state.pool, &token_hash(&token), now_millis()).await? {
            Some(record) => {
                ctx.identity = match (record.user_id, record.username) {
                    (Some(user_id), Some(username)) => Some(Identity { user_id, username }),
                    _ => None,
                };
                ctx.cart_id = record.cart_id;
                ctx.token = Some(token);
            }
            None => {
                security_log!("INFO", "session_unknown", uri = format!("{:?}", parts.uri));
                ctx.stale = true;
            }
        }
        Ok(ctx)
    }
}

/// Optional `Set-Cookie` header as a response part
#[derive(Debug, Clone)]
pub struct SetSessionCookie(Option<HeaderValue>);

impl IntoResponseParts for SetSessionCookie {
    type Error = std::convert::Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(value) = self.0 {
            res.headers_mut().append(SET_COOKIE, value);
        }
        Ok(res)
    }
}

/// Extract the session token from the `Cookie` header(s)
fn cookie_token(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

fn new_token() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Store key for a cookie token
fn token_hash(token: &str) -> String {
    hex::encode(Sha256::digest(token.as_bytes()))
}
