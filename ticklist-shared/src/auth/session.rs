/// Session tokens and the per-request principal
///
/// A session is a server-issued HS256-signed token bound to a user id,
/// held by the client in an HttpOnly cookie and validated on every
/// request. The server keeps no session state of its own: destroying a
/// session means clearing the cookie, and an expired or tampered token is
/// simply rejected, forcing re-authentication.
///
/// # Example
///
/// ```
/// use ticklist_shared::auth::session::{issue_session, validate_session};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let secret = "a-session-secret-of-at-least-32-bytes";
///
/// let token = issue_session(user_id, secret)?;
/// let claims = validate_session(&token, secret)?;
/// assert_eq!(claims.sub, user_id);
/// # Ok(())
/// # }
/// ```
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "ticklist_session";

/// Issuer claim on every session token
const ISSUER: &str = "ticklist";

/// How long a session stays valid after login
const SESSION_TTL_HOURS: i64 = 24;

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to create token
    #[error("Failed to create session token: {0}")]
    CreateError(String),

    /// Token failed validation (bad signature, tampered, malformed)
    #[error("Invalid session token: {0}")]
    Invalid(String),

    /// Token has expired
    #[error("Session has expired")]
    Expired,
}

/// Claims carried by a session token
///
/// Standard JWT claims only; the subject is the user id the session is
/// bound to. Everything else about the caller is resolved fresh from the
/// store on each request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject: the authenticated user's id
    pub sub: Uuid,

    /// Issuer, always "ticklist"
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Creates claims for `user_id` with the default session lifetime
    pub fn new(user_id: Uuid) -> Self {
        Self::with_lifetime(user_id, Duration::hours(SESSION_TTL_HOURS))
    }

    /// Creates claims with an explicit lifetime
    pub fn with_lifetime(user_id: Uuid, lifetime: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            iss: ISSUER.to_string(),
            iat: now.timestamp(),
            exp: (now + lifetime).timestamp(),
        }
    }

    /// Whether the session has passed its expiry
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() >= self.exp
    }
}

/// The resolved caller identity for one request
///
/// Built once per request by the authentication middleware from the
/// session token plus a store lookup, then passed explicitly into every
/// guarded handler. Immutable; no ambient current-user state exists.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// The authenticated user's id; the owner id for all task operations
    pub id: Uuid,

    /// Display name for rendering
    pub username: String,

    /// Login email
    pub email: String,
}

/// Issues a signed session token for `user_id`
///
/// # Errors
///
/// Returns `SessionError::CreateError` if encoding fails.
pub fn issue_session(user_id: Uuid, secret: &str) -> Result<String, SessionError> {
    let claims = SessionClaims::new(user_id);
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, &claims, &key)
        .map_err(|e| SessionError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a session token and extracts its claims
///
/// Checks the signature, expiry, and issuer. Any failure means the
/// session is invalid and the caller must re-authenticate.
pub fn validate_session(token: &str, secret: &str) -> Result<SessionClaims, SessionError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.validate_exp = true;

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| match e.kind()
    {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        _ => SessionError::Invalid(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
