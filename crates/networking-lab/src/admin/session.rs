use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::{AdminConfig, MIN_SESSION_SECRET_LEN};

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "admin_session";
pub const SESSION_MAX_AGE_SECS: i64 = 60 * 60 * 24 * 7;

/// Payload carried inside the signed admin cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub username: String,
    /// Expiry as unix seconds.
    pub exp: i64,
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("ADMIN_SESSION_SECRET must be set and at least 16 characters")]
    WeakSecret,
    #[error("no admin session cookie")]
    MissingCookie,
    #[error("malformed session token")]
    Malformed,
    #[error("session signature mismatch")]
    BadSignature,
    #[error("session expired")]
    Expired,
    #[error("failed to encode session claims: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Issues and verifies `payload.signature` tokens where both halves are
/// unpadded base64url and the signature is HMAC-SHA256 over the encoded payload.
#[derive(Clone)]
pub struct AdminSessionSigner {
    secret: Vec<u8>,
    secure: bool,
}

impl std::fmt::Debug for AdminSessionSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSessionSigner")
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

impl AdminSessionSigner {
    pub fn new(secret: &str, secure: bool) -> Result<Self, SessionError> {
        if secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(SessionError::WeakSecret);
        }
        Ok(Self {
            secret: secret.as_bytes().to_vec(),
            secure,
        })
    }

    pub fn from_config(config: &AdminConfig) -> Result<Self, SessionError> {
        let secret = config
            .session_secret
            .as_deref()
            .ok_or(SessionError::WeakSecret)?;
        Self::new(secret, config.secure_cookie)
    }

    fn signature(&self, encoded: &str) -> Result<String, SessionError> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| SessionError::WeakSecret)?;
        mac.update(encoded.as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }

    pub fn issue(&self, username: &str, now: DateTime<Utc>) -> Result<String, SessionError> {
        let claims = SessionClaims {
            username: username.to_string(),
            exp: now.timestamp() + SESSION_MAX_AGE_SECS,
        };
        let encoded = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims)?);
        let signature = self.signature(&encoded)?;
        Ok(format!("{encoded}.{signature}"))
    }

    pub fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<SessionClaims, SessionError> {
        let (encoded, signature) = token.split_once('.').ok_or(SessionError::Malformed)?;

        let expected = self.signature(encoded)?;
        if expected.len() != signature.len()
            || !bool::from(expected.as_bytes().ct_eq(signature.as_bytes()))
        {
            return Err(SessionError::BadSignature);
        }

        let payload = URL_SAFE_NO_PAD
            .decode(encoded)
            .map_err(|_| SessionError::Malformed)?;
        let claims: SessionClaims =
            serde_json::from_slice(&payload).map_err(|_| SessionError::Malformed)?;

        if claims.exp < now.timestamp() {
            return Err(SessionError::Expired);
        }
        Ok(claims)
    }

    /// Verify the session carried in a raw `Cookie` header.
    pub fn verify_cookie_header(
        &self,
        header: &str,
        now: DateTime<Utc>,
    ) -> Result<SessionClaims, SessionError> {
        let token = cookie_value(header, SESSION_COOKIE).ok_or(SessionError::MissingCookie)?;
        self.verify(token, now)
    }

    /// `Set-Cookie` value for a freshly issued token.
    pub fn session_cookie(&self, token: &str) -> String {
        let mut cookie = format!(
            "{SESSION_COOKIE}={token}; Path=/; Max-Age={SESSION_MAX_AGE_SECS}; HttpOnly; SameSite=Lax"
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// `Set-Cookie` values that expire the session on both the current and the
/// legacy `/admin` path.
pub fn clear_session_cookies() -> [String; 2] {
    ["/", "/admin"].map(|path| {
        format!("{SESSION_COOKIE}=; Path={path}; Max-Age=0; HttpOnly; SameSite=Lax")
    })
}

/// Finds `name=value` among the `;`-separated pairs of a `Cookie` header.
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, value)| *key == name && !value.is_empty())
        .map(|(_, value)| value)
}

/// Admin username/password pair, compared in constant time.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl AdminCredentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Option<Self> {
        match (&config.username, &config.password) {
            (Some(username), Some(password)) => Some(Self::new(username, password)),
            _ => None,
        }
    }

    pub fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username.as_bytes().ct_eq(username.trim().as_bytes());
        let pass_ok = self.password.as_bytes().ct_eq(password.as_bytes());
        bool::from(user_ok & pass_ok)
    }
}
