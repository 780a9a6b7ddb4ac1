//! Signed bearer tokens.
//!
//! A token is `base64url(claims JSON) "." base64url(HMAC-SHA256 tag)`, where the
//! tag covers the encoded claims. Claims carry the manager id, email, and an
//! expiry in unix seconds.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use super::AuthError;

type HmacSha256 = Hmac<Sha256>;

pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    pub exp: u64,
}

#[derive(Clone)]
pub struct TokenIssuer {
    secret: Vec<u8>,
    ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: impl AsRef<[u8]>, ttl: Duration) -> Result<Self, AuthError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(AuthError::InvalidSecret);
        }
        Ok(TokenIssuer {
            secret: secret.to_vec(),
            ttl,
        })
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, id: i64, email: &str) -> Result<String, AuthError> {
        self.issue_at(id, email, unix_now())
    }

    pub fn issue_at(&self, id: i64, email: &str, now: u64) -> Result<String, AuthError> {
        let claims = Claims {
            id,
            email: email.to_string(),
            exp: now + self.ttl.as_secs(),
        };
        let payload = serde_json::to_vec(&claims).map_err(|_| AuthError::InvalidToken("claims"))?;
        let payload = URL_SAFE_NO_PAD.encode(payload);
        let tag = self.mac(payload.as_bytes())?.finalize().into_bytes();
        Ok(format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(tag)))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        self.verify_at(token, unix_now())
    }

    pub fn verify_at(&self, token: &str, now: u64) -> Result<Claims, AuthError> {
        let (payload, tag) = token
            .split_once('.')
            .ok_or(AuthError::InvalidToken("malformed"))?;
        let tag = URL_SAFE_NO_PAD
            .decode(tag)
            .map_err(|_| AuthError::InvalidToken("malformed"))?;

        self.mac(payload.as_bytes())?
            .verify_slice(&tag)
            .map_err(|_| AuthError::InvalidToken("bad signature"))?;

        let payload = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| AuthError::InvalidToken("malformed"))?;
        let claims: Claims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::InvalidToken("malformed"))?;

        if claims.exp <= now {
            return Err(AuthError::InvalidToken("expired"));
        }
        Ok(claims)
    }

    fn mac(&self, data: &[u8]) -> Result<HmacSha256, AuthError> {
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| AuthError::InvalidSecret)?;
        mac.update(data);
        Ok(mac)
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
