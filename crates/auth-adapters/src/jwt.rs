//! HS256 implementation of the `TokenService` port.
//!
//! Verification is purely cryptographic: no session store, no
//! revocation. The signing secret is injected at construction so no
//! ambient global state is involved.

use anyhow::Context;
use chrono::{Duration, Utc};
use domains::{Caller, TokenService};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default token lifetime: one day.
pub const DEFAULT_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Subject: the user id.
    sub: Uuid,
    name: String,
    /// Expiration, Unix timestamp. Checked on decode.
    exp: i64,
}

pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn with_default_ttl(secret: &[u8]) -> Self {
        Self::new(secret, Duration::hours(DEFAULT_TTL_HOURS))
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, caller: &Caller) -> anyhow::Result<String> {
        let claims = Claims {
            sub: caller.id,
            name: caller.name.clone(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).context("failed to sign token")
    }

    fn verify(&self, token: &str) -> anyhow::Result<Caller> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::default())
            .context("invalid or expired token")?;
        Ok(Caller {
            id: data.claims.sub,
            name: data.claims.name,
        })
    }
}
