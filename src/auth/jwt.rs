use std::time::Duration;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};

use crate::{config::JwtConfig, error::ApiError, state::AppState};

/// JWT payload: numeric user id, email and unix-seconds expiry.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub id: i64,
    pub email: String,
    pub exp: usize,
}

/// HS256 signing material plus token lifetime, built once from config.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::from_secs((ttl_hours.max(0) as u64) * 3600),
        }
    }

    pub fn sign(&self, user_id: i64, email: &str) -> anyhow::Result<String> {
        let exp = OffsetDateTime::now_utc() + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            id: user_id,
            email: email.to_string(),
            exp: exp.unix_timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id, "jwt signed");
        Ok(token)
    }

    /// Decode and validate. HS256 only; expiry and claim shape are checked
    /// by the decoder.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = data.claims.id, "jwt verified");
        Ok(data.claims)
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig { secret, ttl_hours } = &state.config.jwt;
        Self::new(secret, *ttl_hours)
    }
}

/// Authenticated caller, extracted from the Authorization header.
/// Handlers that take this reject unauthenticated requests with 401.
pub struct AuthUser {
    pub id: i64,
    pub email: String,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = JwtKeys::from_ref(state);

        let header = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::Auth("token de acesso é obrigatório".into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Auth("formato de token inválido".into()))?;

        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "token rejected");
            match e.kind() {
                ErrorKind::ExpiredSignature => ApiError::Auth("token expirado ou inválido".into()),
                _ => ApiError::Auth("token inválido".into()),
            }
        })?;

        Ok(AuthUser {
            id: claims.id,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys() -> JwtKeys {
        JwtKeys::new("test-secret", 24)
    }

    #[test]
    fn sign_and_verify_roundtrip() {
        let keys = make_keys();
        let token = keys.sign(42, "maria@example.com").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        assert_eq!(claims.id, 42);
        assert_eq!(claims.email, "maria@example.com");
    }

    #[test]
    fn expiry_is_ttl_from_now() {
        let keys = make_keys();
        let token = keys.sign(1, "a@b.co").expect("sign");
        let claims = keys.verify(&token).expect("verify");
        let expected = OffsetDateTime::now_utc().unix_timestamp() + 24 * 3600;
        let drift = (claims.exp as i64 - expected).abs();
        assert!(drift <= 5, "exp drifted {drift}s from 24h");
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys();
        let claims = Claims {
            id: 1,
            email: "a@b.co".into(),
            exp: (OffsetDateTime::now_utc().unix_timestamp() - 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");
        let err = keys.verify(&token).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ExpiredSignature));
    }

    #[test]
    fn verify_rejects_other_key() {
        let keys = make_keys();
        let other = JwtKeys::new("another-secret", 24);
        let token = other.sign(1, "a@b.co").expect("sign");
        assert!(keys.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_garbage() {
        let keys = make_keys();
        assert!(keys.verify("not.a.token").is_err());
        assert!(keys.verify("").is_err());
    }

    #[test]
    fn verify_rejects_token_missing_claims() {
        #[derive(Serialize)]
        struct Sparse {
            exp: usize,
        }
        let sparse = Sparse {
            exp: (OffsetDateTime::now_utc().unix_timestamp() + 3600) as usize,
        };
        let token = encode(
            &Header::default(),
            &sparse,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .expect("encode");
        assert!(make_keys().verify(&token).is_err());
    }

    #[tokio::test]
    async fn keys_from_app_state_config() {
        let state = AppState::fake();
        let keys = JwtKeys::from_ref(&state);
        let token = keys.sign(9, "x@y.co").expect("sign");
        assert_eq!(keys.verify(&token).expect("verify").id, 9);
    }
}
