use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, instrument};

use super::errors::AuthError;

/// Decoded token payload: whatever the caller identified as, plus `iat`/`exp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn email(&self) -> Option<&str> {
        self.0.get("email").and_then(Value::as_str)
    }

    pub fn issued_at(&self) -> Option<i64> {
        self.0.get("iat").and_then(Value::as_i64)
    }

    pub fn expires_at(&self) -> Option<i64> {
        self.0.get("exp").and_then(Value::as_i64)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

/// HS256 token issuer/verifier bound to one server secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenService {
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        // Audience is caller data here, not something we check.
        validation.validate_aud = false;
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs: i64::try_from(ttl_secs).unwrap_or(i64::MAX),
        }
    }

    /// Sign `identity` as-is, stamping `iat = now` and `exp = iat + ttl`.
    ///
    /// # Examples
    /// ```
    /// use service::auth::TokenService;
    /// let svc = TokenService::new("secret", 3600);
    /// let token = svc.issue(serde_json::json!({"email": "a@b.com"})).unwrap();
    /// let claims = svc.verify(&token).unwrap();
    /// assert_eq!(claims.email(), Some("a@b.com"));
    /// ```
    pub fn issue(&self, identity: Value) -> Result<String, AuthError> {
        self.issue_at(identity, Utc::now().timestamp())
    }

    #[instrument(skip(self, identity))]
    pub fn issue_at(&self, identity: Value, now: i64) -> Result<String, AuthError> {
        let Value::Object(mut claims) = identity else {
            return Err(AuthError::InvalidClaims("token payload must be a JSON object".into()));
        };
        claims.insert("iat".into(), Value::from(now));
        claims.insert("exp".into(), Value::from(now.saturating_add(self.ttl_secs)));
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::TokenError(e.to_string()))?;
        debug!(claims = claims.len(), "token issued");
        Ok(token)
    }

    /// Check signature and expiry; every failure collapses to `Forbidden`.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                debug!(error = %e, "token rejected");
                AuthError::Forbidden
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn issued_token_round_trips_with_one_hour_expiry() {
        let svc = TokenService::new("secret", 3600);
        let token = svc.issue(json!({"email": "a@b.com"})).unwrap();
        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.email(), Some("a@b.com"));
        let iat = claims.issued_at().unwrap();
        assert_eq!(claims.expires_at().unwrap(), iat + 3600);
        assert_eq!(claims.into_inner().len(), 3);
    }

    #[test]
    fn extra_claims_are_embedded_verbatim() {
        let svc = TokenService::new("secret", 3600);
        let token = svc.issue(json!({"email": "a@b.com", "role": ["admin"], "n": 7})).unwrap();
        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.get("role"), Some(&json!(["admin"])));
        assert_eq!(claims.get("n"), Some(&json!(7)));
    }

    #[test]
    fn audience_claim_does_not_block_verification() {
        let svc = TokenService::new("secret", 3600);
        let token = svc.issue(json!({"email": "a@b.com", "aud": "car-doctor-client"})).unwrap();
        let claims = svc.verify(&token).unwrap();
        assert_eq!(claims.get("aud"), Some(&json!("car-doctor-client")));
    }

    #[test]
    fn wrong_secret_is_forbidden() {
        let issuer = TokenService::new("secret", 3600);
        let other = TokenService::new("other-secret", 3600);
        let token = issuer.issue(json!({"email": "a@b.com"})).unwrap();
        assert_eq!(other.verify(&token), Err(AuthError::Forbidden));
    }

    #[test]
    fn expired_token_is_forbidden() {
        let svc = TokenService::new("secret", 3600);
        let two_hours_ago = Utc::now().timestamp() - 7200;
        let token = svc.issue_at(json!({"email": "a@b.com"}), two_hours_ago).unwrap();
        assert_eq!(svc.verify(&token), Err(AuthError::Forbidden));
    }

    #[test]
    fn garbage_is_forbidden() {
        let svc = TokenService::new("secret", 3600);
        assert_eq!(svc.verify("not.a.jwt"), Err(AuthError::Forbidden));
        assert_eq!(svc.verify(""), Err(AuthError::Forbidden));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        let svc = TokenService::new("secret", 3600);
        assert!(matches!(svc.issue(json!("a@b.com")), Err(AuthError::InvalidClaims(_))));
    }
}
