use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::errors::AuthError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

/// Sign an HS256 token for `user_id` that expires after `ttl`.
pub fn issue_token(user_id: i32, secret: &str, ttl: Duration) -> Result<String, AuthError> {
    if user_id <= 0 {
        return Err(AuthError::TokenError("token subject is missing".into()));
    }
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        nbf: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AuthError::TokenError(e.to_string()))
}

/// Verify signature and expiry; returns the user id carried in `sub`.
pub fn validate_token(token: &str, secret: &str) -> Result<i32, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    validation.leeway = 0;

    let data = decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Unauthorized("token has expired".into()),
            _ => AuthError::Unauthorized("invalid token".into()),
        })?;
    data.claims
        .sub
        .parse::<i32>()
        .map_err(|_| AuthError::Unauthorized("invalid token subject".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_token_validates_to_same_user() {
        let token = issue_token(42, SECRET, Duration::minutes(5)).unwrap();
        assert_eq!(validate_token(&token, SECRET).unwrap(), 42);
    }

    #[test]
    fn wrong_secret_is_unauthorized() {
        let token = issue_token(1, SECRET, Duration::minutes(5)).unwrap();
        assert!(matches!(validate_token(&token, "other"), Err(AuthError::Unauthorized(_))));
    }

    #[test]
    fn expired_token_is_unauthorized() {
        let token = issue_token(1, SECRET, Duration::minutes(-5)).unwrap();
        match validate_token(&token, SECRET) {
            Err(AuthError::Unauthorized(msg)) => assert_eq!(msg, "token has expired"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn malformed_token_is_unauthorized() {
        assert!(matches!(validate_token("abc.def", SECRET), Err(AuthError::Unauthorized(_))));
    }

    #[test]
    fn missing_subject_cannot_be_issued() {
        assert!(matches!(issue_token(0, SECRET, Duration::minutes(5)), Err(AuthError::TokenError(_))));
    }

    #[test]
    fn non_numeric_subject_is_rejected() {
        let claims = Claims { sub: "bob".into(), iat: 0, nbf: 0, exp: (Utc::now() + Duration::minutes(5)).timestamp() };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();
        assert!(matches!(validate_token(&token, SECRET), Err(AuthError::Unauthorized(_))));
    }
}
