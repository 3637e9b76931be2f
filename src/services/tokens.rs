//! Stateless bearer token issuance and verification (HS256).

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Malformed,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the account id the token was issued to.
    pub sub: i32,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiry: Duration,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: &str, expiry_hours: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            expiry: Duration::hours(expiry_hours),
        }
    }

    pub fn issue(&self, subject: i32) -> Result<String> {
        self.issue_at(subject, Utc::now())
    }

    pub fn issue_at(&self, subject: i32, now: DateTime<Utc>) -> Result<String> {
        let claims = Claims {
            sub: subject,
            iat: now.timestamp(),
            exp: (now + self.expiry).timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).context("Failed to sign token")
    }

    /// Returns the subject id on success. Expiry is checked with zero
    /// leeway so a token is invalid the second it lapses.
    pub fn verify(&self, token: &str) -> Result<i32, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Ok(data.claims.sub),
            Err(err) => match err.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                _ => Err(TokenError::Malformed),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new("unit-test-secret", 1)
    }

    #[test]
    fn issue_then_verify_returns_subject() {
        let issuer = issuer();
        let token = issuer.issue(42).unwrap();

        assert_eq!(issuer.verify(&token), Ok(42));
    }

    #[test]
    fn token_near_expiry_still_verifies() {
        let issuer = issuer();
        let token = issuer
            .issue_at(7, Utc::now() - Duration::minutes(59))
            .unwrap();

        assert_eq!(issuer.verify(&token), Ok(7));
    }

    #[test]
    fn token_past_expiry_is_rejected() {
        let issuer = issuer();
        let token = issuer
            .issue_at(7, Utc::now() - Duration::minutes(61))
            .unwrap();

        assert_eq!(issuer.verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn tampered_token_is_malformed() {
        let issuer = issuer();
        let mut token = issuer.issue(1).unwrap();
        token.push('x');

        assert_eq!(issuer.verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn token_signed_with_other_secret_is_malformed() {
        let other = TokenIssuer::new("different-secret", 1);
        let token = other.issue(1).unwrap();

        assert_eq!(issuer().verify(&token), Err(TokenError::Malformed));
    }

    #[test]
    fn garbage_is_malformed() {
        assert_eq!(
            issuer().verify("not.a.token"),
            Err(TokenError::Malformed)
        );
    }
}
