//! Manage session tokens.

use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    get_current_timestamp,
};
use serde::{Deserialize, Serialize};

use crate::account::Account;
use crate::error::{Result, ServerError};

/// Seconds before an issued token expires.
pub const EXPIRATION_TIME: u64 = 3600; // 1 hour.

/// Pieces of information asserted on a session token.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Claims {
    /// Account identifier.
    pub sub: String,
    /// Display name chosen at registration.
    pub username: String,
    /// Email used as login key.
    pub email: String,
    /// Identifies the time at which the token was issued.
    pub iat: u64,
    /// Identifies the expiration time on or after which the token must not
    /// be accepted for processing.
    pub exp: u64,
}

/// Manage session tokens.
#[derive(Clone)]
pub struct TokenManager {
    algorithm: Algorithm,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenManager {
    /// Create a new [`TokenManager`] signing with a shared secret.
    pub fn new(secret: &str) -> Self {
        Self {
            algorithm: Algorithm::HS256,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Create a new token embedding the account's identity.
    pub fn create(&self, account: &Account) -> Result<String> {
        let time = get_current_timestamp();
        let header = Header::new(self.algorithm);
        let claims = Claims {
            sub: account.id.to_string(),
            username: account.username.clone(),
            email: account.email.clone(),
            iat: time,
            exp: time + EXPIRATION_TIME,
        };

        Ok(encode(&header, &claims, &self.encoding_key)?)
    }

    /// Decode and check a token.
    ///
    /// A token is valid iff its signature verifies against the configured
    /// secret and it has not expired. No clock leeway is granted.
    pub fn decode(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| ServerError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "secret-for-tests";

    fn account() -> Account {
        Account {
            id: 7,
            username: "alice".into(),
            email: "a@x.com".into(),
            password: String::default(),
        }
    }

    #[test]
    fn test_fresh_token_accepted() {
        let manager = TokenManager::new(SECRET);
        let token = manager.create(&account()).unwrap();

        let claims = manager.decode(&token).unwrap();
        assert_eq!(claims.sub, "7");
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.exp, claims.iat + EXPIRATION_TIME);
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = TokenManager::new(SECRET);

        let time = get_current_timestamp();
        let claims = Claims {
            sub: "7".into(),
            username: "alice".into(),
            email: "a@x.com".into(),
            iat: time - 2 * EXPIRATION_TIME,
            exp: time - EXPIRATION_TIME,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(manager.decode(&token).is_err());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = TokenManager::new(SECRET);
        let token = manager.create(&account()).unwrap();

        let other = TokenManager::new("another-secret");
        assert!(other.decode(&token).is_err());
    }
}
