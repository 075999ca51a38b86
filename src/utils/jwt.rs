use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Token type carried in the `token_type` claim.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Bearer token accepted by protected routes
    Access,
}

/// JWT claims. `sub` holds the caller's user id.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub token_type: TokenType,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiration (unix seconds)
    pub exp: i64,
}

impl Claims {
    /// Parses `sub` as the user id.
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::Unauthorized {
            message: "Token subject is not a valid user id".to_string(),
        })
    }
}

/// Verifies signature and expiry, then checks the token type when one is expected.
pub fn validate_token(
    token: &str,
    secret: &str,
    expected_type: Option<TokenType>,
) -> AppResult<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        let message = match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => "Token has expired".to_string(),
            jsonwebtoken::errors::ErrorKind::InvalidToken => "Invalid token".to_string(),
            jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                "Invalid token signature".to_string()
            }
            _ => format!("Token validation failed: {}", e),
        };
        AppError::Unauthorized { message }
    })?;

    if let Some(expected) = expected_type
        && claims.token_type != expected
    {
        return Err(AppError::Unauthorized {
            message: format!(
                "Invalid token type: expected {:?}, got {:?}",
                expected, claims.token_type
            ),
        });
    }

    Ok(claims)
}

pub fn validate_access_token(token: &str, secret: &str) -> AppResult<Claims> {
    validate_token(token, secret, Some(TokenType::Access))
}

/// Token signing for tests.
#[cfg(test)]
mod signing {
    use jsonwebtoken::{EncodingKey, Header, encode};
    use uuid::Uuid;

    use super::{Claims, TokenType};
    use crate::error::{AppError, AppResult};

    impl Claims {
        pub fn new(user_id: Uuid, token_type: TokenType, expiration_hours: i64) -> Self {
            let iat = jiff::Timestamp::now().as_second();
            Self {
                sub: user_id.to_string(),
                token_type,
                iat,
                exp: iat.saturating_add(expiration_hours.saturating_mul(3600)),
            }
        }
    }

    /// Signs an HS256 token for `user_id`.
    fn generate_token(
        user_id: Uuid,
        token_type: TokenType,
        secret: &str,
        expiration_hours: i64,
    ) -> AppResult<String> {
        let claims = Claims::new(user_id, token_type, expiration_hours);

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal {
            source: anyhow::anyhow!("Failed to generate JWT token: {}", e),
        })
    }

    pub fn generate_access_token(
        user_id: Uuid,
        secret: &str,
        expiration_hours: i64,
    ) -> AppResult<String> {
        generate_token(user_id, TokenType::Access, secret, expiration_hours)
    }
}

#[cfg(test)]
pub use signing::generate_access_token;
