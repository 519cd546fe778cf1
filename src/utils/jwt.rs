//! JWT verification for the management surface.
//!
//! Tokens are issued by the identity provider, not by this service; only
//! decoding and validation live here. The subject claim carries the user
//! id that scopes every management query.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::AuthConfig;
use crate::error::{AppError, AppResult};

/// Claims of a verified access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user id, UUID)
    pub sub: String,
    /// Audience
    pub aud: String,
    /// Expiration time (timestamp)
    pub exp: i64,
    /// User email, when the provider includes it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Claims {
    pub fn user_id(&self) -> AppResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| AppError::Unauthorized {
            message: "Token subject is not a valid user id".to_string(),
        })
    }
}

/// Validates and decodes an access token.
///
/// Checks signature (HS256), expiration (with the configured leeway) and
/// audience.
pub fn validate_token(token: &str, auth: &AuthConfig) -> AppResult<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_audience(&[&auth.audience]);
    validation.leeway = auth.leeway_seconds;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(auth.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::Unauthorized {
            message: "Token has expired".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidToken => AppError::Unauthorized {
            message: "Invalid token".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidSignature => AppError::Unauthorized {
            message: "Invalid token signature".to_string(),
        },
        jsonwebtoken::errors::ErrorKind::InvalidAudience => AppError::Unauthorized {
            message: "Token audience mismatch".to_string(),
        },
        _ => AppError::Unauthorized {
            message: format!("Token validation failed: {}", e),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const TEST_SECRET: &str = "test_secret_key_for_jwt_testing0";

    fn test_auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: TEST_SECRET.to_string(),
            audience: "authenticated".to_string(),
            leeway_seconds: 0,
        }
    }

    fn issue(sub: &str, aud: &str, exp_offset_secs: i64) -> String {
        let claims = Claims {
            sub: sub.to_string(),
            aud: aud.to_string(),
            exp: chrono::Utc::now().timestamp() + exp_offset_secs,
            email: None,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(TEST_SECRET.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn round_trips_a_valid_token() {
        let user_id = Uuid::new_v4();
        let token = issue(&user_id.to_string(), "authenticated", 3600);

        let claims = validate_token(&token, &test_auth_config()).unwrap();
        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn rejects_expired_tokens() {
        let token = issue(&Uuid::new_v4().to_string(), "authenticated", -3600);

        let error = validate_token(&token, &test_auth_config()).unwrap_err();
        match error {
            AppError::Unauthorized { message } => assert!(message.contains("expired")),
            other => panic!("Expected Unauthorized, got {:?}", other),
        }
    }

    #[test]
    fn leeway_tolerates_recent_expiry() {
        let token = issue(&Uuid::new_v4().to_string(), "authenticated", -30);

        let mut auth = test_auth_config();
        auth.leeway_seconds = 120;
        assert!(validate_token(&token, &auth).is_ok());
    }

    #[test]
    fn rejects_wrong_audience() {
        let token = issue(&Uuid::new_v4().to_string(), "anon", 3600);
        assert!(validate_token(&token, &test_auth_config()).is_err());
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = issue(&Uuid::new_v4().to_string(), "authenticated", 3600);

        let mut auth = test_auth_config();
        auth.jwt_secret = "another_secret_key_for_jwt_tests".to_string();
        assert!(validate_token(&token, &auth).is_err());
    }

    #[test]
    fn rejects_non_uuid_subject() {
        let token = issue("not-a-uuid", "authenticated", 3600);
        let claims = validate_token(&token, &test_auth_config()).unwrap();
        assert!(claims.user_id().is_err());
    }
}
