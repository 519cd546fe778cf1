//! JWT authentication middleware.
//!
//! Validates bearer tokens on the management surface and exposes the
//! caller's identity as an `AuthUser` request extension. The trigger and
//! health endpoints are mounted outside this middleware.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::jwt::{validate_token, Claims};

/// Authenticated caller identity, extracted in handlers with
/// `Extension<AuthUser>`. `user_id` scopes every row-level query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl AuthUser {
    fn from_claims(claims: Claims) -> Result<Self, AppError> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email,
        })
    }
}

/// JWT authentication middleware.
///
/// Expects `Authorization: Bearer <token>`; returns 401 when the header is
/// missing, malformed, or the token fails validation.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized {
            message: "Missing authorization header".to_string(),
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid authorization header format. Expected: Bearer <token>".to_string(),
        })?;

    let claims = validate_token(token, &state.auth)?;
    let auth_user = AuthUser::from_claims(claims)?;
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_user_from_claims_parses_subject() {
        let user_id = Uuid::new_v4();
        let claims = Claims {
            sub: user_id.to_string(),
            aud: "authenticated".to_string(),
            exp: 9999999999,
            email: Some("maria@example.com".to_string()),
        };

        let auth_user = AuthUser::from_claims(claims).unwrap();
        assert_eq!(auth_user.user_id, user_id);
        assert_eq!(auth_user.email.as_deref(), Some("maria@example.com"));
    }

    #[test]
    fn auth_user_rejects_non_uuid_subject() {
        let claims = Claims {
            sub: "42".to_string(),
            aud: "authenticated".to_string(),
            exp: 9999999999,
            email: None,
        };
        assert!(AuthUser::from_claims(claims).is_err());
    }
}
