use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::CookieJar;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::routes::AppState;

/// Request extension carrying the authenticated user.
#[derive(Clone, Debug)]
pub struct Auth {
    pub user_id: String,
    pub name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: u64,
}

/// Validates the `auth_token` cookie and injects [`Auth`].
///
/// Export endpoints are download URLs, not pages, so failures answer with a
/// plain 401 instead of a login redirect. Runs ahead of every handler on the
/// protected router, so an unauthenticated request never reaches a plan
/// fetch.
pub async fn auth_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match jar.get("auth_token") {
        Some(cookie) => cookie.value(),
        None => {
            tracing::debug!("missing auth_token cookie");
            return AppError::Unauthorized.into_response();
        }
    };

    let claims = match decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &Validation::default(),
    ) {
        Ok(data) => data.claims,
        Err(err) => {
            tracing::debug!(err = %err, "invalid auth token");
            return AppError::Unauthorized.into_response();
        }
    };

    // The token may outlive the account; check the read model.
    let user = sqlx::query_as::<_, (String, Option<String>)>(
        "SELECT id, name FROM users WHERE id = ?1",
    )
    .bind(&claims.sub)
    .fetch_optional(&state.pool)
    .await;

    match user {
        Ok(Some((user_id, name))) => {
            req.extensions_mut().insert(Auth { user_id, name });
            next.run(req).await
        }
        Ok(None) => {
            tracing::debug!(user = claims.sub, "token for unknown user");
            AppError::Unauthorized.into_response()
        }
        Err(err) => {
            tracing::error!(err = %err, "user lookup failed during auth");
            AppError::Unauthorized.into_response()
        }
    }
}

/// Mint an `auth_token` value. Used by the seed command and tests.
pub fn create_jwt(
    user_id: &str,
    secret: &str,
    lifetime_seconds: u64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let claims = Claims {
        sub: user_id.to_string(),
        exp: now + lifetime_seconds,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
