use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use chrono::Duration;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::user::{Actor, Role};
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
    pub role: String,
    #[serde(default)]
    pub is_superuser: bool,
}

impl Claims {
    pub fn to_actor(&self) -> Result<Actor> {
        let user_id = Uuid::parse_str(&self.sub)
            .map_err(|_| Error::Unauthorized("subject is not a user id".to_string()))?;
        let role: Role = self.role.parse()?;
        Ok(Actor {
            user_id,
            role,
            is_superuser: self.is_superuser,
        })
    }
}

fn unauthorized(code: &str) -> Response {
    (StatusCode::UNAUTHORIZED, Json(json!({ "error": code }))).into_response()
}

/// Decodes the bearer token and attaches the caller as an [`Actor`] extension.
pub async fn require_actor(State(state): State<AppState>, mut req: Request, next: Next) -> Response {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return unauthorized("missing_authorization");
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return unauthorized("bad_authorization");
    };
    let Some(token) = auth_str.strip_prefix("Bearer ") else {
        return unauthorized("unsupported_scheme");
    };

    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let claims = match decode::<Claims>(
        token,
        &DecodingKey::from_secret(state.jwt_secret.as_bytes()),
        &validation,
    ) {
        Ok(data) => data.claims,
        Err(err) => {
            tracing::debug!(error = %err, "rejected bearer token");
            return unauthorized("invalid_token");
        }
    };

    match claims.to_actor() {
        Ok(actor) => {
            req.extensions_mut().insert(actor);
            next.run(req).await
        }
        Err(_) => unauthorized("invalid_claims"),
    }
}

/// Mints an HS256 token for `actor`, valid for `ttl`.
pub fn issue_token(secret: &str, actor: &Actor, ttl: Duration) -> Result<String> {
    let exp = (chrono::Utc::now() + ttl).timestamp().max(0) as usize;
    let claims = Claims {
        sub: actor.user_id.to_string(),
        exp,
        role: actor.role.to_string(),
        is_superuser: actor.is_superuser,
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| Error::Internal(format!("failed to sign token: {}", err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips_to_the_same_actor() {
        let actor = Actor::superuser(Uuid::new_v4(), Role::Moderator);
        let token = issue_token("secret", &actor, Duration::minutes(5)).unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret"),
            &Validation::new(Algorithm::HS256),
        )
        .unwrap();
        assert_eq!(data.claims.to_actor().unwrap(), actor);
    }

    #[test]
    fn unknown_role_is_unauthorized() {
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            exp: 0,
            role: "admin".into(),
            is_superuser: false,
        };
        assert!(matches!(claims.to_actor(), Err(Error::Unauthorized(_))));
    }
}
