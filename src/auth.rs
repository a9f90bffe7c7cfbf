use actix_web::HttpRequest;
use log::info;

use crate::error::ApiError;
use crate::state::AppState;

// The identity resolved from a bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthedUser {
    pub user_id: u64,
}

/// Reads the `Authorization: Bearer <token>` header and resolves it
/// through the token store. Every authenticated handler calls this
/// before doing anything else.
pub async fn require_user(req: &HttpRequest, state: &AppState) -> Result<AuthedUser, ApiError> {
    let token = bearer_token(req)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    match state.tokens.lookup(token).await? {
        Some(user_id) => Ok(AuthedUser { user_id }),
        None => {
            info!("Rejected request with unknown bearer token");
            Err(ApiError::Unauthorized("Invalid bearer token".to_string()))
        }
    }
}

pub fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(actix_web::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}
