use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Opaque bearer token issued at login/register, revoked at logout.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AuthToken {
    pub token: String,
    pub user_id: u64,
}
