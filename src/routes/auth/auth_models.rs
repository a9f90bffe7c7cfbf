use serde::{Deserialize, Serialize};

// Registration request and response
#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

// Login request
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Shared by register and login: the bearer token plus the id the client
// caches for ownership checks in the UI.
#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user_id: u64,
}

#[derive(Serialize)]
pub struct LogoutResponse {
    pub message: String,
}
