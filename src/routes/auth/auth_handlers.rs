use actix_web::{web, HttpRequest, HttpResponse};
use bcrypt::{hash, verify, DEFAULT_COST};
use log::{error, info};
use uuid::Uuid;

use super::auth_models::{AuthResponse, LoginRequest, LogoutResponse, RegisterRequest};
use crate::auth;
use crate::error::{ApiError, FieldErrors};
use crate::models::user::NewUser;
use crate::state::AppState;

const MIN_PASSWORD_LEN: usize = 8;

// Register a new user and issue a bearer token right away.
pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ApiError> {
    let mut errors = FieldErrors::new();

    let name = match req.name.as_deref().map(str::trim) {
        Some(n) if !n.is_empty() => Some(n.to_string()),
        _ => {
            errors
                .entry("name".into())
                .or_default()
                .push("The name field is required.".into());
            None
        }
    };
    let email = match req.email.as_deref().map(str::trim) {
        Some(e) if !e.is_empty() && e.contains('@') => Some(e.to_string()),
        _ => {
            errors
                .entry("email".into())
                .or_default()
                .push("The email field is required and must be a valid address.".into());
            None
        }
    };
    let password = match req.password.as_deref() {
        Some(p) if p.len() >= MIN_PASSWORD_LEN => Some(p.to_string()),
        _ => {
            errors.entry("password".into()).or_default().push(format!(
                "The password must be at least {} characters.",
                MIN_PASSWORD_LEN
            ));
            None
        }
    };

    let (name, email, password) = match (name, email, password) {
        (Some(n), Some(e), Some(p)) if errors.is_empty() => (n, e, p),
        _ => return Err(ApiError::Validation(errors)),
    };

    info!("Received request to register user: {}", email);

    if state.users.find_by_email(&email).await?.is_some() {
        info!("Registration rejected, email already taken: {}", email);
        return Err(ApiError::Conflict("Email is already registered".into()));
    }

    let password_hash = hash(&password, DEFAULT_COST).map_err(|e| {
        error!("Failed to hash password: {}", e);
        anyhow::anyhow!("failed to hash password: {}", e)
    })?;

    let user = state
        .users
        .insert(NewUser {
            name,
            email,
            password_hash,
        })
        .await?;

    let token = Uuid::new_v4().to_string();
    state.tokens.insert(&token, user.id).await?;

    info!("User {} registered successfully", user.email);
    Ok(HttpResponse::Created().json(AuthResponse {
        token,
        user_id: user.id,
    }))
}

// Login: verify the bcrypt hash and issue a fresh bearer token.
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    info!("Received login request for: {}", req.email);

    let user = match state.users.find_by_email(&req.email).await? {
        Some(user) => user,
        None => {
            info!("Login failed, unknown email: {}", req.email);
            return Err(ApiError::Unauthorized("Invalid credentials".into()));
        }
    };

    let valid = verify(&req.password, &user.password_hash).map_err(|e| {
        error!("Error when checking password for {}: {}", req.email, e);
        anyhow::anyhow!("password verification failed: {}", e)
    })?;
    if !valid {
        info!("Login failed, invalid password for: {}", req.email);
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let token = Uuid::new_v4().to_string();
    state.tokens.insert(&token, user.id).await?;

    info!("User {} logged in successfully", user.email);
    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user_id: user.id,
    }))
}

// Logout: revoke the presented bearer token.
pub async fn logout(
    state: web::Data<AppState>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let token = auth::bearer_token(&req)
        .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

    if !state.tokens.revoke(token).await? {
        info!("Logout rejected, unknown bearer token");
        return Err(ApiError::Unauthorized("Invalid bearer token".into()));
    }

    info!("Logout successful");
    Ok(HttpResponse::Ok().json(LogoutResponse {
        message: "Logout successful".into(),
    }))
}
