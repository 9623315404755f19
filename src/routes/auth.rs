use crate::{
    auth::{hash_password, verify_password, AuthResponse, LoginRequest, RegisterRequest, TokenKeys},
    error::AppError,
    models::NewAccount,
    state::AppState,
};
use actix_web::{post, web, HttpResponse, Responder};
use validator::Validate;

/// Register a new account
///
/// Validates the input, hashes the password, and persists the account.
/// Responds with the account's public fields; the hash never leaves the
/// store. A duplicate email (any case variant) is a 409.
#[post("/register")]
pub async fn register(
    state: web::Data<AppState>,
    register_data: web::Json<RegisterRequest>,
) -> Result<impl Responder, AppError> {
    register_data.validate()?;
    let register_data = register_data.into_inner();

    let password_hash = hash_password(&register_data.password)?;

    // Uniqueness is enforced by the store insert itself, so two concurrent
    // registrations of the same email cannot both succeed.
    let account = state
        .accounts
        .insert(NewAccount {
            name: register_data.name,
            email: register_data.email,
            password_hash,
        })
        .await?;

    Ok(HttpResponse::Created().json(account))
}

/// Login
///
/// Authenticates an account and mints a session token. Unknown email and
/// wrong password produce the same generic 401 so callers cannot probe
/// which emails are registered.
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    keys: web::Data<TokenKeys>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let stored = state
        .accounts
        .find_by_email(&login_data.email.to_lowercase())
        .await?;

    match stored {
        Some(stored) => {
            if verify_password(&login_data.password, &stored.password_hash)? {
                let token = keys.generate(stored.account.id)?;
                Ok(HttpResponse::Ok().json(AuthResponse { token }))
            } else {
                Err(AppError::Unauthorized("invalid credentials".into()))
            }
        }
        None => Err(AppError::Unauthorized("invalid credentials".into())),
    }
}
