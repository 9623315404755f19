use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::token::Claims;
use crate::error::AppError;

/// Extracts the authenticated account's id from request extensions.
///
/// Intended for routes behind `AuthMiddleware`, which validates the bearer
/// token and inserts the decoded `Claims`. If the claims are missing (the
/// middleware did not run), this extractor fails with `Unauthorized`.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedAccount(pub Uuid);

impl FromRequest for AuthenticatedAccount {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) => ready(Ok(AuthenticatedAccount(claims.sub))),
            None => {
                let err = AppError::Unauthorized("missing token".to_string());
                ready(Err(err.into()))
            }
        }
    }
}
