use actix_web::FromRequest;
use actix_web::{Error, HttpRequest, dev::Payload, web};
use sea_orm::DatabaseConnection;
use std::future::Future;
use std::pin::Pin;

use crate::auth::jwt;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users;

/// Name of the HTTP-only cookie carrying the session token.
pub const AUTH_COOKIE: &str = "auth_token";

/// The authenticated caller, resolved once per request and passed explicitly
/// into every handler that needs it. Wraps the caller's full user row, so
/// handlers read `user.0.id` and `user.0.role` without touching the request.
pub struct AuthenticatedUser(pub users::Model);

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();

        Box::pin(async move {
            // 1. Pull the token from the session cookie, falling back to an
            //    Authorization: Bearer header for non-browser clients.
            let token = match req.cookie(AUTH_COOKIE) {
                Some(cookie) => cookie.value().to_string(),
                None => req
                    .headers()
                    .get("Authorization")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.strip_prefix("Bearer "))
                    .map(str::to_string)
                    .ok_or_else(|| {
                        ApiError::Unauthenticated("Missing session cookie or token".into())
                    })?,
            };

            // 2. Get the signing secret from app data.
            let secret = req.app_data::<web::Data<JwtSecret>>().ok_or_else(|| {
                ApiError::Internal("JWT secret not configured".into())
            })?;

            // 3. Validate the token.
            let claims = jwt::validate_token(&token, &secret.0)
                .map_err(|e| ApiError::Unauthenticated(format!("Invalid token: {e}")))?;

            let user_id = claims.user_id().map_err(ApiError::Unauthenticated)?;

            // 4. Get the database connection.
            let db = req
                .app_data::<web::Data<DatabaseConnection>>()
                .ok_or_else(|| ApiError::Internal("Database not configured".into()))?;

            // 5. Load the user row. Role comes from the database, not the
            //    token, so role changes take effect immediately.
            let user = user_db::get_user_by_id(db.get_ref(), user_id)
                .await
                .map_err(ApiError::Database)?
                .ok_or_else(|| {
                    ApiError::Unauthenticated("Token refers to a deleted account".into())
                })?;

            Ok(AuthenticatedUser(user))
        })
    }
}

/// Wrapper type to store the JWT secret in Actix app data.
#[derive(Clone)]
pub struct JwtSecret(pub String);
