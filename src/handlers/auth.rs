use actix_web::cookie::{Cookie, SameSite, time::Duration};
use actix_web::{HttpResponse, web};
use sea_orm::{DatabaseConnection, SqlErr};

use crate::auth::middleware::{AUTH_COOKIE, AuthenticatedUser, JwtSecret};
use crate::auth::{jwt, password};
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::users::{LoginUser, RegisterUser, UserResponse};

/// POST /api/auth/register — create an account with a client or freelancer role.
pub async fn register(
    db: web::Data<DatabaseConnection>,
    body: web::Json<RegisterUser>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.validate()?;

    let password_hash = password::hash_password(&input.password)?;

    match user_db::insert_user(db.get_ref(), input, password_hash).await {
        Ok(user) => Ok(HttpResponse::Created().json(UserResponse::from(user))),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(ApiError::Conflict(
                "An account with that email or username already exists".to_string(),
            ))
        }
        Err(e) => Err(ApiError::Database(e)),
    }
}

/// POST /api/auth/login — verify credentials and set the session cookie.
pub async fn login(
    db: web::Data<DatabaseConnection>,
    secret: web::Data<JwtSecret>,
    body: web::Json<LoginUser>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();

    // A missing account and a wrong password produce the same error, so the
    // endpoint cannot be used to probe which emails are registered.
    let user = user_db::get_user_by_email(db.get_ref(), &input.email)
        .await?
        .filter(|u| password::verify_password(&input.password, &u.password_hash))
        .ok_or_else(|| ApiError::Unauthenticated("Invalid email or password".to_string()))?;

    let token = jwt::create_token(user.id, user.role, &secret.0)
        .map_err(|e| ApiError::Internal(format!("failed to mint session token: {e}")))?;

    let cookie = Cookie::build(AUTH_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(Duration::days(1))
        .finish();

    Ok(HttpResponse::Ok()
        .cookie(cookie)
        .json(UserResponse::from(user)))
}

/// POST /api/auth/logout — clear the session cookie.
pub async fn logout() -> Result<HttpResponse, ApiError> {
    let mut cookie = Cookie::build(AUTH_COOKIE, "")
        .path("/")
        .http_only(true)
        .finish();
    cookie.make_removal();

    Ok(HttpResponse::Ok().cookie(cookie).json(serde_json::json!({
        "message": "Logged out",
    })))
}

/// GET /api/auth/me — return the currently authenticated user's profile.
pub async fn me(user: AuthenticatedUser) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(UserResponse::from(user.0)))
}
