use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// The `Roles` enum maps to a Postgres TEXT column stored as lowercase strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Roles {
    #[sea_orm(string_value = "client")]
    Client,
    #[sea_orm(string_value = "freelancer")]
    Freelancer,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// Rating scores (1–5) stored as a JSON array on the user row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Ratings(pub Vec<f32>);

impl Ratings {
    pub fn average(&self) -> Option<f32> {
        if self.0.is_empty() {
            return None;
        }
        Some(self.0.iter().sum::<f32>() / self.0.len() as f32)
    }
}

/// SeaORM entity for the `users` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub username: String,
    pub display_name: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub role: Roles,
    #[sea_orm(column_type = "Double")]
    pub wallet_balance: f64,
    #[sea_orm(column_type = "JsonBinary")]
    pub ratings: Ratings,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::projects::Entity")]
    Projects,
    #[sea_orm(has_many = "super::bids::Entity")]
    Bids,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Projects.def()
    }
}

impl Related<super::bids::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bids.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs (not stored in DB, used for request bodies) ──

/// Body of `POST /api/auth/register`.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterUser {
    pub email: String,
    pub username: String,
    pub password: String,
    pub role: Roles,
    pub display_name: Option<String>,
}

impl RegisterUser {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(ApiError::Validation("A valid email is required".into()));
        }
        if self.username.trim().is_empty() {
            return Err(ApiError::Validation("Username must not be empty".into()));
        }
        if self.password.len() < 8 {
            return Err(ApiError::Validation(
                "Password must be at least 8 characters".into(),
            ));
        }
        if self.role == Roles::Admin {
            return Err(ApiError::Validation(
                "Cannot self-register as an admin".into(),
            ));
        }
        Ok(())
    }
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    pub email: String,
    pub password: String,
}

/// Used for profile updates (`PUT /api/users/{id}`).
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    pub email: Option<String>,
    pub username: Option<String>,
    pub display_name: Option<String>,
}

/// Body of `POST /api/users/{id}/rate`.
#[derive(Debug, Clone, Deserialize)]
pub struct RateUser {
    pub rating: f32,
}

impl RateUser {
    pub fn validate(&self) -> Result<(), ApiError> {
        if !(1.0..=5.0).contains(&self.rating) {
            return Err(ApiError::Validation("Rating must be between 1 and 5".into()));
        }
        Ok(())
    }
}

/// A safe user representation for API responses (never leaks the password hash).
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub display_name: Option<String>,
    pub role: Roles,
    pub wallet_balance: f64,
    pub ratings: Ratings,
    pub average_rating: Option<f32>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

impl From<Model> for UserResponse {
    fn from(m: Model) -> Self {
        let average_rating = m.ratings.average();
        Self {
            id: m.id,
            email: m.email,
            username: m.username,
            display_name: m.display_name,
            role: m.role,
            wallet_balance: m.wallet_balance,
            ratings: m.ratings,
            average_rating,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegisterUser {
        RegisterUser {
            email: "alice@example.com".to_string(),
            username: "alice".to_string(),
            password: "correct-horse".to_string(),
            role: Roles::Client,
            display_name: None,
        }
    }

    #[test]
    fn registration_accepts_a_valid_body() {
        assert!(registration().validate().is_ok());
    }

    #[test]
    fn registration_rejects_bad_email_short_password_and_admin_role() {
        let mut r = registration();
        r.email = "not-an-email".to_string();
        assert!(r.validate().is_err());

        let mut r = registration();
        r.password = "short".to_string();
        assert!(r.validate().is_err());

        let mut r = registration();
        r.role = Roles::Admin;
        assert!(r.validate().is_err());
    }

    #[test]
    fn rating_bounds_are_enforced() {
        assert!(RateUser { rating: 1.0 }.validate().is_ok());
        assert!(RateUser { rating: 5.0 }.validate().is_ok());
        assert!(RateUser { rating: 0.5 }.validate().is_err());
        assert!(RateUser { rating: 5.5 }.validate().is_err());
    }

    #[test]
    fn average_rating_handles_empty_and_filled_lists() {
        assert_eq!(Ratings::default().average(), None);
        assert_eq!(Ratings(vec![4.0, 5.0]).average(), Some(4.5));
    }
}
