use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Bid status stored as a lowercase string in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum BidStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// Attachment URLs stored as a JSON array on the bid row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Attachments(pub Vec<String>);

/// SeaORM entity for the `bids` table.
///
/// At most one bid per (project, freelancer) pair exists; the compound unique
/// index in the migration backstops the handler-level duplicate check.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bids")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub project_id: Uuid,
    pub freelancer_id: Uuid,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub timeline_days: Option<i32>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub attachments: Option<Attachments>,
    pub awarded: bool,
    pub status: BidStatus,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::projects::Entity",
        from = "Column::ProjectId",
        to = "super::projects::Column::Id"
    )]
    Project,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FreelancerId",
        to = "super::users::Column::Id"
    )]
    Freelancer,
}

impl Related<super::projects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Project.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Freelancer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body of `POST /api/bid/{project_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceBid {
    pub amount: f64,
    pub description: String,
    pub timeline_days: Option<i32>,
    pub attachments: Option<Vec<String>>,
}

impl PlaceBid {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.amount <= 0.0 {
            return Err(ApiError::Validation("Bid amount must be positive".into()));
        }
        if self.description.trim().is_empty() {
            return Err(ApiError::Validation(
                "Bid description must not be empty".into(),
            ));
        }
        if let Some(days) = self.timeline_days {
            if days <= 0 {
                return Err(ApiError::Validation("Timeline must be positive".into()));
            }
        }
        Ok(())
    }
}

/// Body of `PATCH /api/bid/{bid_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBid {
    pub amount: Option<f64>,
    pub description: Option<String>,
    pub timeline_days: Option<i32>,
    pub attachments: Option<Vec<String>>,
}

impl UpdateBid {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(amount) = self.amount {
            if amount <= 0.0 {
                return Err(ApiError::Validation("Bid amount must be positive".into()));
            }
        }
        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                return Err(ApiError::Validation(
                    "Bid description must not be empty".into(),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bid_body() -> PlaceBid {
        PlaceBid {
            amount: 500.0,
            description: "I can do this in a week".to_string(),
            timeline_days: Some(7),
            attachments: None,
        }
    }

    #[test]
    fn place_bid_accepts_a_valid_body() {
        assert!(bid_body().validate().is_ok());
    }

    #[test]
    fn place_bid_rejects_non_positive_amount() {
        let mut body = bid_body();
        body.amount = 0.0;
        assert!(body.validate().is_err());
        body.amount = -10.0;
        assert!(body.validate().is_err());
    }

    #[test]
    fn place_bid_rejects_blank_description() {
        let mut body = bid_body();
        body.description = "   ".to_string();
        assert!(body.validate().is_err());
    }

    #[test]
    fn update_bid_validates_only_supplied_fields() {
        let empty = UpdateBid {
            amount: None,
            description: None,
            timeline_days: None,
            attachments: None,
        };
        assert!(empty.validate().is_ok());

        let bad_amount = UpdateBid {
            amount: Some(-5.0),
            description: None,
            timeline_days: None,
            attachments: None,
        };
        assert!(bad_amount.validate().is_err());
    }
}
