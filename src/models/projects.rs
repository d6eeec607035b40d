use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::ApiError;

/// Project lifecycle states, stored as lowercase strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "kebab-case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ProjectStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "in-progress")]
    InProgress,
    #[sea_orm(string_value = "pending-review")]
    PendingReview,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Events that may move a project between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// A bid on the project was awarded.
    Award,
    /// The awarded freelancer submitted work (deliverable or mark-complete).
    SubmitWork,
    /// The client confirmed the submitted work.
    ConfirmCompletion,
    /// The poster (or an admin) closed the project.
    Close,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot {event:?} a {from:?} project")]
pub struct IllegalTransition {
    pub from: ProjectStatus,
    pub event: StatusEvent,
}

impl From<IllegalTransition> for ApiError {
    fn from(t: IllegalTransition) -> Self {
        let verb = match t.event {
            StatusEvent::Award => "award a bid on",
            StatusEvent::SubmitWork => "submit work for",
            StatusEvent::ConfirmCompletion => "confirm completion of",
            StatusEvent::Close => "close",
        };
        let state = match t.from {
            ProjectStatus::Open => "open",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::PendingReview => "pending-review",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
        };
        ApiError::Conflict(format!("Cannot {verb} a project that is {state}"))
    }
}

impl ProjectStatus {
    /// The single transition function. Every status write in the codebase
    /// goes through here; anything not in this table is rejected.
    pub fn apply(self, event: StatusEvent) -> Result<ProjectStatus, IllegalTransition> {
        use ProjectStatus::*;
        use StatusEvent::*;

        match (self, event) {
            (Open, Award) => Ok(InProgress),
            (Open, Close) => Ok(Cancelled),
            (InProgress, SubmitWork) => Ok(PendingReview),
            (PendingReview, ConfirmCompletion) => Ok(Completed),
            (from, event) => Err(IllegalTransition { from, event }),
        }
    }

    /// States in which the project must have an awarded freelancer.
    pub fn requires_awardee(self) -> bool {
        matches!(
            self,
            ProjectStatus::InProgress | ProjectStatus::PendingReview | ProjectStatus::Completed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "snake_case")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum Categories {
    #[sea_orm(string_value = "web_development")]
    WebDevelopment,
    #[sea_orm(string_value = "mobile_development")]
    MobileDevelopment,
    #[sea_orm(string_value = "data_science")]
    DataScience,
    #[sea_orm(string_value = "design")]
    Design,
    #[sea_orm(string_value = "video_editing")]
    VideoEditing,
    #[sea_orm(string_value = "content_writing")]
    ContentWriting,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Work submitted by the awarded freelancer, stored as JSON on the project row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Deliverable {
    pub description: String,
    pub files: Vec<String>,
    pub notes: Option<String>,
    pub submitted_at: DateTimeUtc,
}

/// SeaORM entity for the `projects` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub category: Categories,
    #[sea_orm(column_type = "Double")]
    pub budget: f64,
    pub deadline: DateTimeUtc,
    pub status: ProjectStatus,
    pub posted_by: Uuid,
    pub awarded_to: Option<Uuid>,
    #[sea_orm(column_type = "JsonBinary", nullable)]
    pub deliverable: Option<Deliverable>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bids::Entity")]
    Bids,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::PostedBy",
        to = "super::users::Column::Id"
    )]
    Poster,
}

impl Related<super::bids::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bids.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Poster.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub title: String,
    pub description: String,
    pub category: Option<Categories>,
    pub budget: f64,
    pub deadline: DateTimeUtc,
}

impl CreateProject {
    pub fn validate(&self, now: DateTime<Utc>) -> Result<(), ApiError> {
        if self.title.trim().is_empty() {
            return Err(ApiError::Validation("Title must not be empty".into()));
        }
        if self.description.trim().is_empty() {
            return Err(ApiError::Validation("Description must not be empty".into()));
        }
        if self.budget < 0.0 {
            return Err(ApiError::Validation("Budget must not be negative".into()));
        }
        if self.deadline <= now {
            return Err(ApiError::Validation("Deadline must be in the future".into()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Categories>,
    pub budget: Option<f64>,
    pub deadline: Option<DateTimeUtc>,
}

impl UpdateProject {
    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(ApiError::Validation("Title must not be empty".into()));
            }
        }
        if let Some(budget) = self.budget {
            if budget < 0.0 {
                return Err(ApiError::Validation("Budget must not be negative".into()));
            }
        }
        Ok(())
    }
}

/// Body of `PATCH /api/project/{id}/deliverable`.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitDeliverable {
    pub description: String,
    #[serde(default)]
    pub files: Vec<String>,
    pub notes: Option<String>,
}

impl SubmitDeliverable {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.description.trim().is_empty() {
            return Err(ApiError::Validation(
                "Deliverable description must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectListQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<ProjectStatus>,
    pub category: Option<Categories>,
}

impl ProjectListQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).min(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn legal_transitions_follow_the_lifecycle() {
        use ProjectStatus::*;
        use StatusEvent::*;

        assert_eq!(Open.apply(Award), Ok(InProgress));
        assert_eq!(Open.apply(Close), Ok(Cancelled));
        assert_eq!(InProgress.apply(SubmitWork), Ok(PendingReview));
        assert_eq!(PendingReview.apply(ConfirmCompletion), Ok(Completed));
    }

    #[test]
    fn open_cannot_jump_straight_to_completed() {
        assert!(ProjectStatus::Open
            .apply(StatusEvent::ConfirmCompletion)
            .is_err());
        assert!(ProjectStatus::Open.apply(StatusEvent::SubmitWork).is_err());
    }

    #[test]
    fn terminal_states_reject_every_event() {
        use StatusEvent::*;
        for status in [ProjectStatus::Completed, ProjectStatus::Cancelled] {
            for event in [Award, SubmitWork, ConfirmCompletion, Close] {
                assert!(status.apply(event).is_err(), "{status:?} accepted {event:?}");
            }
        }
    }

    #[test]
    fn in_progress_cannot_be_closed_or_re_awarded() {
        assert!(ProjectStatus::InProgress.apply(StatusEvent::Close).is_err());
        assert!(ProjectStatus::InProgress.apply(StatusEvent::Award).is_err());
    }

    #[test]
    fn awardee_requirement_matches_the_invariant() {
        assert!(!ProjectStatus::Open.requires_awardee());
        assert!(!ProjectStatus::Cancelled.requires_awardee());
        assert!(ProjectStatus::InProgress.requires_awardee());
        assert!(ProjectStatus::PendingReview.requires_awardee());
        assert!(ProjectStatus::Completed.requires_awardee());
    }

    fn create_body(deadline: DateTimeUtc) -> CreateProject {
        CreateProject {
            title: "Landing page".to_string(),
            description: "Build a landing page".to_string(),
            category: Some(Categories::WebDevelopment),
            budget: 1000.0,
            deadline,
        }
    }

    #[test]
    fn create_project_requires_a_future_deadline() {
        let now = Utc::now();
        assert!(create_body(now + Duration::days(1)).validate(now).is_ok());
        assert!(create_body(now - Duration::days(1)).validate(now).is_err());
        assert!(create_body(now).validate(now).is_err());
    }

    #[test]
    fn create_project_rejects_negative_budget_and_empty_title() {
        let now = Utc::now();
        let mut body = create_body(now + Duration::days(1));
        body.budget = -1.0;
        assert!(body.validate(now).is_err());

        let mut body = create_body(now + Duration::days(1));
        body.title = "  ".to_string();
        assert!(body.validate(now).is_err());
    }
}
