use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::bids as bid_db;
use crate::db::projects as project_db;
use crate::error::ApiError;
use crate::models::{bids, projects};

/// Fetch a project and require that `user_id` is its poster.
pub async fn verify_project_owner(
    db: &DatabaseConnection,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<projects::Model, ApiError> {
    let project = project_db::get_project_by_id(db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project {project_id} not found")))?;

    if project.posted_by != user_id {
        return Err(ApiError::Forbidden(
            "You do not own this project".to_string(),
        ));
    }

    Ok(project)
}

/// Fetch a project and require that `user_id` is its awarded freelancer.
pub async fn verify_project_awardee(
    db: &DatabaseConnection,
    project_id: Uuid,
    user_id: Uuid,
) -> Result<projects::Model, ApiError> {
    let project = project_db::get_project_by_id(db, project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project {project_id} not found")))?;

    if project.awarded_to != Some(user_id) {
        return Err(ApiError::Forbidden(
            "Only the awarded freelancer can do this".to_string(),
        ));
    }

    Ok(project)
}

/// Fetch a bid and require that `user_id` is the freelancer who placed it.
pub async fn verify_bid_owner(
    db: &DatabaseConnection,
    bid_id: Uuid,
    user_id: Uuid,
) -> Result<bids::Model, ApiError> {
    let bid = bid_db::get_bid_by_id(db, bid_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Bid {bid_id} not found")))?;

    if bid.freelancer_id != user_id {
        return Err(ApiError::Forbidden(
            "You can only modify your own bids".to_string(),
        ));
    }

    Ok(bid)
}
