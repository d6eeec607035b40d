use actix_web::{HttpResponse, web};
use sea_orm::{DatabaseConnection, SqlErr};
use uuid::Uuid;

use crate::auth::authorization::{verify_bid_owner, verify_project_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::bids as bid_db;
use crate::db::projects as project_db;
use crate::error::ApiError;
use crate::models::PaginationQuery;
use crate::models::bids::{BidStatus, PlaceBid, UpdateBid};
use crate::models::projects::ProjectStatus;
use crate::models::users::Roles;

/// POST /api/bid/{project_id} — a freelancer places a bid on an open project.
///
/// One bid per (project, freelancer) pair: checked here, and backstopped by
/// the compound unique index for the case where two requests race past the
/// check simultaneously.
pub async fn place_bid(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<PlaceBid>,
) -> Result<HttpResponse, ApiError> {
    let project_id = path.into_inner();
    let freelancer_id = user.0.id;

    if user.0.role != Roles::Freelancer {
        return Err(ApiError::Forbidden(
            "Only freelancers can place bids".to_string(),
        ));
    }

    let input = body.into_inner();
    input.validate()?;

    // 1. The project must exist and still be open for bids.
    let project = project_db::get_project_by_id(db.get_ref(), project_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project {project_id} not found")))?;

    if project.posted_by == freelancer_id {
        return Err(ApiError::Validation(
            "You cannot bid on your own project".to_string(),
        ));
    }

    if project.status != ProjectStatus::Open {
        return Err(ApiError::Conflict(
            "This project is not open for bids".to_string(),
        ));
    }

    // 2. One bid per freelancer per project.
    if bid_db::get_bid_by_project_and_freelancer(db.get_ref(), project_id, freelancer_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "You have already placed a bid on this project".to_string(),
        ));
    }

    // 3. Create the bid.
    match bid_db::insert_bid(db.get_ref(), project_id, freelancer_id, input).await {
        Ok(bid) => Ok(HttpResponse::Created().json(bid)),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(ApiError::Conflict(
                "You have already placed a bid on this project".to_string(),
            ))
        }
        Err(e) => Err(ApiError::Database(e)),
    }
}

/// GET /api/bid/project/{project_id} — the project owner lists the bids on
/// their project, paginated.
pub async fn get_bids_by_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ApiError> {
    let project_id = path.into_inner();

    verify_project_owner(db.get_ref(), project_id, user.0.id).await?;

    let bids =
        bid_db::get_bids_by_project(db.get_ref(), project_id, query.page(), query.limit()).await?;
    Ok(HttpResponse::Ok().json(bids))
}

/// GET /api/bid/my — a freelancer lists their own bids, paginated.
pub async fn get_my_bids(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ApiError> {
    let bids =
        bid_db::get_bids_by_freelancer(db.get_ref(), user.0.id, query.page(), query.limit())
            .await?;
    Ok(HttpResponse::Ok().json(bids))
}

/// PATCH /api/bid/{bid_id} — the owning freelancer revises a pending bid.
pub async fn update_bid(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateBid>,
) -> Result<HttpResponse, ApiError> {
    let bid_id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let bid = verify_bid_owner(db.get_ref(), bid_id, user.0.id).await?;

    if bid.status != BidStatus::Pending {
        return Err(ApiError::Conflict(
            "Only pending bids can be updated".to_string(),
        ));
    }

    let updated = bid_db::update_bid(db.get_ref(), bid_id, input).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/bid/{bid_id} — the owning freelancer withdraws a bid that has
/// not been awarded or accepted.
pub async fn delete_bid(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let bid_id = path.into_inner();

    let bid = verify_bid_owner(db.get_ref(), bid_id, user.0.id).await?;

    if bid.awarded || bid.status == BidStatus::Accepted {
        return Err(ApiError::Conflict(
            "Cannot withdraw an awarded bid".to_string(),
        ));
    }

    let result = bid_db::delete_bid(db.get_ref(), bid_id).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(format!("Bid {bid_id} not found")));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Bid {bid_id} withdrawn"),
    })))
}

/// POST /api/bid/award/{bid_id} — the project owner awards a bid.
///
/// Accepts the bid, rejects every sibling bid, and moves the project to
/// in-progress, all in one database transaction (see `db::bids::award_bid`).
pub async fn award_bid(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let bid_id = path.into_inner();

    let (bid, project) = bid_db::award_bid(db.get_ref(), bid_id, user.0.id).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "bid": bid,
        "project": project,
    })))
}
