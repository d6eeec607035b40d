use sea_orm::prelude::Expr;
use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::bids::{self, Attachments, BidStatus, PlaceBid, UpdateBid};
use crate::models::projects::{self, StatusEvent};

/// Insert a new bid (defaults to Pending status, not awarded).
///
/// The compound unique index on (project_id, freelancer_id) rejects a
/// concurrent duplicate that slipped past the handler's check; callers map
/// that unique violation to a duplicate-bid conflict.
pub async fn insert_bid(
    db: &DatabaseConnection,
    project_id: Uuid,
    freelancer_id: Uuid,
    input: PlaceBid,
) -> Result<bids::Model, DbErr> {
    let new_bid = bids::ActiveModel {
        id: Set(Uuid::new_v4()),
        project_id: Set(project_id),
        freelancer_id: Set(freelancer_id),
        amount: Set(input.amount),
        description: Set(input.description),
        timeline_days: Set(input.timeline_days),
        attachments: Set(input.attachments.map(Attachments)),
        awarded: Set(false),
        status: Set(BidStatus::Pending),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_bid.insert(db).await
}

/// Fetch a single bid by ID.
pub async fn get_bid_by_id<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<bids::Model>, DbErr> {
    bids::Entity::find_by_id(id).one(conn).await
}

/// Fetch the bid a freelancer placed on a project, if any.
pub async fn get_bid_by_project_and_freelancer(
    db: &DatabaseConnection,
    project_id: Uuid,
    freelancer_id: Uuid,
) -> Result<Option<bids::Model>, DbErr> {
    bids::Entity::find()
        .filter(bids::Column::ProjectId.eq(project_id))
        .filter(bids::Column::FreelancerId.eq(freelancer_id))
        .one(db)
        .await
}

/// Fetch all bids on a project, newest first, with pagination.
pub async fn get_bids_by_project(
    db: &DatabaseConnection,
    project_id: Uuid,
    page: u64,
    limit: u64,
) -> Result<Vec<bids::Model>, DbErr> {
    bids::Entity::find()
        .filter(bids::Column::ProjectId.eq(project_id))
        .order_by_desc(bids::Column::CreatedAt)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Fetch all bids a freelancer has placed, newest first, with pagination.
pub async fn get_bids_by_freelancer(
    db: &DatabaseConnection,
    freelancer_id: Uuid,
    page: u64,
    limit: u64,
) -> Result<Vec<bids::Model>, DbErr> {
    bids::Entity::find()
        .filter(bids::Column::FreelancerId.eq(freelancer_id))
        .order_by_desc(bids::Column::CreatedAt)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Update a bid's freelancer-editable fields.
pub async fn update_bid(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateBid,
) -> Result<bids::Model, DbErr> {
    let bid = bids::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Bid not found".to_string()))?;

    let mut active: bids::ActiveModel = bid.into();

    if let Some(amount) = input.amount {
        active.amount = Set(amount);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(timeline_days) = input.timeline_days {
        active.timeline_days = Set(Some(timeline_days));
    }
    if let Some(attachments) = input.attachments {
        active.attachments = Set(Some(Attachments(attachments)));
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a bid by ID.
pub async fn delete_bid(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    bids::Entity::delete_by_id(id).exec(db).await
}

/// Award a bid: accept it, reject every sibling bid on the same project, and
/// move the project into the awarded state.
///
/// The whole transition runs in one database transaction with the bid and
/// project rows locked, so two concurrent awards on the same project cannot
/// both succeed and no reader ever observes a partially applied award.
pub async fn award_bid(
    db: &DatabaseConnection,
    bid_id: Uuid,
    caller_id: Uuid,
) -> Result<(bids::Model, projects::Model), ApiError> {
    db.transaction::<_, (bids::Model, projects::Model), ApiError>(move |txn| {
        Box::pin(async move {
            // 1. The bid must exist.
            let bid = bids::Entity::find_by_id(bid_id)
                .lock_exclusive()
                .one(txn)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("Bid {bid_id} not found")))?;

            // 2. The parent project must exist.
            let project = projects::Entity::find_by_id(bid.project_id)
                .lock_exclusive()
                .one(txn)
                .await?
                .ok_or_else(|| {
                    ApiError::NotFound(format!("Project {} not found", bid.project_id))
                })?;

            // 3. Only the poster may award.
            if project.posted_by != caller_id {
                return Err(ApiError::Forbidden(
                    "Only the project owner can award bids".to_string(),
                ));
            }

            // 4. The bid must not already be awarded.
            if bid.awarded {
                return Err(ApiError::Conflict(
                    "This bid has already been awarded".to_string(),
                ));
            }

            // 5. The project must accept the Award event (only `open` does).
            let next_status = project.status.apply(StatusEvent::Award)?;

            let project_id = project.id;
            let freelancer_id = bid.freelancer_id;
            let now = chrono::Utc::now();

            // Accept the winning bid.
            let mut winning: bids::ActiveModel = bid.into();
            winning.awarded = Set(true);
            winning.status = Set(BidStatus::Accepted);
            winning.updated_at = Set(Some(now));
            let bid = winning.update(txn).await?;

            // Move the project into the awarded state.
            let mut awarded: projects::ActiveModel = project.into();
            awarded.status = Set(next_status);
            awarded.awarded_to = Set(Some(freelancer_id));
            awarded.updated_at = Set(Some(now));
            let project = awarded.update(txn).await?;

            // Reject every sibling bid in one bulk update.
            bids::Entity::update_many()
                .col_expr(
                    bids::Column::Status,
                    Expr::value(BidStatus::Rejected.to_value()),
                )
                .col_expr(bids::Column::Awarded, Expr::value(false))
                .col_expr(bids::Column::UpdatedAt, Expr::value(Some(now)))
                .filter(bids::Column::ProjectId.eq(project_id))
                .filter(bids::Column::Id.ne(bid.id))
                .exec(txn)
                .await?;

            Ok((bid, project))
        })
    })
    .await
    .map_err(ApiError::from)
}
