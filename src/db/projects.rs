use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::projects::{
    self, Categories, CreateProject, Deliverable, ProjectListQuery, ProjectStatus, StatusEvent,
    SubmitDeliverable, UpdateProject,
};

/// Insert a new project. Status always starts at `open`.
pub async fn insert_project(
    db: &DatabaseConnection,
    input: CreateProject,
    posted_by: Uuid,
) -> Result<projects::Model, DbErr> {
    let new_project = projects::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        category: Set(input.category.unwrap_or(Categories::Other)),
        budget: Set(input.budget),
        deadline: Set(input.deadline),
        status: Set(ProjectStatus::Open),
        posted_by: Set(posted_by),
        awarded_to: Set(None),
        deliverable: Set(None),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };

    new_project.insert(db).await
}

/// Fetch a single project by ID.
pub async fn get_project_by_id<C: ConnectionTrait>(
    conn: &C,
    id: Uuid,
) -> Result<Option<projects::Model>, DbErr> {
    projects::Entity::find_by_id(id).one(conn).await
}

/// Browse projects, newest first, with optional status/category filters.
pub async fn list_projects(
    db: &DatabaseConnection,
    query: &ProjectListQuery,
) -> Result<Vec<projects::Model>, DbErr> {
    let mut select = projects::Entity::find();

    if let Some(status) = query.status {
        select = select.filter(projects::Column::Status.eq(status));
    }
    if let Some(category) = query.category.clone() {
        select = select.filter(projects::Column::Category.eq(category));
    }

    select
        .order_by_desc(projects::Column::CreatedAt)
        .paginate(db, query.limit())
        .fetch_page(query.page().saturating_sub(1))
        .await
}

/// Fetch all projects posted by a client, newest first, with pagination.
pub async fn get_projects_by_poster(
    db: &DatabaseConnection,
    posted_by: Uuid,
    page: u64,
    limit: u64,
) -> Result<Vec<projects::Model>, DbErr> {
    projects::Entity::find()
        .filter(projects::Column::PostedBy.eq(posted_by))
        .order_by_desc(projects::Column::CreatedAt)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}

/// Update a project's client-editable fields.
pub async fn update_project(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateProject,
) -> Result<projects::Model, DbErr> {
    let project = projects::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Project not found".to_string()))?;

    let mut active: projects::ActiveModel = project.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(category) = input.category {
        active.category = Set(category);
    }
    if let Some(budget) = input.budget {
        active.budget = Set(budget);
    }
    if let Some(deadline) = input.deadline {
        active.deadline = Set(deadline);
    }
    active.updated_at = Set(Some(chrono::Utc::now()));

    active.update(db).await
}

/// Delete a project by ID.
pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    projects::Entity::delete_by_id(id).exec(db).await
}

/// Apply a status event to a project through the state machine.
///
/// Runs in a transaction with the project row locked so concurrent
/// transitions on the same project serialize; the state machine then rejects
/// whichever one arrives second if the first made it illegal.
pub async fn apply_status_event(
    db: &DatabaseConnection,
    project_id: Uuid,
    event: StatusEvent,
) -> Result<projects::Model, ApiError> {
    db.transaction::<_, projects::Model, ApiError>(move |txn| {
        Box::pin(async move {
            let project = projects::Entity::find_by_id(project_id)
                .lock_exclusive()
                .one(txn)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("Project {project_id} not found")))?;

            let next_status = project.status.apply(event)?;

            let mut active: projects::ActiveModel = project.into();
            active.status = Set(next_status);
            active.updated_at = Set(Some(chrono::Utc::now()));

            Ok(active.update(txn).await?)
        })
    })
    .await
    .map_err(ApiError::from)
}

/// Attach a deliverable and move the project to pending-review.
///
/// The awardee check runs again inside the transaction: the award could be
/// revoked between the handler's check and the write otherwise.
pub async fn submit_deliverable(
    db: &DatabaseConnection,
    project_id: Uuid,
    caller_id: Uuid,
    input: SubmitDeliverable,
) -> Result<projects::Model, ApiError> {
    db.transaction::<_, projects::Model, ApiError>(move |txn| {
        Box::pin(async move {
            let project = projects::Entity::find_by_id(project_id)
                .lock_exclusive()
                .one(txn)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("Project {project_id} not found")))?;

            if project.awarded_to != Some(caller_id) {
                return Err(ApiError::Forbidden(
                    "Only the awarded freelancer can submit a deliverable".to_string(),
                ));
            }

            let next_status = project.status.apply(StatusEvent::SubmitWork)?;

            let mut active: projects::ActiveModel = project.into();
            active.status = Set(next_status);
            active.deliverable = Set(Some(Deliverable {
                description: input.description,
                files: input.files,
                notes: input.notes,
                submitted_at: chrono::Utc::now(),
            }));
            active.updated_at = Set(Some(chrono::Utc::now()));

            Ok(active.update(txn).await?)
        })
    })
    .await
    .map_err(ApiError::from)
}
