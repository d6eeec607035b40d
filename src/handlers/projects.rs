use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{verify_project_awardee, verify_project_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::projects as project_db;
use crate::error::ApiError;
use crate::models::projects::{
    CreateProject, ProjectListQuery, StatusEvent, SubmitDeliverable, UpdateProject,
};
use crate::models::users::Roles;

/// POST /api/project — a client posts a new project.
pub async fn create_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateProject>,
) -> Result<HttpResponse, ApiError> {
    if user.0.role != Roles::Client {
        return Err(ApiError::Forbidden(
            "Only clients can post projects".to_string(),
        ));
    }

    let input = body.into_inner();
    input.validate(chrono::Utc::now())?;

    let project = project_db::insert_project(db.get_ref(), input, user.0.id).await?;
    Ok(HttpResponse::Created().json(project))
}

/// GET /api/project — browse projects with optional status/category filters.
/// Query params: ?page=1&limit=20&status=open&category=design
pub async fn get_projects(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<ProjectListQuery>,
) -> Result<HttpResponse, ApiError> {
    let projects = project_db::list_projects(db.get_ref(), &query).await?;
    Ok(HttpResponse::Ok().json(projects))
}

/// GET /api/project/{id} — get a single project.
pub async fn get_project(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let project = project_db::get_project_by_id(db.get_ref(), id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Project {id} not found")))?;

    Ok(HttpResponse::Ok().json(project))
}

/// PATCH /api/project/{id} — the poster edits project fields.
pub async fn update_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateProject>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    verify_project_owner(db.get_ref(), id, user.0.id).await?;

    let updated = project_db::update_project(db.get_ref(), id, input).await?;
    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /api/project/{id} — the poster (or an admin) removes a project.
pub async fn delete_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if user.0.role != Roles::Admin {
        verify_project_owner(db.get_ref(), id, user.0.id).await?;
    }

    let result = project_db::delete_project(db.get_ref(), id).await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound(format!("Project {id} not found")));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Project {id} deleted"),
    })))
}

/// POST /api/project/{id}/close — the poster (or an admin) closes an open
/// project. Illegal once the project has been awarded.
pub async fn close_project(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    if user.0.role != Roles::Admin {
        verify_project_owner(db.get_ref(), id, user.0.id).await?;
    }

    let project = project_db::apply_status_event(db.get_ref(), id, StatusEvent::Close).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// POST /api/project/{id}/mark-complete — the awarded freelancer marks the
/// work as done, moving the project to pending-review.
pub async fn mark_complete(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    verify_project_awardee(db.get_ref(), id, user.0.id).await?;

    let project = project_db::apply_status_event(db.get_ref(), id, StatusEvent::SubmitWork).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// POST /api/project/{id}/confirm — the poster accepts the submitted work,
/// completing the project.
pub async fn confirm_completion(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();

    verify_project_owner(db.get_ref(), id, user.0.id).await?;

    let project =
        project_db::apply_status_event(db.get_ref(), id, StatusEvent::ConfirmCompletion).await?;
    Ok(HttpResponse::Ok().json(project))
}

/// PATCH /api/project/{id}/deliverable — the awarded freelancer attaches
/// their deliverable, forcing the project into pending-review.
pub async fn submit_deliverable(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<SubmitDeliverable>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let input = body.into_inner();
    input.validate()?;

    let project = project_db::submit_deliverable(db.get_ref(), id, user.0.id, input).await?;
    Ok(HttpResponse::Ok().json(project))
}
