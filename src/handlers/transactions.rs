use actix_web::{HttpResponse, web};
use sea_orm::DatabaseConnection;

use crate::auth::middleware::AuthenticatedUser;
use crate::db::transactions as transaction_db;
use crate::db::users as user_db;
use crate::error::ApiError;
use crate::models::PaginationQuery;
use crate::models::transactions::{AddFunds, PayFreelancer, WalletResponse};
use crate::models::users::Roles;

/// POST /api/transaction/add-funds — deposit into the caller's own wallet.
pub async fn add_funds(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<AddFunds>,
) -> Result<HttpResponse, ApiError> {
    let input = body.into_inner();
    input.validate()?;

    let (user, transaction) = transaction_db::add_funds(db.get_ref(), user.0.id, input.amount).await?;

    Ok(HttpResponse::Ok().json(WalletResponse {
        wallet_balance: user.wallet_balance,
        transaction,
    }))
}

/// POST /api/transaction/payment — a client pays a freelancer from their wallet.
pub async fn pay_freelancer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<PayFreelancer>,
) -> Result<HttpResponse, ApiError> {
    let client_id = user.0.id;

    if user.0.role != Roles::Client {
        return Err(ApiError::Forbidden(
            "Only clients can pay freelancers".to_string(),
        ));
    }

    let input = body.into_inner();
    input.validate()?;

    if input.freelancer_id == client_id {
        return Err(ApiError::Validation("You cannot pay yourself".to_string()));
    }

    // The recipient must be a freelancer. Existence is re-checked under lock
    // inside the transfer, but the role only needs this one read.
    let recipient = user_db::get_user_by_id(db.get_ref(), input.freelancer_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Freelancer {} not found", input.freelancer_id)))?;

    if recipient.role != Roles::Freelancer {
        return Err(ApiError::Validation(
            "Recipient is not a freelancer".to_string(),
        ));
    }

    let description = input
        .description
        .unwrap_or_else(|| format!("Payment to {}", recipient.username));

    let (client, transaction) = transaction_db::pay_freelancer(
        db.get_ref(),
        client_id,
        input.freelancer_id,
        input.amount,
        description,
    )
    .await?;

    Ok(HttpResponse::Ok().json(WalletResponse {
        wallet_balance: client.wallet_balance,
        transaction,
    }))
}

/// GET /api/transaction/my — the caller's ledger entries, newest first.
pub async fn get_my_transactions(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> Result<HttpResponse, ApiError> {
    let entries = transaction_db::get_transactions_for_user(
        db.get_ref(),
        user.0.id,
        query.page(),
        query.limit(),
    )
    .await?;

    Ok(HttpResponse::Ok().json(entries))
}
