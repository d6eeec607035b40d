use sea_orm::*;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::transactions::{self, TransactionKind};
use crate::models::users;

/// Deposit funds into a user's own wallet and append a `deposit` ledger
/// entry, as one transaction. Deposits record the depositor as both parties.
pub async fn add_funds(
    db: &DatabaseConnection,
    user_id: Uuid,
    amount: f64,
) -> Result<(users::Model, transactions::Model), ApiError> {
    db.transaction::<_, (users::Model, transactions::Model), ApiError>(move |txn| {
        Box::pin(async move {
            let user = users::Entity::find_by_id(user_id)
                .lock_exclusive()
                .one(txn)
                .await?
                .ok_or_else(|| ApiError::NotFound(format!("User {user_id} not found")))?;

            let new_balance = user.wallet_balance + amount;
            let mut active: users::ActiveModel = user.into();
            active.wallet_balance = Set(new_balance);
            active.updated_at = Set(Some(chrono::Utc::now()));
            let user = active.update(txn).await?;

            let entry = transactions::ActiveModel {
                id: Set(Uuid::new_v4()),
                client_id: Set(user_id),
                freelancer_id: Set(user_id),
                amount: Set(amount),
                kind: Set(TransactionKind::Deposit),
                description: Set("Wallet deposit".to_string()),
                created_at: Set(chrono::Utc::now()),
            }
            .insert(txn)
            .await?;

            Ok((user, entry))
        })
    })
    .await
    .map_err(ApiError::from)
}

/// Move funds from a client's wallet to a freelancer's wallet and append a
/// `payment` ledger entry, as one transaction.
///
/// Both user rows are locked in ascending id order (a fixed order prevents
/// two opposite transfers from deadlocking), the balance check runs against
/// the locked row, and all three writes commit or none do — a concurrent
/// payment from the same client cannot overdraft the wallet past zero.
pub async fn pay_freelancer(
    db: &DatabaseConnection,
    client_id: Uuid,
    freelancer_id: Uuid,
    amount: f64,
    description: String,
) -> Result<(users::Model, transactions::Model), ApiError> {
    db.transaction::<_, (users::Model, transactions::Model), ApiError>(move |txn| {
        Box::pin(async move {
            let lock_user = |id: Uuid| async move {
                users::Entity::find_by_id(id)
                    .lock_exclusive()
                    .one(txn)
                    .await
            };

            let first_id = Ord::min(client_id, freelancer_id);
            let second_id = Ord::max(client_id, freelancer_id);

            let first = lock_user(first_id).await?;
            let second = lock_user(second_id).await?;

            let (client, freelancer) = if first_id == client_id {
                (first, second)
            } else {
                (second, first)
            };

            let client = client
                .ok_or_else(|| ApiError::NotFound(format!("User {client_id} not found")))?;
            let freelancer = freelancer.ok_or_else(|| {
                ApiError::NotFound(format!("Freelancer {freelancer_id} not found"))
            })?;

            if client.wallet_balance < amount {
                return Err(ApiError::Conflict(
                    "Insufficient wallet balance".to_string(),
                ));
            }

            let now = chrono::Utc::now();

            let debited = client.wallet_balance - amount;
            let mut client_active: users::ActiveModel = client.into();
            client_active.wallet_balance = Set(debited);
            client_active.updated_at = Set(Some(now));
            let client = client_active.update(txn).await?;

            let credited = freelancer.wallet_balance + amount;
            let mut freelancer_active: users::ActiveModel = freelancer.into();
            freelancer_active.wallet_balance = Set(credited);
            freelancer_active.updated_at = Set(Some(now));
            freelancer_active.update(txn).await?;

            let entry = transactions::ActiveModel {
                id: Set(Uuid::new_v4()),
                client_id: Set(client_id),
                freelancer_id: Set(freelancer_id),
                amount: Set(amount),
                kind: Set(TransactionKind::Payment),
                description: Set(description),
                created_at: Set(now),
            }
            .insert(txn)
            .await?;

            Ok((client, entry))
        })
    })
    .await
    .map_err(ApiError::from)
}

/// Fetch the ledger entries a user appears in (either side), newest first,
/// with pagination.
pub async fn get_transactions_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
    page: u64,
    limit: u64,
) -> Result<Vec<transactions::Model>, DbErr> {
    transactions::Entity::find()
        .filter(
            Condition::any()
                .add(transactions::Column::ClientId.eq(user_id))
                .add(transactions::Column::FreelancerId.eq(user_id)),
        )
        .order_by_desc(transactions::Column::CreatedAt)
        .paginate(db, limit)
        .fetch_page(page.saturating_sub(1))
        .await
}
