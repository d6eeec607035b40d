use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Ledger entry kind, stored as a lowercase string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[serde(rename_all = "lowercase")]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum TransactionKind {
    #[sea_orm(string_value = "deposit")]
    Deposit,
    #[sea_orm(string_value = "payment")]
    Payment,
}

/// SeaORM entity for the `transactions` table.
///
/// Rows are append-only: created as a side effect of a wallet mutation and
/// never updated or deleted. Deposits record the depositor as both parties.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_id: Uuid,
    pub freelancer_id: Uuid,
    #[sea_orm(column_type = "Double")]
    pub amount: f64,
    pub kind: TransactionKind,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::ClientId",
        to = "super::users::Column::Id"
    )]
    Client,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::FreelancerId",
        to = "super::users::Column::Id"
    )]
    Freelancer,
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Body of `POST /api/transaction/add-funds`.
#[derive(Debug, Clone, Deserialize)]
pub struct AddFunds {
    pub amount: f64,
}

impl AddFunds {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.amount <= 0.0 {
            return Err(ApiError::Validation(
                "Deposit amount must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Body of `POST /api/transaction/payment`.
#[derive(Debug, Clone, Deserialize)]
pub struct PayFreelancer {
    pub freelancer_id: Uuid,
    pub amount: f64,
    pub description: Option<String>,
}

impl PayFreelancer {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.amount <= 0.0 {
            return Err(ApiError::Validation(
                "Payment amount must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Response for the wallet-mutating endpoints: the caller's new balance plus
/// the ledger entry that was appended.
#[derive(Debug, Clone, Serialize)]
pub struct WalletResponse {
    pub wallet_balance: f64,
    pub transaction: Model,
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn deposit_amount_must_be_positive() {
        assert!(AddFunds { amount: 100.0 }.validate().is_ok());
        assert!(AddFunds { amount: 0.0 }.validate().is_err());
        assert!(AddFunds { amount: -50.0 }.validate().is_err());
    }

    #[test]
    fn payment_amount_must_be_positive() {
        let mut body = PayFreelancer {
            freelancer_id: Uuid::new_v4(),
            amount: 250.0,
            description: None,
        };
        assert!(body.validate().is_ok());
        body.amount = 0.0;
        assert!(body.validate().is_err());
    }
}
