use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Bids {
    Table,
    ProjectId,
    FreelancerId,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    PostedBy,
    Status,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    ClientId,
    FreelancerId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on bids.project_id for listing bids on a project
        manager
            .create_index(
                Index::create()
                    .name("idx_bids_project_id")
                    .table(Bids::Table)
                    .col(Bids::ProjectId)
                    .to_owned(),
            )
            .await?;

        // Index on bids.freelancer_id for a freelancer's bid list
        manager
            .create_index(
                Index::create()
                    .name("idx_bids_freelancer_id")
                    .table(Bids::Table)
                    .col(Bids::FreelancerId)
                    .to_owned(),
            )
            .await?;

        // Index on projects.posted_by for a client's project list
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_posted_by")
                    .table(Projects::Table)
                    .col(Projects::PostedBy)
                    .to_owned(),
            )
            .await?;

        // Index on projects.status for browsing open projects
        manager
            .create_index(
                Index::create()
                    .name("idx_projects_status")
                    .table(Projects::Table)
                    .col(Projects::Status)
                    .to_owned(),
            )
            .await?;

        // Indexes on both transaction parties for ledger history queries
        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_client_id")
                    .table(Transactions::Table)
                    .col(Transactions::ClientId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_freelancer_id")
                    .table(Transactions::Table)
                    .col(Transactions::FreelancerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_bids_project_id")
                    .table(Bids::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_bids_freelancer_id")
                    .table(Bids::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_projects_posted_by")
                    .table(Projects::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_projects_status")
                    .table(Projects::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_transactions_client_id")
                    .table(Transactions::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_index(
                Index::drop()
                    .name("idx_transactions_freelancer_id")
                    .table(Transactions::Table)
                    .to_owned(),
            )
            .await
    }
}
