//! Initial schema migration.
//!
//! - `services`: organizational units, deactivated rather than deleted
//! - `profiles`: people, referenced by memberships and assignments
//! - `service_members`: memberships, soft-removed through `status`
//! - `plannings`: a task for a service on a calendar date
//! - `planning_assignments`: who is scheduled on a planning

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Services {
    Table,
    Id,
    Name,
    DisplayName,
    Emoji,
    Description,
    IsActive,
}

#[derive(Iden)]
enum Profiles {
    Table,
    Id,
    FullName,
    Email,
    Role,
}

#[derive(Iden)]
enum ServiceMembers {
    Table,
    Id,
    ServiceId,
    UserId,
    Status,
    JoinedAt,
    Notes,
    AddedBy,
}

#[derive(Iden)]
enum Plannings {
    Table,
    Id,
    ServiceId,
    Date,
    Task,
    Status,
    Notes,
    CreatedBy,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PlanningAssignments {
    Table,
    Id,
    PlanningId,
    MemberId,
    IndividualStatus,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Services
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Services::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Services::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Services::Name).string().not_null())
                    .col(ColumnDef::new(Services::DisplayName).string().not_null())
                    .col(ColumnDef::new(Services::Emoji).string())
                    .col(ColumnDef::new(Services::Description).text())
                    .col(
                        ColumnDef::new(Services::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-services-name-unique")
                    .table(Services::Table)
                    .col(Services::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Profiles
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Profiles::FullName).string())
                    .col(ColumnDef::new(Profiles::Email).string())
                    .col(
                        ColumnDef::new(Profiles::Role)
                            .string()
                            .not_null()
                            .default("member"),
                    )
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Service members
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(ServiceMembers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ServiceMembers::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ServiceMembers::ServiceId).string().not_null())
                    .col(ColumnDef::new(ServiceMembers::UserId).string().not_null())
                    .col(
                        ColumnDef::new(ServiceMembers::Status)
                            .string()
                            .not_null()
                            .default("active"),
                    )
                    .col(
                        ColumnDef::new(ServiceMembers::JoinedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ServiceMembers::Notes).text())
                    .col(ColumnDef::new(ServiceMembers::AddedBy).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-service_members-service_id")
                            .from(ServiceMembers::Table, ServiceMembers::ServiceId)
                            .to(Services::Table, Services::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-service_members-user_id")
                            .from(ServiceMembers::Table, ServiceMembers::UserId)
                            .to(Profiles::Table, Profiles::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-service_members-service_id-status")
                    .table(ServiceMembers::Table)
                    .col(ServiceMembers::ServiceId)
                    .col(ServiceMembers::Status)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Plannings
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Plannings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Plannings::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Plannings::ServiceId).string().not_null())
                    .col(ColumnDef::new(Plannings::Date).string().not_null())
                    .col(ColumnDef::new(Plannings::Task).string().not_null())
                    .col(
                        ColumnDef::new(Plannings::Status)
                            .string()
                            .not_null()
                            .default("planned"),
                    )
                    .col(ColumnDef::new(Plannings::Notes).text())
                    .col(ColumnDef::new(Plannings::CreatedBy).string())
                    .col(
                        ColumnDef::new(Plannings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Plannings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-plannings-service_id")
                            .from(Plannings::Table, Plannings::ServiceId)
                            .to(Services::Table, Services::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-plannings-service_id-date")
                    .table(Plannings::Table)
                    .col(Plannings::ServiceId)
                    .col(Plannings::Date)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 5. Planning assignments
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(PlanningAssignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlanningAssignments::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(PlanningAssignments::PlanningId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlanningAssignments::MemberId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlanningAssignments::IndividualStatus)
                            .string()
                            .not_null()
                            .default("planned"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-planning_assignments-planning_id")
                            .from(PlanningAssignments::Table, PlanningAssignments::PlanningId)
                            .to(Plannings::Table, Plannings::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-planning_assignments-planning_id")
                    .table(PlanningAssignments::Table)
                    .col(PlanningAssignments::PlanningId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Reverse order of creation
        manager
            .drop_table(Table::drop().table(PlanningAssignments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Plannings::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ServiceMembers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Services::Table).to_owned())
            .await?;
        Ok(())
    }
}
