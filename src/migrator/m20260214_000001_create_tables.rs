use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Employee table
        manager
            .create_table(
                Table::create()
                    .table(Employee::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Employee::EmployeeId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Employee::Name).string().not_null())
                    .col(
                        ColumnDef::new(Employee::Username)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Employee::Password).string().not_null())
                    .col(ColumnDef::new(Employee::Role).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Habitat table
        manager
            .create_table(
                Table::create()
                    .table(Habitat::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Habitat::HabitatId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Habitat::Name).string().not_null())
                    .col(ColumnDef::new(Habitat::Type).string().not_null())
                    .col(ColumnDef::new(Habitat::Capacity).integer().not_null())
                    .to_owned(),
            )
            .await?;

        // Animal table. The id is caller-supplied, so no auto_increment here.
        manager
            .create_table(
                Table::create()
                    .table(Animal::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Animal::AnimalId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Animal::Name).string().not_null())
                    .col(ColumnDef::new(Animal::Species).string().not_null())
                    .col(ColumnDef::new(Animal::Gender).string().not_null())
                    .col(ColumnDef::new(Animal::Age).integer().not_null())
                    .col(ColumnDef::new(Animal::HabitatId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-animal-habitat_id")
                            .from(Animal::Table, Animal::HabitatId)
                            .to(Habitat::Table, Habitat::HabitatId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Visitor table
        manager
            .create_table(
                Table::create()
                    .table(Visitor::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visitor::VisitorId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Visitor::FName).string().not_null())
                    .col(ColumnDef::new(Visitor::LName).string().not_null())
                    .col(ColumnDef::new(Visitor::Age).integer().not_null())
                    .col(ColumnDef::new(Visitor::PhoneNo).string().not_null())
                    .to_owned(),
            )
            .await?;

        // Visits join table. Restrict on animal_id is what blocks deleting
        // an animal that has recorded visits.
        manager
            .create_table(
                Table::create()
                    .table(Visits::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Visits::VisitId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Visits::VisitorId).integer().not_null())
                    .col(ColumnDef::new(Visits::AnimalId).integer().not_null())
                    .col(ColumnDef::new(Visits::VisitDate).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-visits-visitor_id")
                            .from(Visits::Table, Visits::VisitorId)
                            .to(Visitor::Table, Visitor::VisitorId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-visits-animal_id")
                            .from(Visits::Table, Visits::AnimalId)
                            .to(Animal::Table, Animal::AnimalId)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Veterinary status table. The id is caller-supplied.
        manager
            .create_table(
                Table::create()
                    .table(VeterinaryStatus::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(VeterinaryStatus::RecordId)
                            .integer()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(VeterinaryStatus::AnimalId).integer().not_null())
                    .col(ColumnDef::new(VeterinaryStatus::VetId).integer().not_null())
                    .col(ColumnDef::new(VeterinaryStatus::CheckupDate).date().not_null())
                    .col(ColumnDef::new(VeterinaryStatus::Status).string().not_null())
                    .col(ColumnDef::new(VeterinaryStatus::Notes).text())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-veterinary_status-animal_id")
                            .from(VeterinaryStatus::Table, VeterinaryStatus::AnimalId)
                            .to(Animal::Table, Animal::AnimalId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-veterinary_status-vet_id")
                            .from(VeterinaryStatus::Table, VeterinaryStatus::VetId)
                            .to(Employee::Table, Employee::EmployeeId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Ticket table
        manager
            .create_table(
                Table::create()
                    .table(Ticket::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Ticket::TicketId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Ticket::VisitorId).integer().not_null())
                    .col(ColumnDef::new(Ticket::Date).date().not_null())
                    .col(ColumnDef::new(Ticket::Price).double().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-ticket-visitor_id")
                            .from(Ticket::Table, Ticket::VisitorId)
                            .to(Visitor::Table, Visitor::VisitorId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Ticket::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(VeterinaryStatus::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Visits::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Visitor::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Animal::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Habitat::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Employee::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Employee {
    Table,
    EmployeeId,
    Name,
    Username,
    Password,
    Role,
}

#[derive(DeriveIden)]
enum Habitat {
    Table,
    HabitatId,
    Name,
    Type,
    Capacity,
}

#[derive(DeriveIden)]
enum Animal {
    Table,
    AnimalId,
    Name,
    Species,
    Gender,
    Age,
    HabitatId,
}

#[derive(DeriveIden)]
enum Visitor {
    Table,
    VisitorId,
    FName,
    LName,
    Age,
    PhoneNo,
}

#[derive(DeriveIden)]
enum Visits {
    Table,
    VisitId,
    VisitorId,
    AnimalId,
    VisitDate,
}

#[derive(DeriveIden)]
enum VeterinaryStatus {
    Table,
    RecordId,
    AnimalId,
    VetId,
    CheckupDate,
    Status,
    Notes,
}

#[derive(DeriveIden)]
enum Ticket {
    Table,
    TicketId,
    VisitorId,
    Date,
    Price,
}
