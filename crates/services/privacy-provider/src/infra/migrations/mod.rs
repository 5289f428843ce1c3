//! Database migrations for the plugin-owned tables.
//!
//! Host tables (`course_modules`, `modules`, `assign`, `context`, `user`)
//! belong to the host and are never migrated here.
//! Migration names follow the pattern: m{YYYYMMDD}_{NNNNNN}_{description}

use sea_orm_migration::prelude::*;

mod m20181001_000001_create_submission_table;
mod m20181001_000002_create_user_consent_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20181001_000001_create_submission_table::Migration),
            Box::new(m20181001_000002_create_user_consent_table::Migration),
        ]
    }
}
