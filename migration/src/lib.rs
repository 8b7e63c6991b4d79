pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20250901_000001_initial_tables;
mod m20250901_000002_analytics_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250901_000001_initial_tables::Migration),
            Box::new(m20250901_000002_analytics_events::Migration),
        ]
    }
}
