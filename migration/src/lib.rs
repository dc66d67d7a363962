pub use sea_orm_migration::prelude::*;

mod m20250825_000001_apartment;
mod m20250825_000002_resident;
mod m20250825_000003_apartment_member;
mod m20250825_000004_event;
mod m20250825_000005_product;
mod m20250825_000006_shopping_item;
mod m20250825_000007_chore_task;
mod m20250825_000008_chore_allocation;
mod m20250825_000009_chore_queue_slot;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250825_000001_apartment::Migration),
            Box::new(m20250825_000002_resident::Migration),
            Box::new(m20250825_000003_apartment_member::Migration),
            Box::new(m20250825_000004_event::Migration),
            Box::new(m20250825_000005_product::Migration),
            Box::new(m20250825_000006_shopping_item::Migration),
            Box::new(m20250825_000007_chore_task::Migration),
            Box::new(m20250825_000008_chore_allocation::Migration),
            Box::new(m20250825_000009_chore_queue_slot::Migration),
        ]
    }
}
