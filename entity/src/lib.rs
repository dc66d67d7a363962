pub mod prelude;

pub mod apartment;
pub mod apartment_member;
pub mod chore_allocation;
pub mod chore_queue_slot;
pub mod chore_task;
pub mod event;
pub mod product;
pub mod resident;
pub mod shopping_item;
