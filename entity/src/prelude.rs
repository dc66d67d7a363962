pub use super::apartment::Entity as Apartment;
pub use super::apartment_member::Entity as ApartmentMember;
pub use super::chore_allocation::Entity as ChoreAllocation;
pub use super::chore_queue_slot::Entity as ChoreQueueSlot;
pub use super::chore_task::Entity as ChoreTask;
pub use super::event::Entity as Event;
pub use super::product::Entity as Product;
pub use super::resident::Entity as Resident;
pub use super::shopping_item::Entity as ShoppingItem;
