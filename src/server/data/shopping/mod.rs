pub mod item;
pub mod product;

pub use item::ShoppingItemRepository;
pub use product::ProductRepository;
