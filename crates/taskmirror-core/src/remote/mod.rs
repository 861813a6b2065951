pub mod identity;
pub mod memory;
pub mod store;

pub use identity::{IdentityFeed, IdentityProvider};
pub use memory::MemoryStore;
pub use store::{Delivery, DeliverySender, DocumentStore, TaskFeed};
