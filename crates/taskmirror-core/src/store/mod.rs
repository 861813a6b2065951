pub mod cache;
pub mod snapshot;
pub mod views;

pub use cache::{Subscription, TaskCache};
pub use snapshot::{StatusFilter, TaskSnapshot};
pub use views::{task_counts, TaskCounts};
