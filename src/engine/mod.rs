pub mod catalog;
pub mod history;

pub use catalog::{Catalog, Drill, Goal, Level};
pub use history::CompletionHistory;
