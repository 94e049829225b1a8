pub mod json_store;
pub mod kv;
pub mod schema;

pub use json_store::JsonStore;
pub use kv::{KeyValueStore, MemoryStore};
