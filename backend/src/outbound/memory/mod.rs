//! In-process outbound adapters.
//!
//! These adapters keep state in memory for the lifetime of the process.

mod in_memory_user_store;

pub use in_memory_user_store::InMemoryUserStore;
