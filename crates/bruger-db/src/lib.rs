pub mod error;
pub mod pool;
pub mod repos;

// Re-export commonly used items
pub use error::DbError;
pub use pool::{create_pool, run_migrations};
pub use repos::user::{UserRepo, UserRow};
