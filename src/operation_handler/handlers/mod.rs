//! Operation handler modules
//!
//! - CRUD operations (create, get, update, delete)
//! - Query operations (list)

pub mod crud;
pub mod query;

// Handler functions are called by the core dispatcher via
// super::handlers::module::function
