//! The `users` resource: row types and data access.

pub mod mysql;
pub mod store;
pub mod types;

pub use mysql::MySqlUserStore;
pub use store::{StoreResult, UserStore};
pub use types::{Lookup, NewUser, User};
