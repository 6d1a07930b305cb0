//! Database layer - connection establishment and repositories
//!
//! # Design Principles
//!
//! - Pool handle passed explicitly into every repository, no global state
//! - Row count is the "does not exist" signal for update/delete, no pre-check read
//! - Transactions for every multi-statement person mutation

pub mod connect;
pub mod repos;
pub mod schema;

pub use connect::{close_pool, connect, ConnectError, DEFAULT_MAX_CONNECTIONS};
pub use repos::*;
pub use schema::ensure_schema;
