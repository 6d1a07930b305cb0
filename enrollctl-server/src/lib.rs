//! enrollctl-server: HTTP CRUD service for courses and persons
//!
//! Persons enroll in courses through a many-to-many join table. The
//! repositories keep a person's enrollment set consistent with every
//! create, update and delete.

pub mod db;
pub mod http;
pub mod models;

pub use db::{connect, ensure_schema, ConnectError, DbError};
pub use http::{run_server, ServerConfig};
