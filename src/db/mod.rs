//! Database module: the MySQL side of acquisition.
//!
//! Layout:
//! - `models.rs`: row struct mirroring the query's column aliases
//! - `query.rs`: the fixed SQL query
//! - `mysql.rs`: connection descriptor and the MySQL-backed source

pub mod models;
pub mod mysql;
pub mod query;

pub use models::HomeRecord;
pub use mysql::{ConnectionDescriptor, MySqlSource};
pub use query::ZILLOW_QUERY;
