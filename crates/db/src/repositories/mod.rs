//! Repository layer.
//!
//! Each repository is a zero-sized struct with async methods taking a `&PgPool`.

pub mod logged_row_repo;

pub use logged_row_repo::{build_insert_sql, row_to_json, LoggedRowRepo};
