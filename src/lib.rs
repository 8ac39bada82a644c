//! table-pager: pagination and substring filtering for tables.

pub mod dom;
pub mod error;
pub mod filter;
pub mod markup;
pub mod paginator;
pub mod report;
pub mod table;
pub mod tui;
pub mod types;
