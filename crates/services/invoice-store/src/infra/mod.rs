//! Infrastructure layer - database connection and schema migrations.

mod db;
pub mod migrations;

pub use db::{connect_options, connection_url, Database};
pub use migrations::Migrator;
