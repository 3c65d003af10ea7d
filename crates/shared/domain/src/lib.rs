//! Domain layer - Invoicing value types shared by every crate.
//!
//! This crate contains pure domain definitions with no infrastructure dependencies.
//! Enable the `database` feature to store the status enums through SeaORM.

pub mod constants;
pub mod error;
pub mod money;
pub mod status;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use money::{line_amount, DecimalSpec};
pub use status::{InvoiceStatus, ProjectStatus};
