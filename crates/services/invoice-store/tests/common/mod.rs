//! Shared setup for database tests.
//!
//! Tests run against a private in-memory SQLite database with the schema
//! installed by the real migrator. Set `TEST_DATABASE_URL` to run them against
//! PostgreSQL instead; fixtures use random emails so runs can share a database.

#![allow(dead_code)]

use std::str::FromStr;

use chrono::NaiveDate;
use sea_orm::prelude::Decimal;
use sea_orm::{
    ActiveModelTrait, ConnectOptions, ConnectionTrait, DatabaseConnection, DbBackend, Set,
};
use uuid::Uuid;

use invoice_store::entities::{customer, invoice, project, user};
use invoice_store::infra::Database;

pub async fn setup() -> Database {
    if let Ok(url) = std::env::var("TEST_DATABASE_URL") {
        return Database::connect_url(&url)
            .await
            .expect("Failed to connect to test database");
    }

    let mut options = ConnectOptions::new("sqlite::memory:");
    options.max_connections(1).sqlx_logging(false);

    let db = Database::connect_with(options)
        .await
        .expect("Failed to connect to test database");
    db.run_migrations()
        .await
        .expect("Failed to run migrations");
    db
}

/// Whether the database belongs to this test alone.
pub fn is_private(db: &Database) -> bool {
    db.connection().get_database_backend() == DbBackend::Sqlite
}

pub fn is_postgres(db: &DatabaseConnection) -> bool {
    db.get_database_backend() == DbBackend::Postgres
}

pub fn dec(value: &str) -> Decimal {
    Decimal::from_str(value).unwrap()
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::from_str(value).unwrap()
}

pub async fn create_user(db: &DatabaseConnection) -> user::Model {
    create_user_with_email(db, &format!("{}@example.com", Uuid::new_v4())).await
}

pub async fn create_user_with_email(db: &DatabaseConnection, email: &str) -> user::Model {
    user::ActiveModel {
        name: Set("Ada Obi".to_string()),
        email: Set(email.to_string()),
        password_hash: Set("$argon2id$v=19$test".to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert user")
}

pub async fn create_customer(db: &DatabaseConnection, user: &user::Model) -> customer::Model {
    customer::ActiveModel {
        user_id: Set(user.id),
        name: Set("Acme Ltd".to_string()),
        email: Set(Some("billing@acme.test".to_string())),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert customer")
}

pub async fn create_project(
    db: &DatabaseConnection,
    user: &user::Model,
    customer: &customer::Model,
) -> project::Model {
    project::ActiveModel {
        user_id: Set(user.id),
        customer_id: Set(customer.id),
        name: Set("Website rebuild".to_string()),
        hourly_rate: Set(Some(dec("85.00"))),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to insert project")
}

pub fn new_invoice(
    user: &user::Model,
    customer: &customer::Model,
    number: &str,
) -> invoice::ActiveModel {
    invoice::ActiveModel {
        user_id: Set(user.id),
        customer_id: Set(customer.id),
        invoice_number: Set(number.to_string()),
        issue_date: Set(date("2025-01-15")),
        due_date: Set(date("2025-02-14")),
        subtotal: Set(dec("100.00")),
        total_amount: Set(dec("100.00")),
        ..Default::default()
    }
}

pub async fn create_invoice(
    db: &DatabaseConnection,
    user: &user::Model,
    customer: &customer::Model,
    number: &str,
) -> invoice::Model {
    new_invoice(user, customer, number)
        .insert(db)
        .await
        .expect("Failed to insert invoice")
}
