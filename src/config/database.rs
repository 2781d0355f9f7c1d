//! Database configuration module.
//!
//! Handles the connection string, connection setup and table creation using `SeaORM`.
//! Tables are generated from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the Rust structs.

use crate::entities::{Aisle, Department, Order, OrderProduct, Product};
use crate::errors::{Error, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};

/// Environment variable holding the storage connection string.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

const SUPPORTED_SCHEMES: [&str; 3] = ["sqlite:", "postgres://", "postgresql://"];

/// Checks that `url` looks like a connection string for a supported backend.
///
/// # Errors
/// Returns [`Error::Config`] for an empty string or an unknown scheme.
pub fn validate_database_url(url: &str) -> Result<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(Error::Config {
            message: format!("{DATABASE_URL_VAR} is empty"),
        });
    }
    if SUPPORTED_SCHEMES.iter().any(|scheme| url.starts_with(scheme)) {
        Ok(())
    } else {
        Err(Error::Config {
            message: format!(
                "{DATABASE_URL_VAR} is not a storage connection string (expected one of {})",
                SUPPORTED_SCHEMES.join(", ")
            ),
        })
    }
}

/// Reads and validates `DATABASE_URL`.
///
/// There is no fallback: without a usable connection string the service refuses to start.
pub fn get_database_url() -> Result<String> {
    let url = std::env::var(DATABASE_URL_VAR).map_err(|e| Error::Config {
        message: format!("{DATABASE_URL_VAR} not set: {e}"),
    })?;
    validate_database_url(&url)?;
    Ok(url)
}

/// Establishes the store connection.
///
/// The pool is capped at a single connection; one logical connection per store instance.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    validate_database_url(database_url)?;

    let mut options = ConnectOptions::new(database_url.to_owned());
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(true);

    Database::connect(options).await.map_err(Into::into)
}

async fn create_table<E: EntityTrait>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<()> {
    let builder = db.get_database_backend();
    let mut statement = schema.create_table_from_entity(entity);
    statement.if_not_exists();
    db.execute(builder.build(&statement)).await?;
    Ok(())
}

/// Creates all collections if they do not exist yet.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let schema = Schema::new(db.get_database_backend());

    create_table(db, &schema, Order).await?;
    create_table(db, &schema, Aisle).await?;
    create_table(db, &schema, Department).await?;
    create_table(db, &schema, Product).await?;
    create_table(db, &schema, OrderProduct).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        aisle::Model as AisleModel, department::Model as DepartmentModel,
        order::Model as OrderModel, order_product::Model as OrderProductModel,
        product::Model as ProductModel,
    };
    use sea_orm::QuerySelect;

    #[test]
    fn test_validate_database_url_accepts_supported_schemes() {
        assert!(validate_database_url("sqlite::memory:").is_ok());
        assert!(validate_database_url("sqlite://data/instacart.sqlite?mode=rwc").is_ok());
        assert!(validate_database_url("postgres://user:pw@localhost/instacart").is_ok());
        assert!(validate_database_url("postgresql://localhost/instacart").is_ok());
    }

    #[test]
    fn test_validate_database_url_rejects_other_strings() {
        assert!(matches!(
            validate_database_url(""),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            validate_database_url("mongodb://localhost:27017"),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            validate_database_url("not a url"),
            Err(Error::Config { .. })
        ));
    }

    #[tokio::test]
    async fn test_create_connection_rejects_unknown_scheme() {
        let result = create_connection("redis://localhost").await;
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<OrderModel> = Order::find().limit(1).all(&db).await?;
        let _: Vec<AisleModel> = Aisle::find().limit(1).all(&db).await?;
        let _: Vec<DepartmentModel> = Department::find().limit(1).all(&db).await?;
        let _: Vec<ProductModel> = Product::find().limit(1).all(&db).await?;
        let _: Vec<OrderProductModel> = OrderProduct::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = create_connection("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        Ok(())
    }
}
