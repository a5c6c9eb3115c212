//! Database bootstrap: create the database if missing and the table DDL.
//! Cascade removal of association rows is enforced here by the schema,
//! not by application code.

use crate::error::AppError;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Table DDL, dependency order. `supplier_items` rows follow their owners
/// out via ON DELETE CASCADE.
const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS suppliers (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL,
        available BOOLEAN NOT NULL DEFAULT FALSE,
        address TEXT NOT NULL DEFAULT '',
        rating DOUBLE PRECISION NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS items (
        id BIGSERIAL PRIMARY KEY,
        name TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS supplier_items (
        supplier_id BIGINT NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
        item_id BIGINT NOT NULL REFERENCES items(id) ON DELETE CASCADE,
        PRIMARY KEY (supplier_id, item_id)
    )
    "#,
];

/// Create the service tables if they do not exist.
pub async fn ensure_tables(pool: &PgPool) -> Result<(), AppError> {
    for ddl in TABLES {
        sqlx::query(ddl).execute(pool).await?;
    }
    Ok(())
}

/// Create the target database when it is missing. The name is taken from the
/// last path segment of `database_url`; CREATE DATABASE runs over a
/// maintenance connection to the `postgres` database. Run before opening the
/// main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = split_database_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let admin_opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = admin_opts.connect().await?;
    let (exists,): (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists {
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Split a connection URL into (maintenance URL, database name). The query
/// string is not part of the name.
fn split_database_url(url: &str) -> Result<(String, String), AppError> {
    let slash = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL has no database path".into()))?;
    let (base, tail) = url.split_at(slash + 1);
    let db_name = tail.split('?').next().unwrap_or_default().trim();
    Ok((format!("{}postgres", base), db_name.to_string()))
}

/// A double quote inside a quoted identifier is escaped by doubling it.
fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_name_is_last_path_segment() {
        let (admin, name) =
            split_database_url("postgres://user:pw@localhost:5432/suppliers").unwrap();
        assert_eq!(name, "suppliers");
        assert_eq!(admin, "postgres://user:pw@localhost:5432/postgres");
    }

    #[test]
    fn query_string_is_stripped_from_db_name() {
        let (_, name) =
            split_database_url("postgres://localhost/suppliers?sslmode=disable").unwrap();
        assert_eq!(name, "suppliers");
    }

    #[test]
    fn embedded_quote_in_identifier_is_doubled() {
        assert_eq!(quote_ident("plain"), "\"plain\"");
        assert_eq!(quote_ident("we\"ird"), "\"we\"\"ird\"");
    }
}
