//! Versioned schema migrations.
//!
//! Each migration runs once, in order, inside its own transaction, and is
//! recorded in `schema_migrations`.

use chrono::Utc;
use rusqlite::Connection;

use super::schema;

/// A named schema change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Migration {
    pub version: &'static str,
    pub sql: &'static str,
}

/// All migrations, oldest first.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001_initial",
        sql: schema::MIGRATION_0001_INITIAL,
    },
    Migration {
        version: "0002_add_count_column_to_association_table",
        sql: schema::MIGRATION_0002_ADD_COUNT,
    },
];

/// Returns the migrations not yet recorded in `applied`, in order.
pub fn pending<'a>(migrations: &'a [Migration], applied: &[String]) -> Vec<&'a Migration> {
    migrations
        .iter()
        .filter(|m| !applied.iter().any(|v| v == m.version))
        .collect()
}

/// Applies every pending migration and returns the versions applied.
pub fn run(conn: &mut Connection) -> rusqlite::Result<Vec<&'static str>> {
    conn.execute_batch(schema::CREATE_SCHEMA_MIGRATIONS)?;

    let applied: Vec<String> = {
        let mut stmt = conn.prepare(schema::SELECT_APPLIED_MIGRATIONS)?;
        let rows = stmt.query_map([], |row| row.get(0))?;
        rows.collect::<rusqlite::Result<_>>()?
    };

    let mut newly_applied = Vec::new();
    for migration in pending(MIGRATIONS, &applied) {
        let tx = conn.transaction()?;
        tx.execute_batch(migration.sql)?;
        tx.execute(
            schema::INSERT_MIGRATION,
            rusqlite::params![migration.version, Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;
        newly_applied.push(migration.version);
    }

    Ok(newly_applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_skips_applied_versions() {
        let applied = vec!["0001_initial".to_string()];
        let versions: Vec<&str> = pending(MIGRATIONS, &applied)
            .iter()
            .map(|m| m.version)
            .collect();
        assert_eq!(versions, vec!["0002_add_count_column_to_association_table"]);
    }

    #[test]
    fn test_run_is_idempotent() {
        let mut conn = Connection::open_in_memory().unwrap();

        let first = run(&mut conn).unwrap();
        assert_eq!(first.len(), MIGRATIONS.len());

        let second = run(&mut conn).unwrap();
        assert!(second.is_empty());

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(count, MIGRATIONS.len() as i64);
    }

    #[test]
    fn test_count_migration_backfills_existing_rows() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(schema::CREATE_SCHEMA_MIGRATIONS).unwrap();
        conn.execute_batch(schema::MIGRATION_0001_INITIAL).unwrap();
        conn.execute(
            schema::INSERT_MIGRATION,
            rusqlite::params!["0001_initial", "2024-01-01T00:00:00Z"],
        )
        .unwrap();
        conn.execute_batch(
            "INSERT INTO products (name, description, price) VALUES ('Mouse', 'Gaming mouse', 100);
             INSERT INTO orders (promocode, created_at) VALUES (NULL, '2024-01-01T00:00:00Z');
             INSERT INTO order_product_association (order_id, product_id, unit_price)
             VALUES (1, 1, 100);",
        )
        .unwrap();

        let applied = run(&mut conn).unwrap();
        assert_eq!(applied, vec!["0002_add_count_column_to_association_table"]);

        let count: i64 = conn
            .query_row("SELECT count FROM order_product_association", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
    }
}
