//! Versioned schema migrations, embedded in the binary and tracked in `schema_migrations`.
//! Each pending migration runs in its own transaction; applied versions are skipped on restart.

use crate::error::AppError;
use sqlx::PgPool;
use std::collections::HashSet;

pub const MIGRATIONS_TABLE: &str = "schema_migrations";

pub struct Migration {
    pub version: &'static str,
    pub description: &'static str,
    pub statements: &'static [&'static str],
}

/// All migrations in apply order.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "0001",
        description: "create classrooms table",
        statements: &[
            r#"
            CREATE TABLE IF NOT EXISTS classrooms (
                id SERIAL PRIMARY KEY,
                class_name TEXT NOT NULL,
                class_teacher TEXT NOT NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS ix_classrooms_class_name ON classrooms (class_name)",
        ],
    },
    Migration {
        version: "0002",
        description: "create students table",
        statements: &[
            r#"
            CREATE TABLE IF NOT EXISTS students (
                id SERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                age INTEGER NOT NULL,
                classroom_id INTEGER REFERENCES classrooms (id) ON DELETE SET NULL
            )
            "#,
            "CREATE INDEX IF NOT EXISTS ix_students_classroom_id ON students (classroom_id)",
        ],
    },
    Migration {
        version: "0003",
        description: "make classroom names unique",
        // Fails if duplicate names already exist; resolve them by hand first.
        statements: &[
            "DROP INDEX IF EXISTS ix_classrooms_class_name",
            "CREATE UNIQUE INDEX IF NOT EXISTS uq_classrooms_class_name ON classrooms (class_name)",
        ],
    },
];

async fn ensure_migrations_table(pool: &PgPool) -> Result<(), AppError> {
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            version TEXT PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
        MIGRATIONS_TABLE
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Versions already recorded as applied.
pub async fn applied_versions(pool: &PgPool) -> Result<HashSet<String>, AppError> {
    ensure_migrations_table(pool).await?;
    let rows: Vec<(String,)> = sqlx::query_as(&format!("SELECT version FROM {}", MIGRATIONS_TABLE))
        .fetch_all(pool)
        .await?;
    Ok(rows.into_iter().map(|(v,)| v).collect())
}

/// Migrations from `all` not yet in `applied`, in order.
pub fn pending<'a>(all: &'a [Migration], applied: &HashSet<String>) -> Vec<&'a Migration> {
    all.iter().filter(|m| !applied.contains(m.version)).collect()
}

/// Apply every pending migration. Returns the versions applied by this call.
pub async fn apply_migrations(pool: &PgPool) -> Result<Vec<&'static str>, AppError> {
    let applied = applied_versions(pool).await?;
    let mut done = Vec::new();
    for m in pending(MIGRATIONS, &applied) {
        let mut tx = pool.begin().await?;
        for stmt in m.statements {
            sqlx::query(*stmt).execute(&mut *tx).await.map_err(|e| {
                AppError::Migration(format!("{} ({}): {}", m.version, m.description, e))
            })?;
        }
        sqlx::query(&format!(
            "INSERT INTO {} (version, description) VALUES ($1, $2)",
            MIGRATIONS_TABLE
        ))
        .bind(m.version)
        .bind(m.description)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        tracing::info!(version = m.version, description = m.description, "migration applied");
        done.push(m.version);
    }
    if done.is_empty() {
        tracing::debug!("schema up to date");
    }
    Ok(done)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_are_unique_and_ordered() {
        let versions: Vec<&str> = MIGRATIONS.iter().map(|m| m.version).collect();
        let mut sorted = versions.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(versions, sorted);
    }

    #[test]
    fn pending_skips_applied_versions() {
        let applied: HashSet<String> = ["0001".to_string()].into_iter().collect();
        let left: Vec<&str> = pending(MIGRATIONS, &applied).iter().map(|m| m.version).collect();
        assert_eq!(left, vec!["0002", "0003"]);
        let all: HashSet<String> = MIGRATIONS.iter().map(|m| m.version.to_string()).collect();
        assert!(pending(MIGRATIONS, &all).is_empty());
    }

    #[test]
    fn students_reference_classrooms_with_set_null() {
        let students = MIGRATIONS.iter().find(|m| m.version == "0002").unwrap();
        assert!(students.statements[0].contains("REFERENCES classrooms (id) ON DELETE SET NULL"));
    }
}
