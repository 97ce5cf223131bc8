use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use super::SqliteInitError;

struct Migration {
    version: i64,
    statements: &'static [&'static str],
}

/// Ordered schema history. Versions are applied once and never edited.
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        statements: &[
            r"
            CREATE TABLE IF NOT EXISTS cohorts (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                summary TEXT NOT NULL,
                focus_areas TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
            r"
            CREATE TABLE IF NOT EXISTS questions (
                cohort_id INTEGER NOT NULL,
                mode TEXT NOT NULL CHECK (mode IN ('practice', 'timed')),
                position INTEGER NOT NULL CHECK (position >= 0),
                id INTEGER NOT NULL,
                prompt TEXT NOT NULL,
                options TEXT NOT NULL,
                answer TEXT NOT NULL,
                explanation TEXT NOT NULL,
                PRIMARY KEY (cohort_id, mode, position),
                UNIQUE (cohort_id, id),
                FOREIGN KEY (cohort_id) REFERENCES cohorts(id) ON DELETE CASCADE
            );
            ",
            r"
            CREATE TABLE IF NOT EXISTS question_papers (
                id INTEGER PRIMARY KEY,
                cohort_id INTEGER NOT NULL,
                position INTEGER NOT NULL CHECK (position >= 0),
                subject TEXT NOT NULL,
                year INTEGER NOT NULL CHECK (year BETWEEN 0 AND 65535),
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                download_url TEXT NOT NULL,
                FOREIGN KEY (cohort_id) REFERENCES cohorts(id) ON DELETE CASCADE
            );
            ",
            r"
            CREATE INDEX IF NOT EXISTS idx_question_papers_cohort_position
                ON question_papers (cohort_id, position);
            ",
        ],
    },
    Migration {
        // Paper ids are only unique within their cohort.
        version: 2,
        statements: &[
            r"
            CREATE TABLE question_papers_v2 (
                cohort_id INTEGER NOT NULL,
                id INTEGER NOT NULL,
                position INTEGER NOT NULL CHECK (position >= 0),
                subject TEXT NOT NULL,
                year INTEGER NOT NULL CHECK (year BETWEEN 0 AND 65535),
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                download_url TEXT NOT NULL,
                PRIMARY KEY (cohort_id, id),
                FOREIGN KEY (cohort_id) REFERENCES cohorts(id) ON DELETE CASCADE
            );
            ",
            r"
            INSERT INTO question_papers_v2
                (cohort_id, id, position, subject, year, title, description, download_url)
            SELECT cohort_id, id, position, subject, year, title, description, download_url
            FROM question_papers;
            ",
            "DROP TABLE question_papers;",
            "ALTER TABLE question_papers_v2 RENAME TO question_papers;",
            r"
            CREATE INDEX IF NOT EXISTS idx_question_papers_cohort_position
                ON question_papers (cohort_id, position);
            ",
        ],
    },
];

async fn applied_versions(pool: &SqlitePool) -> Result<Vec<i64>, sqlx::Error> {
    sqlx::query_scalar("SELECT version FROM schema_migrations ORDER BY version")
        .fetch_all(pool)
        .await
}

async fn apply(pool: &SqlitePool, migration: &Migration) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    for statement in migration.statements {
        sqlx::query(*statement).execute(&mut *tx).await?;
    }
    sqlx::query(
        r"
        INSERT INTO schema_migrations (version, applied_at)
        VALUES (?1, ?2)
        ON CONFLICT(version) DO NOTHING
        ",
    )
    .bind(migration.version)
    .bind(Utc::now())
    .execute(&mut *tx)
    .await?;
    tx.commit().await
}

/// Apply every migration newer than the recorded schema, in order.
///
/// Returns how many versions were applied by this call.
pub async fn run_migrations(pool: &SqlitePool) -> Result<usize, SqliteInitError> {
    sqlx::query(
        r"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );
        ",
    )
    .execute(pool)
    .await?;

    let done = applied_versions(pool).await?;
    let mut applied = 0;
    for migration in MIGRATIONS.iter().filter(|m| !done.contains(&m.version)) {
        apply(pool, migration)
            .await
            .map_err(|source| SqliteInitError::Migration {
                version: migration.version,
                source,
            })?;
        info!(version = migration.version, "applied schema migration");
        applied += 1;
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_are_strictly_increasing() {
        assert!(MIGRATIONS.windows(2).all(|w| w[0].version < w[1].version));
        assert_eq!(MIGRATIONS.first().map(|m| m.version), Some(1));
        assert_eq!(MIGRATIONS.last().map(|m| m.version), Some(2));
    }
}
