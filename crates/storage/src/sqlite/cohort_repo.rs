use chrono::Utc;
use quiz_core::model::{Cohort, CohortId, QuestionBank, QuizMode};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use tracing::debug;

use super::SqliteRepository;
use super::mapping::{
    cohort_id_from_i64, cohort_id_to_i64, decode_list, encode_list, map_paper_row,
    map_question_row, ser, u64_to_i64,
};
use crate::repository::{CohortRepository, QuestionRecord, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl CohortRepository for SqliteRepository {
    async fn upsert_cohort(&self, cohort: &Cohort) -> Result<(), StorageError> {
        let cohort_id = cohort_id_to_i64(cohort.id())?;
        let mut tx = self.pool.begin().await.map_err(conn)?;

        sqlx::query(
            r"
            INSERT INTO cohorts (id, name, summary, focus_areas, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                summary = excluded.summary,
                focus_areas = excluded.focus_areas,
                updated_at = excluded.updated_at
            ",
        )
        .bind(cohort_id)
        .bind(cohort.name().to_owned())
        .bind(cohort.summary().to_owned())
        .bind(encode_list(cohort.focus_areas())?)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        // Sequences are replaced wholesale so positions stay contiguous.
        sqlx::query("DELETE FROM questions WHERE cohort_id = ?1")
            .bind(cohort_id)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        sqlx::query("DELETE FROM question_papers WHERE cohort_id = ?1")
            .bind(cohort_id)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;

        for record in QuestionRecord::all_for(cohort) {
            sqlx::query(
                r"
                INSERT INTO questions (cohort_id, mode, position, id, prompt, options, answer, explanation)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ",
            )
            .bind(cohort_id)
            .bind(record.mode.as_str())
            .bind(i64::from(record.position))
            .bind(u64_to_i64("question_id", record.id.value())?)
            .bind(record.prompt)
            .bind(encode_list(&record.options)?)
            .bind(record.answer)
            .bind(record.explanation)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        for (position, paper) in (0_i64..).zip(cohort.papers()) {
            sqlx::query(
                r"
                INSERT INTO question_papers (id, cohort_id, position, subject, year, title, description, download_url)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ",
            )
            .bind(u64_to_i64("paper_id", paper.id().value())?)
            .bind(cohort_id)
            .bind(position)
            .bind(paper.subject().to_owned())
            .bind(i64::from(paper.year()))
            .bind(paper.title().to_owned())
            .bind(paper.description().to_owned())
            .bind(paper.download_url().as_str().to_owned())
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        debug!(cohort = %cohort.id(), "cohort upserted");
        Ok(())
    }

    async fn get_cohort(&self, id: CohortId) -> Result<Option<Cohort>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, name, summary, focus_areas
            FROM cohorts WHERE id = ?1
            ",
        )
        .bind(cohort_id_to_i64(id)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        match row {
            Some(row) => self.load_cohort(&row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn list_cohorts(&self) -> Result<Vec<Cohort>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, summary, focus_areas
            FROM cohorts
            ORDER BY id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut cohorts = Vec::with_capacity(rows.len());
        for row in rows {
            cohorts.push(self.load_cohort(&row).await?);
        }
        Ok(cohorts)
    }
}

impl SqliteRepository {
    async fn load_cohort(&self, row: &SqliteRow) -> Result<Cohort, StorageError> {
        let id = cohort_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
        let id_i64 = cohort_id_to_i64(id)?;

        let question_rows = sqlx::query(
            r"
            SELECT cohort_id, mode, position, id, prompt, options, answer, explanation
            FROM questions
            WHERE cohort_id = ?1
            ORDER BY mode ASC, position ASC
            ",
        )
        .bind(id_i64)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut practice = Vec::new();
        let mut timed = Vec::new();
        for row in &question_rows {
            let record = map_question_row(row)?;
            let mode = record.mode;
            let question = record.into_question().map_err(ser)?;
            match mode {
                QuizMode::Practice => practice.push(question),
                QuizMode::Timed => timed.push(question),
            }
        }
        let bank = QuestionBank::new(practice, timed).map_err(ser)?;

        let paper_rows = sqlx::query(
            r"
            SELECT id, subject, year, title, description, download_url
            FROM question_papers
            WHERE cohort_id = ?1
            ORDER BY position ASC
            ",
        )
        .bind(id_i64)
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;
        let papers = paper_rows
            .iter()
            .map(map_paper_row)
            .collect::<Result<Vec<_>, _>>()?;

        let focus_raw: String = row.try_get("focus_areas").map_err(ser)?;
        Cohort::new(
            id,
            row.try_get::<String, _>("name").map_err(ser)?,
            row.try_get::<String, _>("summary").map_err(ser)?,
            decode_list(&focus_raw)?,
            papers,
            bank,
        )
        .map_err(ser)
    }
}
