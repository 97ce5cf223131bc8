use quiz_core::model::{CohortId, PaperId, QuestionId, QuestionPaper, QuizMode};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::{QuestionRecord, StorageError};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn u64_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn cohort_id_from_i64(v: i64) -> Result<CohortId, StorageError> {
    Ok(CohortId::new(i64_to_u64("cohort_id", v)?))
}

pub(crate) fn cohort_id_to_i64(id: CohortId) -> Result<i64, StorageError> {
    u64_to_i64("cohort_id", id.value())
}

fn position_from_i64(v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid position: {v}")))
}

/// String lists are stored as JSON arrays.
pub(crate) fn encode_list(items: &[String]) -> Result<String, StorageError> {
    serde_json::to_string(items).map_err(ser)
}

pub(crate) fn decode_list(raw: &str) -> Result<Vec<String>, StorageError> {
    serde_json::from_str(raw).map_err(ser)
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<QuestionRecord, StorageError> {
    let mode_str: String = row.try_get("mode").map_err(ser)?;
    let mode: QuizMode = mode_str.parse().map_err(ser)?;
    let options_raw: String = row.try_get("options").map_err(ser)?;

    Ok(QuestionRecord {
        cohort_id: cohort_id_from_i64(row.try_get::<i64, _>("cohort_id").map_err(ser)?)?,
        mode,
        position: position_from_i64(row.try_get::<i64, _>("position").map_err(ser)?)?,
        id: QuestionId::new(i64_to_u64("question_id", row.try_get("id").map_err(ser)?)?),
        prompt: row.try_get("prompt").map_err(ser)?,
        options: decode_list(&options_raw)?,
        answer: row.try_get("answer").map_err(ser)?,
        explanation: row.try_get("explanation").map_err(ser)?,
    })
}

pub(crate) fn map_paper_row(row: &SqliteRow) -> Result<QuestionPaper, StorageError> {
    let year_i64: i64 = row.try_get("year").map_err(ser)?;
    let year = u16::try_from(year_i64)
        .map_err(|_| StorageError::Serialization(format!("invalid year: {year_i64}")))?;
    let url: String = row.try_get("download_url").map_err(ser)?;

    QuestionPaper::new(
        PaperId::new(i64_to_u64("paper_id", row.try_get("id").map_err(ser)?)?),
        row.try_get::<String, _>("subject").map_err(ser)?,
        year,
        row.try_get::<String, _>("title").map_err(ser)?,
        row.try_get::<String, _>("description").map_err(ser)?,
        &url,
    )
    .map_err(ser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_lists_round_trip_through_json() {
        let items = vec!["a \"quoted\" option".to_string(), "x <= 7".to_string()];
        let encoded = encode_list(&items).unwrap();
        assert_eq!(decode_list(&encoded).unwrap(), items);
    }

    #[test]
    fn malformed_list_is_a_serialization_error() {
        assert!(matches!(
            decode_list("not json"),
            Err(StorageError::Serialization(_))
        ));
    }

    #[test]
    fn negative_ids_are_rejected() {
        assert!(cohort_id_from_i64(-1).is_err());
        assert_eq!(cohort_id_from_i64(9).unwrap(), CohortId::new(9));
    }
}
