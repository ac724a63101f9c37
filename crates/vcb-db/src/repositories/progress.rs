use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};
use uuid::Uuid;
use vcb_srs::{ItemRef, NewProgress, ProgressUpdate};

use crate::models::ProgressRow;

pub async fn find_progress<'e, E>(
    executor: E,
    user_id: Uuid,
    item: ItemRef,
) -> Result<Option<ProgressRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    // Separate statements so each hits its partial unique index
    let sql = match item {
        ItemRef::Vocab(_) => {
            // language=PostgreSQL
            r#"
                SELECT id, user_id, vocab_id, verb_id, last_reviewed, next_review, ease_factor,
                       "interval", repetitions, correct_count, incorrect_count, is_known, is_flagged,
                       created_at, updated_at
                FROM user_progress
                WHERE user_id = $1 AND vocab_id = $2
            "#
        }
        ItemRef::Verb(_) => {
            // language=PostgreSQL
            r#"
                SELECT id, user_id, vocab_id, verb_id, last_reviewed, next_review, ease_factor,
                       "interval", repetitions, correct_count, incorrect_count, is_known, is_flagged,
                       created_at, updated_at
                FROM user_progress
                WHERE user_id = $1 AND verb_id = $2
            "#
        }
    };

    sqlx::query_as(sql)
        .bind(user_id)
        .bind(item.id())
        .fetch_optional(executor)
        .await
}

pub async fn insert_progress<'e, E>(
    executor: E,
    new: &NewProgress,
) -> Result<ProgressRow, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let s = &new.scheduling;
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO user_progress (
                user_id, vocab_id, verb_id, last_reviewed, next_review, ease_factor,
                "interval", repetitions, correct_count, incorrect_count, is_known,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $12)
            RETURNING id, user_id, vocab_id, verb_id, last_reviewed, next_review, ease_factor,
                      "interval", repetitions, correct_count, incorrect_count, is_known, is_flagged,
                      created_at, updated_at
        "#,
    )
    .bind(new.user_id)
    .bind(new.item.vocab_id())
    .bind(new.item.verb_id())
    .bind(s.last_reviewed)
    .bind(s.next_review)
    .bind(new.ease_factor)
    .bind(s.interval)
    .bind(s.repetitions)
    .bind(s.correct_count)
    .bind(s.incorrect_count)
    .bind(new.is_known)
    .bind(new.created_at)
    .fetch_one(executor)
    .await
}

/// Write all mutable fields of a progress row in a single statement.
///
/// Returns `None` when no row has the given id.
pub async fn update_progress<'e, E>(
    executor: E,
    id: i64,
    changes: &ProgressUpdate,
) -> Result<Option<ProgressRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let s = &changes.scheduling;
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE user_progress
            SET last_reviewed = $2,
                next_review = $3,
                "interval" = $4,
                repetitions = $5,
                correct_count = $6,
                incorrect_count = $7,
                is_known = $8,
                updated_at = $9
            WHERE id = $1
            RETURNING id, user_id, vocab_id, verb_id, last_reviewed, next_review, ease_factor,
                      "interval", repetitions, correct_count, incorrect_count, is_known, is_flagged,
                      created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(s.last_reviewed)
    .bind(s.next_review)
    .bind(s.interval)
    .bind(s.repetitions)
    .bind(s.correct_count)
    .bind(s.incorrect_count)
    .bind(changes.is_known)
    .bind(changes.updated_at)
    .fetch_optional(executor)
    .await
}

pub async fn list_due_progress<'e, E>(
    executor: E,
    user_id: Uuid,
    now: DateTime<Utc>,
    limit: i64,
) -> Result<Vec<ProgressRow>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, user_id, vocab_id, verb_id, last_reviewed, next_review, ease_factor,
                   "interval", repetitions, correct_count, incorrect_count, is_known, is_flagged,
                   created_at, updated_at
            FROM user_progress
            WHERE user_id = $1
                AND is_known = false
                AND next_review <= $2
            ORDER BY next_review, id
            LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(now)
    .bind(limit)
    .fetch_all(executor)
    .await
}
