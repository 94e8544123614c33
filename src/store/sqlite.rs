// src/store/sqlite.rs

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::{
    QueryBuilder, Sqlite, SqlitePool,
    migrate::MigrateError,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
};

use super::{TriviaStore, like_pattern};
use crate::models::{category::Category, question::CreateQuestionRequest, question::Question};

const QUESTION_COLUMNS: &str = "id, question, answer, difficulty, category";

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub async fn connect(url: &str, max_connections: u32) -> sqlx::Result<Self> {
        let opts = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // An in-memory database lives and dies with its connection, so the
        // pool holds exactly one and never recycles it.
        let in_memory = url.contains(":memory:") || url.contains("mode=memory");
        let pool = if in_memory {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(opts)
                .await?
        } else {
            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .connect_with(opts)
                .await?
        };

        Ok(Self { pool })
    }

    /// Fresh private database with migrations applied.
    pub async fn in_memory() -> Result<Self, MigrateError> {
        let store = Self::connect("sqlite::memory:", 1).await?;
        store.migrate().await?;
        Ok(store)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl TriviaStore for SqliteStore {
    async fn migrate(&self) -> Result<(), MigrateError> {
        sqlx::migrate!("./migrations/sqlite").run(&self.pool).await
    }

    async fn categories(&self) -> sqlx::Result<Vec<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await
    }

    async fn category(&self, id: i64) -> sqlx::Result<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT id, type FROM categories WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn count_questions(&self) -> sqlx::Result<i64> {
        sqlx::query_scalar("SELECT COUNT(*) FROM questions")
            .fetch_one(&self.pool)
            .await
    }

    async fn questions_page(&self, offset: i64, limit: i64) -> sqlx::Result<Vec<Question>> {
        sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions ORDER BY id LIMIT ?1 OFFSET ?2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
    }

    async fn search_questions(&self, term: &str) -> sqlx::Result<Vec<Question>> {
        // SQLite's LIKE is case-insensitive for ASCII only.
        sqlx::query_as::<_, Question>(&format!(
            r#"SELECT {QUESTION_COLUMNS} FROM questions WHERE question LIKE ?1 ESCAPE '\' ORDER BY id"#
        ))
        .bind(like_pattern(term))
        .fetch_all(&self.pool)
        .await
    }

    async fn questions_in_category(&self, category: i64) -> sqlx::Result<Vec<Question>> {
        sqlx::query_as::<_, Question>(&format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE category = ?1 ORDER BY id"
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await
    }

    async fn random_question(
        &self,
        category: Option<i64>,
        exclude: &[i64],
    ) -> sqlx::Result<Option<Question>> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {QUESTION_COLUMNS} FROM questions WHERE 1=1"
        ));

        if let Some(category) = category {
            builder.push(" AND category = ");
            builder.push_bind(category);
        }

        if !exclude.is_empty() {
            builder.push(" AND id NOT IN (");
            let mut separated = builder.separated(", ");
            for id in exclude {
                separated.push_bind(*id);
            }
            separated.push_unseparated(")");
        }

        builder.push(" ORDER BY RANDOM() LIMIT 1");

        builder
            .build_query_as::<Question>()
            .fetch_optional(&self.pool)
            .await
    }

    async fn insert_question(&self, new: &CreateQuestionRequest) -> sqlx::Result<i64> {
        let id = sqlx::query(
            r#"
            INSERT INTO questions (question, answer, difficulty, category)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(new.question.as_deref())
        .bind(new.answer.as_deref())
        .bind(new.difficulty)
        .bind(new.category)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(id)
    }

    async fn delete_question(&self, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
