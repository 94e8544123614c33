// src/store/mod.rs

//! Persistence seam. Handlers and the retrieval layer only see
//! [`TriviaStore`]; the backend is chosen once from the database URL.

mod postgres;
mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::migrate::MigrateError;

use crate::{
    config::Config,
    models::{category::Category, question::CreateQuestionRequest, question::Question},
};

pub use postgres::PgStore;
pub use sqlite::SqliteStore;

/// Handle shared by every request for the lifetime of the process.
pub type SharedStore = Arc<dyn TriviaStore>;

/// Queries the trivia service needs. Every method is a single statement.
#[async_trait]
pub trait TriviaStore: Send + Sync {
    /// Applies the embedded migrations for this backend.
    async fn migrate(&self) -> Result<(), MigrateError>;

    /// All categories ordered by id.
    async fn categories(&self) -> sqlx::Result<Vec<Category>>;

    async fn category(&self, id: i64) -> sqlx::Result<Option<Category>>;

    async fn count_questions(&self) -> sqlx::Result<i64>;

    /// Questions in id order, skipping `offset` rows and returning at most `limit`.
    async fn questions_page(&self, offset: i64, limit: i64) -> sqlx::Result<Vec<Question>>;

    /// Case-insensitive substring match on the question text, id order.
    async fn search_questions(&self, term: &str) -> sqlx::Result<Vec<Question>>;

    async fn questions_in_category(&self, category: i64) -> sqlx::Result<Vec<Question>>;

    /// One uniformly random question whose id is not in `exclude`,
    /// restricted to `category` when given.
    async fn random_question(
        &self,
        category: Option<i64>,
        exclude: &[i64],
    ) -> sqlx::Result<Option<Question>>;

    /// Inserts the question and returns the id assigned by the store.
    async fn insert_question(&self, new: &CreateQuestionRequest) -> sqlx::Result<i64>;

    /// Returns `false` when no row had that id.
    async fn delete_question(&self, id: i64) -> sqlx::Result<bool>;
}

/// Opens the backend named by `config.database_url`:
/// `sqlite:` URLs get [`SqliteStore`], anything else [`PgStore`].
pub async fn connect(config: &Config) -> sqlx::Result<SharedStore> {
    let url = config.database_url.as_str();
    if url.starts_with("sqlite:") {
        let store = SqliteStore::connect(url, config.max_connections).await?;
        Ok(Arc::new(store))
    } else {
        let store = PgStore::connect(url, config.max_connections).await?;
        Ok(Arc::new(store))
    }
}

/// Wraps a search term in `%…%`, escaping LIKE wildcards so they match literally.
/// Queries pair this with `ESCAPE '\'`.
pub(crate) fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(ch);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("title"), "%title%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b\\c"), "%a\\_b\\\\c%");
    }
}
