// src/retrieval.rs

//! Question retrieval and quiz selection.
//!
//! Turns request parameters into store calls and formats the results.
//! Handlers stay thin; every status-code decision lives here or in
//! [`AppError`].

use crate::{
    error::AppError,
    models::{
        category::{CategoriesResponse, CategoryMap, category_map},
        question::{
            CategoryQuestions, CreateQuestionRequest, Question, QuestionPage, SearchRequest,
            SearchResults,
        },
        quiz::QuizRequest,
    },
    store::TriviaStore,
};

pub const QUESTIONS_PER_PAGE: i64 = 10;

/// 1-indexed page of the question listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page(i64);

impl Page {
    pub fn new(number: i64) -> Self {
        Page(number)
    }

    /// Absent or non-numeric input means page 1.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|p| p.trim().parse::<i64>().ok())
            .map(Page)
            .unwrap_or_default()
    }

    pub fn number(&self) -> i64 {
        self.0
    }

    /// `(offset, limit)` covering `[(p-1)*S, p*S)`.
    /// `None` when no item can fall inside the window (p < 1, or overflow).
    pub fn window(&self) -> Option<(i64, i64)> {
        if self.0 < 1 {
            return None;
        }
        let offset = (self.0 - 1).checked_mul(QUESTIONS_PER_PAGE)?;
        Some((offset, QUESTIONS_PER_PAGE))
    }
}

impl Default for Page {
    fn default() -> Self {
        Page(1)
    }
}

pub async fn category_mapping(store: &dyn TriviaStore) -> Result<CategoryMap, AppError> {
    let categories = store.categories().await.map_err(|e| {
        tracing::error!("Failed to fetch categories: {:?}", e);
        AppError::from(e)
    })?;
    Ok(category_map(categories))
}

pub async fn list_categories(store: &dyn TriviaStore) -> Result<CategoriesResponse, AppError> {
    Ok(CategoriesResponse {
        success: true,
        categories: category_mapping(store).await?,
    })
}

/// One page of questions plus the total count across all pages.
/// An empty page is a not-found.
pub async fn list_questions(store: &dyn TriviaStore, page: Page) -> Result<QuestionPage, AppError> {
    let (offset, limit) = page
        .window()
        .ok_or_else(|| AppError::NotFound(format!("page {} is out of range", page.number())))?;

    let questions = store.questions_page(offset, limit).await.map_err(|e| {
        tracing::error!("Failed to fetch questions page: {:?}", e);
        AppError::from(e)
    })?;

    if questions.is_empty() {
        return Err(AppError::NotFound(format!(
            "page {} has no questions",
            page.number()
        )));
    }

    let total_questions = store.count_questions().await?;
    let categories = category_mapping(store).await?;

    Ok(QuestionPage {
        success: true,
        questions,
        categories,
        current_category: String::new(),
        total_questions,
    })
}

/// Every question whose text contains the term, ignoring case. Unpaginated;
/// no matches is still a success.
pub async fn search_questions(
    store: &dyn TriviaStore,
    request: &SearchRequest,
) -> Result<SearchResults, AppError> {
    let questions = store
        .search_questions(&request.search_term)
        .await
        .map_err(|e| {
            tracing::error!("Failed to search questions: {:?}", e);
            AppError::from(e)
        })?;

    Ok(SearchResults {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: category_mapping(store).await?,
    })
}

/// All questions of one category, unpaginated, with the category's label.
pub async fn questions_in_category(
    store: &dyn TriviaStore,
    category_id: i64,
) -> Result<CategoryQuestions, AppError> {
    let category = store
        .category(category_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("category {category_id} does not exist")))?;

    let questions = store.questions_in_category(category.id).await.map_err(|e| {
        tracing::error!("Failed to fetch questions of category {}: {:?}", category.id, e);
        AppError::from(e)
    })?;

    Ok(CategoryQuestions {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: category.kind,
    })
}

/// Inserts whatever the client sent; the store's constraints reject bad rows.
pub async fn create_question(
    store: &dyn TriviaStore,
    request: &CreateQuestionRequest,
) -> Result<i64, AppError> {
    let id = store.insert_question(request).await.map_err(|e| {
        tracing::error!("Failed to create question: {:?}", e);
        AppError::Unprocessable(e.to_string())
    })?;

    tracing::info!("Created question {}", id);
    Ok(id)
}

/// Deletes by id. A missing id is a not-found; a store failure is unprocessable.
pub async fn delete_question(store: &dyn TriviaStore, id: i64) -> Result<i64, AppError> {
    let deleted = store.delete_question(id).await.map_err(|e| {
        tracing::error!("Failed to delete question {}: {:?}", id, e);
        AppError::Unprocessable(e.to_string())
    })?;

    if !deleted {
        return Err(AppError::NotFound(format!("question {id} does not exist")));
    }

    tracing::info!("Deleted question {}", id);
    Ok(id)
}

/// Draws a random unseen question from the requested category, falling back
/// to every category once that one is exhausted.
pub async fn draw_quiz_question(
    store: &dyn TriviaStore,
    request: &QuizRequest,
) -> Result<Question, AppError> {
    let category = request
        .quiz_category
        .as_ref()
        .ok_or_else(|| AppError::BadRequest("quiz_category is required".to_string()))?;

    let seen = request.previous_questions.as_deref().unwrap_or_default();

    if let Some(question) = store.random_question(Some(category.id), seen).await? {
        return Ok(question);
    }

    tracing::debug!(
        "Category {} exhausted after {} questions, drawing from all categories",
        category.id,
        seen.len()
    );

    store
        .random_question(None, seen)
        .await?
        .ok_or(AppError::NoQuestionAvailable)
}
