// src/models/question.rs

use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use serde_json::Value;
use sqlx::prelude::FromRow;

use super::category::CategoryMap;
use crate::error::AppError;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub difficulty: i64,

    /// Id of the owning category. Not checked against `categories` on write.
    pub category: i64,
}

/// DTO for creating a new question.
/// Fields are optional on purpose: whatever the client sends goes to the
/// store, and the store's NOT NULL / CHECK constraints decide.
#[derive(Debug, Default, Deserialize)]
pub struct CreateQuestionRequest {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub difficulty: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub category: Option<i64>,
}

/// DTO for the free-text search.
/// Built from `searchTerm` by [`QuestionsPost::from_body`].
#[derive(Debug)]
pub struct SearchRequest {
    pub search_term: String,
}

/// `POST /questions` serves both creation and search; the presence of a
/// non-null `searchTerm` picks the variant.
#[derive(Debug)]
pub enum QuestionsPost {
    Search(SearchRequest),
    Create(CreateQuestionRequest),
}

impl QuestionsPost {
    pub fn from_body(body: Value) -> Result<Self, AppError> {
        if !body.is_object() {
            return Err(AppError::BadRequest(
                "request body must be a JSON object".to_string(),
            ));
        }

        match body.get("searchTerm") {
            None | Some(Value::Null) => {}
            Some(Value::String(term)) => {
                return Ok(QuestionsPost::Search(SearchRequest {
                    search_term: term.clone(),
                }));
            }
            // Numbers and booleans are searched by their text form.
            Some(term @ (Value::Number(_) | Value::Bool(_))) => {
                return Ok(QuestionsPost::Search(SearchRequest {
                    search_term: term.to_string(),
                }));
            }
            Some(_) => {
                return Err(AppError::Unprocessable(
                    "searchTerm must be a string".to_string(),
                ));
            }
        }

        let create =
            serde_json::from_value(body).map_err(|e| AppError::Unprocessable(e.to_string()))?;
        Ok(QuestionsPost::Create(create))
    }
}

/// `GET /questions`
#[derive(Debug, Serialize)]
pub struct QuestionPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub categories: CategoryMap,
    pub current_category: String,
    pub total_questions: i64,
}

/// `POST /questions` with a search term. `current_category` holds the full
/// category mapping, which is what existing clients expect.
#[derive(Debug, Serialize)]
pub struct SearchResults {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: CategoryMap,
}

/// `GET /categories/{id}/questions`
#[derive(Debug, Serialize)]
pub struct CategoryQuestions {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}
