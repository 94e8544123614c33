// src/models/quiz.rs

use serde::Deserialize;
use serde_aux::field_attributes::deserialize_number_from_string;

use super::question::Question;

/// Body of `POST /quizzes`.
#[derive(Debug, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Option<Vec<i64>>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

/// Which category to draw from. Clients send the id as a number or a
/// numeric string; the label is informational.
#[derive(Debug, Clone, Deserialize)]
pub struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, serde::Serialize)]
pub struct QuizResponse {
    pub success: bool,
    pub question: Question,
}
