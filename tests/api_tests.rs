// tests/api_tests.rs

use serde_json::{Value, json};
use trivia_api::{routes, state::AppState, store::SqliteStore};

/// Spawns the app on a random port, backed by a fresh in-memory database.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    let store = SqliteStore::in_memory()
        .await
        .expect("Failed to open in-memory store");

    let app = routes::create_router(AppState::new(store));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn create_question(
    client: &reqwest::Client,
    address: &str,
    question: &str,
    category: Value,
) -> i64 {
    let body: Value = client
        .post(format!("{}/questions", address))
        .json(&json!({
            "question": question,
            "answer": "an answer",
            "difficulty": 2,
            "category": category
        }))
        .send()
        .await
        .expect("Failed to execute request")
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    body["id"].as_i64().expect("id missing")
}

async fn assert_error(response: reqwest::Response, status: u16, message: &str) {
    assert_eq!(response.status().as_u16(), status);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], status);
    assert_eq!(body["message"], message);
}

#[tokio::test]
async fn unknown_path_is_a_json_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_error(response, 404, "resource not found").await;
}

#[tokio::test]
async fn get_all_categories() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/categories", address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(
        body["categories"],
        json!({
            "1": "Science",
            "2": "Art",
            "3": "Geography",
            "4": "History",
            "5": "Entertainment",
            "6": "Sports"
        })
    );
}

#[tokio::test]
async fn categories_with_wrong_method() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/categories", address))
        .send()
        .await
        .unwrap();

    assert_error(response, 405, "method not allowed").await;
}

#[tokio::test]
async fn paginated_questions() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    for i in 0..12 {
        create_question(&client, &address, &format!("Question {i}"), json!(1)).await;
    }

    let first: Value = client
        .get(format!("{}/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(first["success"], true);
    assert_eq!(first["questions"].as_array().unwrap().len(), 10);
    assert_eq!(first["total_questions"], 12);
    assert_eq!(first["current_category"], "");
    assert_eq!(first["categories"]["1"], "Science");

    let second: Value = client
        .get(format!("{}/questions?page=2", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let texts: Vec<&str> = second["questions"]
        .as_array()
        .unwrap()
        .iter()
        .map(|q| q["question"].as_str().unwrap())
        .collect();
    assert_eq!(texts, vec!["Question 10", "Question 11"]);
    assert_eq!(second["total_questions"], 12);
}

#[tokio::test]
async fn non_numeric_page_means_first_page() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    create_question(&client, &address, "Only question", json!(1)).await;

    let response = client
        .get(format!("{}/questions?page=abc", address))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["questions"][0]["question"], "Only question");
}

#[tokio::test]
async fn page_beyond_the_data_is_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    create_question(&client, &address, "Only question", json!(1)).await;

    let response = client
        .get(format!("{}/questions?page=1000", address))
        .send()
        .await
        .unwrap();

    assert_error(response, 404, "resource not found").await;
}

#[tokio::test]
async fn create_then_delete_question() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let id = create_question(
        &client,
        &address,
        "How many planets are in our solar system?",
        json!("1"),
    )
    .await;

    let response = client
        .delete(format!("{}/questions/{}", address, id))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"success": true, "id": id}));

    let again = client
        .delete(format!("{}/questions/{}", address, id))
        .send()
        .await
        .unwrap();
    assert_error(again, 404, "resource not found").await;
}

#[tokio::test]
async fn delete_non_existent_question() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .delete(format!("{}/questions/1000", address))
        .send()
        .await
        .unwrap();

    assert_error(response, 404, "resource not found").await;
}

#[tokio::test]
async fn create_with_missing_fields_is_unprocessable() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/questions", address))
        .json(&json!({"question": "Where is the answer?"}))
        .send()
        .await
        .unwrap();

    assert_error(response, 422, "unprocessable").await;
}

#[tokio::test]
async fn questions_with_wrong_method() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .put(format!("{}/questions", address))
        .json(&json!({"question": "q", "answer": "a", "difficulty": 1, "category": 1}))
        .send()
        .await
        .unwrap();

    assert_error(response, 405, "method not allowed").await;
}

#[tokio::test]
async fn search_questions() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    create_question(
        &client,
        &address,
        "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?",
        json!(5),
    )
    .await;
    create_question(
        &client,
        &address,
        "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?",
        json!(4),
    )
    .await;

    let body: Value = client
        .post(format!("{}/questions", address))
        .json(&json!({"searchTerm": "TITLE"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["questions"][0]["category"], 4);
    assert_eq!(body["current_category"]["4"], "History");

    let none: Value = client
        .post(format!("{}/questions", address))
        .json(&json!({"searchTerm": "xyzzy"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(none["success"], true);
    assert_eq!(none["questions"], json!([]));
    assert_eq!(none["total_questions"], 0);
}

#[tokio::test]
async fn questions_by_category() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    create_question(&client, &address, "Science question", json!(1)).await;
    create_question(&client, &address, "Art question", json!(2)).await;

    let body: Value = client
        .get(format!("{}/categories/1/questions", address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["success"], true);
    assert_eq!(body["current_category"], "Science");
    assert_eq!(body["total_questions"], 1);
    assert_eq!(body["questions"][0]["question"], "Science question");
}

#[tokio::test]
async fn questions_of_unknown_category_is_404() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/categories/1000/questions", address))
        .send()
        .await
        .unwrap();

    assert_error(response, 404, "resource not found").await;
}

#[tokio::test]
async fn categorical_questions_with_wrong_method() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/categories/1/questions", address))
        .send()
        .await
        .unwrap();

    assert_error(response, 405, "method not allowed").await;
}

#[tokio::test]
async fn play_quiz() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let seen = create_question(&client, &address, "Seen", json!(1)).await;
    let unseen = create_question(&client, &address, "Unseen", json!(1)).await;

    let response = client
        .post(format!("{}/quizzes", address))
        .json(&json!({
            "previous_questions": [seen],
            "quiz_category": {"id": "1", "type": "Science"}
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["question"]["id"], unseen);
}

#[tokio::test]
async fn play_quiz_all_categories() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let only = create_question(&client, &address, "Any category will do", json!(6)).await;

    let response = client
        .post(format!("{}/quizzes", address))
        .json(&json!({
            "previous_questions": [],
            "quiz_category": {"id": 0, "type": "click"}
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["question"]["id"], only);
}

#[tokio::test]
async fn search_with_numeric_term() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    create_question(&client, &address, "What happened in 1996?", json!(4)).await;

    let response = client
        .post(format!("{}/questions", address))
        .json(&json!({"searchTerm": 1996}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total_questions"], 1);
}

#[tokio::test]
async fn play_quiz_exhausted_pool() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();
    let only = create_question(&client, &address, "Only", json!(3)).await;

    let response = client
        .post(format!("{}/quizzes", address))
        .json(&json!({
            "previous_questions": [only],
            "quiz_category": {"id": 3, "type": "Geography"}
        }))
        .send()
        .await
        .unwrap();

    assert_error(response, 404, "no question available").await;
}

#[tokio::test]
async fn play_quiz_with_missing_category() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{}/quizzes", address))
        .json(&json!({"previous_questions": []}))
        .send()
        .await
        .unwrap();

    assert_error(response, 400, "bad request").await;
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .request(reqwest::Method::OPTIONS, format!("{}/questions", address))
        .header("Origin", "http://localhost:3000")
        .header("Access-Control-Request-Method", "DELETE")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
