mod common;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(v) => {
            req = req.header("content-type", "application/json");
            Body::from(v.to_string())
        }
        None => Body::empty(),
    };
    let resp = app
        .clone()
        .oneshot(req.body(body).expect("request build should succeed"))
        .await
        .expect("router should respond");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

fn sorted_options(question: &Value) -> Vec<String> {
    let mut v: Vec<String> = question["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o.as_str().unwrap().to_string())
        .collect();
    v.sort();
    v
}

#[tokio::test]
async fn root_reports_liveness() {
    let app = common::test_app().await;
    let (status, body) = send(&app.router(), Method::GET, "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Backend is running" }));
}

#[tokio::test]
async fn generate_quiz_scrapes_and_stores() {
    let app = common::test_app().await;
    let url = app.article_url("Ada_Lovelace");
    let (status, body) = send(&app.router(), Method::POST, "/generate_quiz/", Some(json!({ "url": url }))).await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["url"], url.as_str());
    assert_eq!(body["title"], "Ada Lovelace");
    assert!(body["summary"]
        .as_str()
        .unwrap()
        .starts_with("Augusta Ada King, Countess of Lovelace was an English mathematician"));
    assert_eq!(
        body["related_topics"],
        json!(["Biography", "Early life", "Work", "Legacy", "References"])
    );

    let quiz = body["quiz"].as_array().unwrap();
    assert_eq!(quiz.len(), 5);
    for q in quiz {
        let options = q["options"].as_array().unwrap();
        assert_eq!(options.len(), 4);
        assert_eq!(options.iter().filter(|o| **o == q["answer"]).count(), 1);
        assert_eq!(q["difficulty"], "medium");
        assert!(q["question"].as_str().unwrap().contains("\"Ada Lovelace\""));
    }
    assert_eq!(
        quiz[0]["answer"],
        "Augusta Ada King, Countess of Lovelace was an English mathematician and writer."
    );
}

#[tokio::test]
async fn repeat_requests_return_cached_content() {
    let app = common::test_app().await;
    let router = app.router();
    let url = app.article_url("Ada_Lovelace");

    let (_, first) = send(&router, Method::POST, "/generate_quiz/", Some(json!({ "url": url }))).await;
    let (status, second) = send(&router, Method::POST, "/generate_quiz/", Some(json!({ "url": url }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["id"], second["id"]);
    assert_eq!(first["title"], second["title"]);
    assert_eq!(first["summary"], second["summary"]);
    assert_eq!(first["related_topics"], second["related_topics"]);

    let a = first["quiz"].as_array().unwrap();
    let b = second["quiz"].as_array().unwrap();
    assert_eq!(a.len(), b.len());
    for (qa, qb) in a.iter().zip(b) {
        assert_eq!(qa["answer"], qb["answer"]);
        assert_eq!(qa["question"], qb["question"]);
        assert_eq!(sorted_options(qa), sorted_options(qb));
    }

    let (_, history) = send(&router, Method::GET, "/history", None).await;
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn non_article_url_is_rejected() {
    let app = common::test_app().await;
    let (status, body) = send(
        &app.router(),
        Method::POST,
        "/generate_quiz/",
        Some(json!({ "url": "https://example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("article URLs are supported"));
}

#[tokio::test]
async fn unfetchable_article_is_a_client_error() {
    let app = common::test_app().await;
    let router = app.router();
    for name in ["Missing_Page", "Broken"] {
        let (status, body) = send(
            &router,
            Method::POST,
            "/generate_quiz/",
            Some(json!({ "url": app.article_url(name) })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{name}");
        assert!(body["detail"].as_str().unwrap().starts_with("Failed to fetch article"));
    }
    let (_, history) = send(&router, Method::GET, "/history", None).await;
    assert_eq!(history, json!([]));
}

#[tokio::test]
async fn article_without_sentences_stores_empty_quiz() {
    let app = common::test_app().await;
    let (status, body) = send(
        &app.router(),
        Method::POST,
        "/generate_quiz/",
        Some(json!({ "url": app.article_url("Stub") })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Stub");
    assert_eq!(body["summary"], "");
    assert_eq!(body["quiz"], json!([]));
}

#[tokio::test]
async fn history_lists_newest_first() {
    let app = common::test_app().await;
    let router = app.router();
    let first = app.article_url("Ada_Lovelace");
    let second = app.article_url("Stub");
    send(&router, Method::POST, "/generate_quiz/", Some(json!({ "url": first }))).await;
    send(&router, Method::POST, "/generate_quiz/", Some(json!({ "url": second }))).await;

    let (status, history) = send(&router, Method::GET, "/history", None).await;
    assert_eq!(status, StatusCode::OK);
    let rows = history.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["url"], second.as_str());
    assert_eq!(rows[1]["url"], first.as_str());
    assert!(rows[0]["date_generated"].is_string());
    assert!(rows[0].get("summary").is_none());
}

#[tokio::test]
async fn stored_quiz_is_returned_by_id() {
    let app = common::test_app().await;
    let router = app.router();
    let url = app.article_url("Ada_Lovelace");
    let (_, created) = send(&router, Method::POST, "/generate_quiz/", Some(json!({ "url": url }))).await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(&router, Method::GET, &format!("/quiz/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Ada Lovelace");
    let stored = body["full_quiz_data"]["quiz"].as_array().unwrap();
    assert_eq!(stored.len(), 5);
    // stored order: correct answer first
    for q in stored {
        assert_eq!(q["options"][0], q["answer"]);
    }
    assert_eq!(body["full_quiz_data"]["related_topics"][0], "Biography");
}

#[tokio::test]
async fn unknown_quiz_id_is_404() {
    let app = common::test_app().await;
    let (status, body) = send(&app.router(), Method::GET, "/quiz/4242", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Quiz not found");
}

#[tokio::test]
async fn concurrent_first_requests_share_one_record() {
    let app = common::test_app().await;
    let url = app.article_url("Ada_Lovelace");
    let (a, b) = tokio::join!(
        wiki_quiz::service::generate(&app.state, &url),
        wiki_quiz::service::generate(&app.state, &url),
    );
    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.id, b.id);
    assert_eq!(a.questions, b.questions);

    let history = wiki_quiz::service::history(&app.state, None).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn slow_article_times_out_without_storing() {
    let app = common::test_app_with_timeout(1).await;
    let router = app.router();
    let started = std::time::Instant::now();
    let (status, body) = send(
        &router,
        Method::POST,
        "/generate_quiz/",
        Some(json!({ "url": app.article_url("Slow") })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["detail"]
            .as_str()
            .unwrap()
            .starts_with("Failed to fetch article: request timed out"),
        "{body}"
    );
    assert!(started.elapsed() < std::time::Duration::from_secs(4));

    let (_, history) = send(&router, Method::GET, "/history", None).await;
    assert_eq!(history, json!([]));
}

#[tokio::test]
async fn malformed_body_gets_detail_json() {
    let app = common::test_app().await;
    let (status, body) = send(&app.router(), Method::POST, "/generate_quiz/", Some(json!({ "link": "x" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].as_str().unwrap().contains("url"), "{body}");
}
