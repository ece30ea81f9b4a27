use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::info;

use crate::error::Result;
use crate::models::{HistoryEntry, QuizRequest, QuizResponse, StoredQuiz};
use crate::{quiz, service, AppState};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // Liveness
        .route("/", get(root))
        .route("/generate_quiz/", post(generate_quiz))
        .route("/history", get(history))
        .route("/quiz/:id", get(quiz_by_id))
        .with_state(state)
}

pub async fn serve(state: AppState) -> anyhow::Result<()> {
    let address = state.settings.bind_address.clone();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, create_routes(state)).await?;
    Ok(())
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Backend is running" }))
}

/// Options are reshuffled on every response; the stored order never changes.
async fn generate_quiz(
    State(state): State<AppState>,
    body: std::result::Result<Json<QuizRequest>, JsonRejection>,
) -> Result<Json<QuizResponse>> {
    let Json(request) = body?;
    let record = service::generate(&state, &request.url).await?;
    let mut response = QuizResponse::from_record(&record);
    response.quiz = quiz::shuffled(&record.questions);
    Ok(Json(response))
}

async fn history(State(state): State<AppState>) -> Result<Json<Vec<HistoryEntry>>> {
    Ok(Json(service::history(&state, None).await?))
}

async fn quiz_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<StoredQuiz>> {
    let record = service::quiz_by_id(&state, id).await?;
    Ok(Json(record.into()))
}
