use std::net::SocketAddr;

use axum::{http::StatusCode, response::Html, routing::get, Router};
use wiki_quiz::config::Settings;
use wiki_quiz::AppState;

pub struct TestApp {
    pub state: AppState,
    pub source: SocketAddr,
    _dir: tempfile::TempDir,
}

impl TestApp {
    pub fn article_url(&self, name: &str) -> String {
        format!("http://{}/wiki/{}", self.source, name)
    }

    pub fn router(&self) -> Router {
        wiki_quiz::router(self.state.clone())
    }
}

/// Serves fixture pages under `/wiki/`; anything else is a 404.
async fn start_article_server() -> SocketAddr {
    let fixture = std::fs::read_to_string("tests/fixtures/ada_lovelace.html")
        .expect("fixture should exist");
    let app = Router::new()
        .route("/wiki/Ada_Lovelace", get(move || async move { Html(fixture) }))
        .route(
            "/wiki/Stub",
            get(|| async {
                Html(r#"<html><body><h1 id="firstHeading">Stub</h1><div id="mw-content-text"></div></body></html>"#)
            }),
        )
        .route("/wiki/Broken", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
        .route(
            "/wiki/Slow",
            get(|| async {
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
                Html("<html><body><h1>Slow</h1></body></html>")
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture server");
    let addr = listener.local_addr().expect("fixture server address");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fixture server");
    });
    addr
}

pub async fn test_app() -> TestApp {
    test_app_with_timeout(5).await
}

pub async fn test_app_with_timeout(fetch_timeout_secs: u64) -> TestApp {
    let dir = tempfile::tempdir().expect("temp dir");
    let source = start_article_server().await;
    let settings = Settings {
        database_path: dir.path().join("quiz.sqlite"),
        source_host: "127.0.0.1".to_string(),
        source_port: Some(source.port()),
        fetch_timeout_secs,
        ..Settings::default()
    };
    let state = AppState::new(settings).expect("app state");
    TestApp {
        state,
        source,
        _dir: dir,
    }
}
