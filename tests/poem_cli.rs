use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use tokio::process::Command;

const POEM: &str = "A ledger of rhymes,\nsettled in blocks.";

async fn completion_server() -> String {
    let router = Router::new().route(
        "/chat/completions",
        post(|| async {
            Json(json!({
                "id": "cmpl-1",
                "choices": [{
                    "index": 0,
                    "message": {"role": "assistant", "content": POEM},
                    "finish_reason": "stop"
                }]
            }))
        }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn poem_goes_to_stdout_and_logs_to_stderr() {
    let base = completion_server().await;

    let output = Command::new(env!("CARGO_BIN_EXE_poem"))
        .arg("rust")
        .env("OPENROUTER_URL", &base)
        .env("OPENROUTER_KEY", "test-key")
        .env("RUST_LOG", "info")
        .env_remove("COINGECKO_URL")
        .env_remove("HTTP_TIMEOUT_SECS")
        .env_remove("BIND_ADDR")
        .output()
        .await
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(output.status.success(), "stderr: {stderr}");
    assert_eq!(stdout.trim_end(), POEM);
    assert!(stderr.contains("Requesting poem"), "stderr: {stderr}");
    assert!(stderr.contains("COINGECKO_URL is not set"), "stderr: {stderr}");
}
