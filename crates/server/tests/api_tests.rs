use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chess_core::Color;
use chess_server::{build_router, AppState, ServerConfig};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

/// One client directory for the whole test binary, under cargo's target tmpdir.
fn static_dir() -> &'static Path {
    static DIR: OnceLock<PathBuf> = OnceLock::new();
    DIR.get_or_init(|| {
        let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join("chess-server-client");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("index.html"), "<html>chess client</html>").unwrap();
        std::fs::write(dir.join("app.js"), "console.log('board');").unwrap();
        dir
    })
}

fn app_with(agent_color: Color) -> (Router, AppState) {
    let config = ServerConfig {
        static_dir: static_dir().to_path_buf(),
        agent_color,
        ..ServerConfig::default()
    };
    let state = AppState::new(config);
    (build_router(state.clone()), state)
}

fn app() -> Router {
    app_with(Color::Black).0
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn send_raw(app: &Router, req: Request<Body>) -> (StatusCode, Vec<u8>) {
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, bytes) = send_raw(app, req).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn new_game(app: &Router) -> (String, Value) {
    let (status, body) = send(app, post_json("/api/games", json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    (body["id"].as_str().unwrap().to_string(), body)
}

fn square(row: i64, col: i64) -> Value {
    json!({ "row": row, "col": col })
}

fn move_body(from: (i64, i64), to: (i64, i64)) -> Value {
    json!({ "from": square(from.0, from.1), "to": square(to.0, to.1) })
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), get("/api/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok", "service": "chess-ai" }));
}

#[tokio::test]
async fn test_unknown_api_path_is_json_404() {
    let (status, body) = send(&app(), get("/api/nope")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_static_files_and_spa_fallback() {
    let app = app();

    let (status, bytes) = send_raw(&app, get("/app.js")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"console.log('board');");

    let (status, bytes) = send_raw(&app, get("/play/some-route")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"<html>chess client</html>");
}

#[tokio::test]
async fn test_create_and_fetch_game() {
    let app = app();
    let (id, created) = new_game(&app).await;
    assert_eq!(created["side_to_move"], "white");
    assert_eq!(created["status"]["state"], "ongoing");
    assert_eq!(created["agent_color"], "black");
    assert_eq!(created["agent_thinking"], false);
    assert_eq!(created["board"][7][4], json!({ "color": "white", "kind": "king" }));
    assert_eq!(created["board"][4][4], Value::Null);
    assert_eq!(created["castling_rights"]["white"]["kingside"], true);

    let (status, fetched) = send(&app, get(&format!("/api/games/{id}"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_unknown_game_is_404() {
    let app = app();
    let id = Uuid::new_v4();
    let (status, body) = send(&app, get(&format!("/api/games/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not found"));

    let (status, _) = send(&app, delete(&format!("/api/games/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_legal_move_probe() {
    let app = app();
    let (id, _) = new_game(&app).await;

    let (status, body) = send(&app, get(&format!("/api/games/{id}/moves?row=6&col=4"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["from"], square(6, 4));
    let moves = body["moves"].as_array().unwrap();
    assert_eq!(moves.len(), 2);
    assert!(moves.contains(&square(5, 4)));
    assert!(moves.contains(&square(4, 4)));

    // Black pawn while white is to move
    let (_, body) = send(&app, get(&format!("/api/games/{id}/moves?row=1&col=4"))).await;
    assert_eq!(body["moves"], json!([]));

    // Off the board
    let (status, body) = send(&app, get(&format!("/api/games/{id}/moves?row=-1&col=9"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["from"], Value::Null);
    assert_eq!(body["moves"], json!([]));
}

#[tokio::test]
async fn test_rejected_moves() {
    let app = app();
    let (id, _) = new_game(&app).await;
    let uri = format!("/api/games/{id}/moves");

    // e2e5
    let (status, body) = send(&app, post_json(&uri, move_body((6, 4), (3, 4)))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    // Black piece on white's turn
    let (status, _) = send(&app, post_json(&uri, move_body((1, 4), (3, 4)))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Empty square
    let (status, _) = send(&app, post_json(&uri, move_body((4, 4), (3, 4)))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // Off-board coordinates never reach the rules engine
    let (status, body) = send(&app, post_json(&uri, move_body((6, 4), (8, 4)))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("off the board"));

    let (_, game) = send(&app, get(&format!("/api/games/{id}"))).await;
    assert_eq!(game["history"], json!([]));
}

#[tokio::test(start_paused = true)]
async fn test_agent_replies_after_delay() {
    let app = app();
    let (id, _) = new_game(&app).await;
    let uri = format!("/api/games/{id}/moves");

    let (status, body) = send(&app, post_json(&uri, move_body((6, 4), (4, 4)))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["side_to_move"], "black");
    assert_eq!(body["history"], json!(["e2e4"]));
    assert_eq!(body["last_move"], json!({ "from": square(6, 4), "to": square(4, 4) }));
    assert_eq!(body["agent_thinking"], true);
    assert!(body["agent_flash"].is_object());
    let flashed = body["agent_flash"].clone();

    // Human cannot move while the agent is thinking
    let (status, _) = send(&app, post_json(&uri, move_body((6, 3), (4, 3)))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    tokio::time::sleep(Duration::from_millis(1600)).await;
    let (_, body) = send(&app, get(&format!("/api/games/{id}"))).await;
    assert_eq!(body["side_to_move"], "white");
    assert_eq!(body["agent_thinking"], false);
    assert_eq!(body["history"].as_array().unwrap().len(), 2);
    assert_eq!(body["last_move"], flashed);
    assert_eq!(body["agent_flash"], flashed);

    tokio::time::sleep(Duration::from_millis(500)).await;
    let (_, body) = send(&app, get(&format!("/api/games/{id}"))).await;
    assert_eq!(body["agent_flash"], Value::Null);
    assert_eq!(body["last_move"], flashed);
}

#[tokio::test(start_paused = true)]
async fn test_agent_as_white_moves_first() {
    let (app, _) = app_with(Color::White);
    let (id, created) = new_game(&app).await;
    assert_eq!(created["agent_thinking"], true);

    let uri = format!("/api/games/{id}/moves");
    let (status, _) = send(&app, post_json(&uri, move_body((6, 4), (4, 4)))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    tokio::time::sleep(Duration::from_millis(1600)).await;
    let (_, body) = send(&app, get(&format!("/api/games/{id}"))).await;
    assert_eq!(body["side_to_move"], "black");
    assert_eq!(body["history"].as_array().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_delete_cancels_pending_agent_move() {
    let (app, state) = app_with(Color::Black);
    let (id, _) = new_game(&app).await;

    let (status, _) = send(
        &app,
        post_json(&format!("/api/games/{id}/moves"), move_body((6, 3), (4, 3))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, delete(&format!("/api/games/{id}"))).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    tokio::time::sleep(Duration::from_millis(3000)).await;
    assert!(state.sessions.lock().await.is_empty());

    let (status, _) = send(&app, get(&format!("/api/games/{id}"))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_malformed_bodies_answer_json() {
    let app = app();
    let (id, _) = new_game(&app).await;
    let uri = format!("/api/games/{id}/moves");

    // Missing field
    let (status, body) = send(&app, post_json(&uri, json!({ "from": square(6, 4) }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].is_string());

    // Not JSON at all
    let req = Request::builder()
        .method("POST")
        .uri(&uri)
        .header("content-type", "application/json")
        .body(Body::from("e2e4"))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // No content type
    let req = Request::builder()
        .method("POST")
        .uri(&uri)
        .body(Body::from(move_body((6, 4), (4, 4)).to_string()))
        .unwrap();
    let (status, body) = send(&app, req).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unparseable_probes_return_empty_list() {
    let app = app();
    let (id, _) = new_game(&app).await;

    for query in [
        "row=99999999999999999999&col=0",
        "row=1",
        "col=4",
        "",
        "row=six&col=4",
        "row=&col=",
    ] {
        let (status, body) = send(&app, get(&format!("/api/games/{id}/moves?{query}"))).await;
        assert_eq!(status, StatusCode::OK, "query {query:?}");
        assert_eq!(body["from"], Value::Null, "query {query:?}");
        assert_eq!(body["moves"], json!([]), "query {query:?}");
    }

    // No query string at all
    let (status, body) = send(&app, get(&format!("/api/games/{id}/moves"))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["moves"], json!([]));
}

#[tokio::test]
async fn test_malformed_game_id_is_json_404() {
    let app = app();
    let (status, body) = send(&app, get("/api/games/not-a-uuid")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("not-a-uuid"));

    let (status, body) = send(
        &app,
        post_json("/api/games/not-a-uuid/moves", move_body((6, 4), (4, 4))),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}
