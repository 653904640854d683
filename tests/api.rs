mod common;

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};

use jparty_back::{
    config::{AppConfig, Settings},
    dto::{
        game::{GameSnapshot, RandomGameResponse},
        health::HealthResponse,
        host::FlowSnapshot,
        phase::PhaseSnapshot,
    },
    retrieve::{GameRetriever, SourceConfig},
    routes,
    state::AppState,
};

async fn spawn_app(settings: Settings) -> String {
    let upstream = common::spawn_upstream().await;
    let sources = SourceConfig::single_host(upstream);
    let retriever = GameRetriever::new(sources.clone()).unwrap();
    let state = AppState::new(AppConfig::new(settings, sources), Arc::new(retriever));
    common::serve(routes::router(state)).await
}

async fn post_event(client: &Client, base: &str, event: Value) -> reqwest::Response {
    client
        .post(format!("{base}/game/events"))
        .json(&event)
        .send()
        .await
        .unwrap()
}

#[tokio::test]
async fn healthcheck_reports_loaded_game() {
    let base = spawn_app(Settings::default()).await;
    let client = Client::new();

    let health: HealthResponse = client
        .get(format!("{base}/healthcheck"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health.status, "ok");
    assert!(!health.game_loaded);

    let response = client.post(format!("{base}/games/1234/load")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let health: HealthResponse = client
        .get(format!("{base}/healthcheck"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(health.game_loaded);
}

#[tokio::test]
async fn load_game_returns_snapshot() {
    let base = spawn_app(Settings::default()).await;
    let client = Client::new();

    let response = client.post(format!("{base}/games/1234/load")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let snapshot: GameSnapshot = response.json().await.unwrap();
    assert_eq!(snapshot.game_id, "1234");
    assert_eq!(snapshot.comments, common::REPLAYED_COMMENTS);
    assert_eq!(snapshot.boards.len(), 2);
    assert_eq!(snapshot.final_round.category, "AUTHORS");

    let current: GameSnapshot = client
        .get(format!("{base}/game"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(current.game_id, "1234");
}

#[tokio::test]
async fn load_errors_map_to_status_codes() {
    let base = spawn_app(Settings::default()).await;
    let client = Client::new();

    let incomplete = client.post(format!("{base}/games/888/load")).send().await.unwrap();
    assert_eq!(incomplete.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = incomplete.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().contains("try another game"));

    let missing = client.post(format!("{base}/games/999/load")).send().await.unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let invalid = client.post(format!("{base}/games/12%2034/load")).send().await.unwrap();
    assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);

    let no_game = client.get(format!("{base}/game")).send().await.unwrap();
    assert_eq!(no_game.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn random_game_reads_front_page() {
    let base = spawn_app(Settings::default()).await;
    let random: RandomGameResponse = Client::new()
        .get(format!("{base}/games/random"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(random.game_id, "8123");
}

#[tokio::test]
async fn host_drives_a_clue_and_scores() {
    let base = spawn_app(Settings {
        allow_negative: false,
        ..Settings::default()
    })
    .await;
    let client = Client::new();
    client.post(format!("{base}/games/1234/load")).send().await.unwrap();

    let response = post_event(&client, &base, json!({"type": "start"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_event(
        &client,
        &base,
        json!({"type": "reveal_clue", "category": 0, "row": 3}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_event(
        &client,
        &base,
        json!({"type": "judge", "player": "ann", "correct": false}),
    )
    .await;
    let snapshot: FlowSnapshot = response.json().await.unwrap();
    assert_eq!(snapshot.scores[0].score, 0);

    let response = post_event(
        &client,
        &base,
        json!({"type": "judge", "player": "bob", "correct": true}),
    )
    .await;
    let snapshot: FlowSnapshot = response.json().await.unwrap();
    assert!(matches!(snapshot.phase, PhaseSnapshot::Answer { row: 3, .. }));
    assert_eq!(snapshot.scores[1].player, "bob");
    assert_eq!(snapshot.scores[1].score, 800);

    let response = post_event(&client, &base, json!({"type": "return_to_board"})).await;
    assert_eq!(response.status(), StatusCode::OK);

    let again = post_event(
        &client,
        &base,
        json!({"type": "reveal_clue", "category": 0, "row": 3}),
    )
    .await;
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let blank = post_event(
        &client,
        &base,
        json!({"type": "judge", "player": " ", "correct": true}),
    )
    .await;
    assert_eq!(blank.status(), StatusCode::BAD_REQUEST);

    let flow: FlowSnapshot = client
        .get(format!("{base}/game/flow"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(matches!(flow.phase, PhaseSnapshot::Board { .. }));
}

#[tokio::test]
async fn clue_without_image_is_not_found() {
    let base = spawn_app(Settings::default()).await;
    let client = Client::new();
    client.post(format!("{base}/games/1234/load")).send().await.unwrap();

    let response = client
        .get(format!("{base}/game/rounds/single/clues/0/0/image"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = client.get(format!("{base}/game/final/image")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn settings_and_docs_are_served() {
    let base = spawn_app(Settings::default()).await;
    let client = Client::new();

    let settings: Value = client
        .get(format!("{base}/settings"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(settings["theme"], "Default");
    assert_eq!(settings["show_text_with_images"], "Show both");
    assert_eq!(settings["early_buzz_timeout_ms"], 500);

    let doc: Value = client
        .get(format!("{base}/api-doc/openapi.json"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(doc["paths"]["/games/{id}/load"].is_object());
}
