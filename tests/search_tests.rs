use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use marquee::config::Config;
use serde_json::{Value, json};
use tower::ServiceExt;

const DEFAULT_API_KEY: &str = "marquee_default_api_key_please_regenerate";

async fn spawn_app() -> Router {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();

    let state = marquee::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    marquee::api::router(state).await
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

async fn add_movie(
    app: &Router,
    title: &str,
    director: &str,
    language: &str,
    duration: i32,
    city: &str,
) {
    let body = json!({
        "title": title,
        "duration": duration,
        "language": language,
        "director": director,
        "actors": [],
        "startDate": "2024-05-01",
        "endDate": "2024-05-31",
        "weekDays": ["friday"],
        "startTime": "20:00",
        "city": city,
        "address": "Place du Cinéma"
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/movies")
                .header("Content-Type", "application/json")
                .header("X-Api-Key", DEFAULT_API_KEY)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn seeded_app() -> Router {
    let app = spawn_app().await;
    add_movie(&app, "Dune", "Villeneuve", "English", 155, "Paris").await;
    add_movie(&app, "Amélie", "Jeunet", "Français", 122, "Lyon").await;
    app
}

fn titles(body: &Value) -> Vec<&str> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|m| m["title"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_empty_search_returns_everything() {
    let app = seeded_app().await;

    let (status, all) = get_json(&app, "/api/movies").await;
    assert_eq!(status, StatusCode::OK);

    let (status, searched) = get_json(&app, "/api/movies/search").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(searched, all);
}

#[tokio::test]
async fn test_search_by_term_city_and_duration() {
    let app = seeded_app().await;

    let (_, body) = get_json(&app, "/api/movies/search?q=dune").await;
    assert_eq!(titles(&body), vec!["Dune"]);

    let (_, body) = get_json(&app, "/api/movies/search?cityInput=lyon").await;
    assert_eq!(titles(&body), vec!["Amélie"]);

    let (_, body) = get_json(&app, "/api/movies/search?minDuration=150").await;
    assert_eq!(titles(&body), vec!["Dune"]);

    let (_, body) = get_json(&app, "/api/movies/search?minDuration=abc").await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_selected_city_wins_over_typed_city() {
    let app = seeded_app().await;

    let (_, body) = get_json(&app, "/api/movies/search?city=Paris&cityInput=lyon").await;
    assert_eq!(titles(&body), vec!["Dune"]);
}

#[tokio::test]
async fn test_criteria_are_combined() {
    let app = seeded_app().await;

    let (_, body) = get_json(
        &app,
        "/api/movies/search?languageInput=fran&maxDuration=130&q=jeunet",
    )
    .await;
    assert_eq!(titles(&body), vec!["Amélie"]);

    let (_, body) = get_json(&app, "/api/movies/search?q=dune&city=Lyon").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_suggestions_are_sorted_and_distinct() {
    let app = seeded_app().await;
    add_movie(&app, "Arrival", "Villeneuve", "English", 116, "Paris").await;

    let (status, body) = get_json(&app, "/api/movies/suggestions").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cities"], json!(["Lyon", "Paris"]));
    assert_eq!(body["languages"], json!(["English", "Français"]));
}
