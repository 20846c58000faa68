use marquee::catalog::SearchForm;
use marquee::clients::{CatalogClient, ClientError, SearchState};
use marquee::config::Config;
use marquee::models::MovieInput;
use reqwest::StatusCode;
use std::time::Duration;

const DEFAULT_API_KEY: &str = "marquee_default_api_key_please_regenerate";

async fn spawn_server() -> String {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.server.secure_cookies = false;

    let state = marquee::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let app = marquee::api::router(state).await;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

fn input(title: &str, duration: i32, city: &str) -> MovieInput {
    MovieInput {
        title: title.to_string(),
        duration,
        language: "English".to_string(),
        subtitles: None,
        director: "Villeneuve".to_string(),
        actors: vec!["Zendaya".to_string()],
        min_age: None,
        poster: None,
        start_date: "2024-05-01".to_string(),
        end_date: "2024-05-31".to_string(),
        week_days: vec!["friday".to_string()],
        start_time: "21:00".to_string(),
        city: city.to_string(),
        address: "1 rue du Cinéma".to_string(),
    }
}

#[tokio::test]
async fn test_mutations_invalidate_cached_listing() {
    let base = spawn_server().await;
    let client = CatalogClient::new(&base).unwrap().with_api_key(DEFAULT_API_KEY);

    assert!(client.movies().await.unwrap().is_empty());
    assert!(client.is_cached().await);

    let created = client.create_movie(&input("Dune", 155, "Paris")).await.unwrap();
    assert!(!client.is_cached().await);

    let listing = client.movies().await.unwrap();
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].screenings.len(), 1);

    let id = created.movie.id;
    let updated = client
        .update_movie(&id, &input("Dune: Part Two", 166, "Lyon"))
        .await
        .unwrap();
    assert_eq!(updated.title, "Dune: Part Two");
    assert!(!client.is_cached().await);

    let listing = client.movies().await.unwrap();
    assert_eq!(listing[0].movie.title, "Dune: Part Two");
    assert_eq!(listing[0].screenings[0].city, "Lyon");

    client.delete_movie(&id).await.unwrap();
    assert!(client.movies().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_mutation_keeps_cache() {
    let base = spawn_server().await;
    let anonymous = CatalogClient::new(&base).unwrap();

    anonymous.movies().await.unwrap();

    let err = anonymous
        .create_movie(&input("Dune", 155, "Paris"))
        .await
        .unwrap_err();
    match err {
        ClientError::Status { status, message } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert!(!message.is_empty());
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(anonymous.is_cached().await);

    let err = anonymous.delete_movie("missing").await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status, .. } if status == StatusCode::UNAUTHORIZED));
}

#[tokio::test]
async fn test_search_runs_filter_and_reports_state() {
    let base = spawn_server().await;
    let client = CatalogClient::new(&base)
        .unwrap()
        .with_api_key(DEFAULT_API_KEY)
        .with_search_delay(Duration::from_millis(20));

    client.create_movie(&input("Dune", 155, "Paris")).await.unwrap();
    client.create_movie(&input("Amélie", 122, "Lyon")).await.unwrap();

    let state = client.subscribe();

    let form = SearchForm {
        min_duration: "150".to_string(),
        ..Default::default()
    };
    let results = client.search(&form).await.unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].movie.title, "Dune");
    assert_eq!(*state.borrow(), SearchState::Done(results.clone()));

    let suggestions = client.suggestions().await.unwrap();
    assert_eq!(suggestions.cities, vec!["Lyon", "Paris"]);
}

#[tokio::test]
async fn test_session_login_authorizes_mutations() {
    let base = spawn_server().await;
    let client = CatalogClient::new(&base).unwrap();

    let err = client.login("admin", "wrong").await.unwrap_err();
    assert!(matches!(err, ClientError::Status { status, .. } if status == StatusCode::UNAUTHORIZED));

    client.login("admin", "password").await.unwrap();
    client.create_movie(&input("Dune", 155, "Paris")).await.unwrap();

    assert_eq!(client.movies().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_search_failure_is_published() {
    // Nothing listens on port 9 on the loopback interface.
    let client = CatalogClient::new("http://127.0.0.1:9").unwrap();
    let state = client.subscribe();

    assert!(client.search(&SearchForm::default()).await.is_err());
    assert!(matches!(*state.borrow(), SearchState::Failed(_)));
}

#[tokio::test]
async fn test_configured_search_delay_is_applied() {
    let base = spawn_server().await;

    let mut config = Config::default();
    config.search.artificial_delay_ms = 50;
    let client = CatalogClient::from_config(&base, &config).unwrap();

    // warm the cache so only the delay is timed
    client.movies().await.unwrap();

    let started = std::time::Instant::now();
    client.search(&SearchForm::default()).await.unwrap();

    assert!(started.elapsed() >= Duration::from_millis(50));
}
