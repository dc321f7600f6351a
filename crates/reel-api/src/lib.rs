//! JSON REST API for Reel.
//!
//! Exposes an axum [`Router`] backed by any [`reel_core::store::MovieStore`].
//! CORS, tracing, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .merge(reel_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod movies;

use std::sync::Arc;

use axum::{Json, Router, routing::get};
use reel_core::store::MovieStore;
use serde_json::{Value, json};

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: MovieStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/", get(index))
    .route("/movies", get(movies::list::<S>).post(movies::create::<S>))
    .route(
      "/movies/{id}",
      get(movies::get_one::<S>)
        .patch(movies::update::<S>)
        .delete(movies::delete_one::<S>),
    )
    .with_state(store)
}

/// `GET /`
async fn index() -> Json<Value> { Json(json!({ "message": "Hola mundo" })) }

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use reel_core::{
    movie::{Genre, NewMovie},
    store::MovieStore,
  };
  use reel_store_memory::MemoryStore;
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn oneshot_json(
    store: Arc<MemoryStore>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = api_router(store)
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();

    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  fn scenario_body() -> Value {
    json!({
      "title": "X",
      "year": 2000,
      "director": "D",
      "duration": 90,
      "poster": "https://x.com/p.png",
      "genre": ["Drama"],
    })
  }

  async fn seeded(genres: &[Genre]) -> (Arc<MemoryStore>, Vec<Uuid>) {
    let store = Arc::new(MemoryStore::new());
    let mut ids = Vec::new();
    for (i, genre) in genres.iter().enumerate() {
      let movie = store
        .insert(NewMovie {
          title:    format!("Movie {i}"),
          year:     2000,
          director: "D".into(),
          duration: 100,
          rate:     7,
          poster:   "https://x.com/p.png".into(),
          genre:    vec![*genre],
        })
        .await
        .unwrap();
      ids.push(movie.id);
    }
    (store, ids)
  }

  // ── Root ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn index_returns_message() {
    let (status, body) =
      oneshot_json(Arc::new(MemoryStore::new()), "GET", "/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].is_string());
  }

  // ── Create ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_with_id_and_default_rate() {
    let store = Arc::new(MemoryStore::new());
    let (status, body) =
      oneshot_json(store.clone(), "POST", "/movies", Some(scenario_body()))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(Uuid::parse_str(body["id"].as_str().unwrap()).is_ok());
    assert_eq!(body["rate"], 5);
    assert_eq!(body["title"], "X");
    assert_eq!(body["genre"], json!(["Drama"]));
    assert_eq!(store.len().await, 1);
  }

  #[tokio::test]
  async fn create_with_bad_year_returns_400_listing_year() {
    let store = Arc::new(MemoryStore::new());
    let mut input = scenario_body();
    input["year"] = json!(1800);

    let (status, body) =
      oneshot_json(store.clone(), "POST", "/movies", Some(input)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let issues = body["error"].as_array().unwrap();
    assert!(issues.iter().any(|i| i["field"] == "year"));
    assert!(store.is_empty().await);
  }

  #[tokio::test]
  async fn create_reports_all_issues() {
    let (status, body) = oneshot_json(
      Arc::new(MemoryStore::new()),
      "POST",
      "/movies",
      Some(json!({ "year": "soon", "poster": "nope" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<_> = body["error"]
      .as_array()
      .unwrap()
      .iter()
      .map(|i| i["field"].as_str().unwrap().to_owned())
      .collect();
    assert_eq!(
      fields,
      ["title", "year", "director", "duration", "poster", "genre"]
    );
  }

  #[tokio::test]
  async fn create_ignores_client_id() {
    let mut input = scenario_body();
    input["id"] = json!("chosen-by-client");
    let (status, body) =
      oneshot_json(Arc::new(MemoryStore::new()), "POST", "/movies", Some(input))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body["id"], "chosen-by-client");
  }

  #[tokio::test]
  async fn malformed_json_returns_400() {
    let req = Request::builder()
      .method("POST")
      .uri("/movies")
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{not json"))
      .unwrap();
    let resp = api_router(Arc::new(MemoryStore::new()))
      .oneshot(req)
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"][0]["field"], "$root");
  }

  // ── Get ─────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_get_round_trips() {
    let store = Arc::new(MemoryStore::new());
    let (_, created) =
      oneshot_json(store.clone(), "POST", "/movies", Some(scenario_body()))
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, fetched) =
      oneshot_json(store.clone(), "GET", &format!("/movies/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (_, again) =
      oneshot_json(store, "GET", &format!("/movies/{id}"), None).await;
    assert_eq!(again, fetched);
  }

  #[tokio::test]
  async fn get_unknown_returns_404() {
    let store = Arc::new(MemoryStore::new());
    for uri in [format!("/movies/{}", Uuid::new_v4()), "/movies/abc".into()] {
      let (status, body) = oneshot_json(store.clone(), "GET", &uri, None).await;
      assert_eq!(status, StatusCode::NOT_FOUND);
      assert_eq!(body, json!({ "message": "movie not found" }));
    }
  }

  #[tokio::test]
  async fn undecodable_id_returns_404() {
    let store = Arc::new(MemoryStore::new());

    let (status, body) =
      oneshot_json(store.clone(), "GET", "/movies/%FF", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "movie not found" }));

    let (status, body) =
      oneshot_json(store.clone(), "DELETE", "/movies/%FF", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Movie not found" }));

    let (status, body) = oneshot_json(
      store,
      "PATCH",
      "/movies/%FF",
      Some(json!({ "year": 2010 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Movie not found" }));
  }

  // ── List ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn list_without_filter_returns_everything() {
    let (store, ids) = seeded(&[Genre::Action, Genre::Drama]).await;
    let (status, body) = oneshot_json(store, "GET", "/movies", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed: Vec<_> = body
      .as_array()
      .unwrap()
      .iter()
      .map(|m| m["id"].as_str().unwrap().to_owned())
      .collect();
    assert_eq!(listed, ids.iter().map(Uuid::to_string).collect::<Vec<_>>());
  }

  #[tokio::test]
  async fn list_filters_by_genre_in_any_case() {
    let (store, ids) = seeded(&[Genre::Action, Genre::Drama]).await;
    for genre in ["action", "ACTION", "AcTiOn"] {
      let (status, body) = oneshot_json(
        store.clone(),
        "GET",
        &format!("/movies?genre={genre}"),
        None,
      )
      .await;
      assert_eq!(status, StatusCode::OK);
      let movies = body.as_array().unwrap();
      assert_eq!(movies.len(), 1, "genre={genre}");
      assert_eq!(movies[0]["id"], ids[0].to_string());
    }
  }

  #[tokio::test]
  async fn list_with_repeated_genre_uses_first_value() {
    let (store, ids) = seeded(&[Genre::Action, Genre::Drama]).await;
    let (status, body) =
      oneshot_json(store, "GET", "/movies?genre=Action&genre=Drama", None)
        .await;
    assert_eq!(status, StatusCode::OK);
    let movies = body.as_array().unwrap();
    assert_eq!(movies.len(), 1);
    assert_eq!(movies[0]["id"], ids[0].to_string());
  }

  #[tokio::test]
  async fn list_with_empty_genre_returns_everything() {
    let (store, _) = seeded(&[Genre::Action, Genre::Drama]).await;
    let (status, body) =
      oneshot_json(store, "GET", "/movies?genre=", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 2);
  }

  // ── Update ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn patch_year_leaves_other_fields() {
    let store = Arc::new(MemoryStore::new());
    let (_, created) =
      oneshot_json(store.clone(), "POST", "/movies", Some(scenario_body()))
        .await;
    let id = created["id"].as_str().unwrap();

    let (status, updated) = oneshot_json(
      store.clone(),
      "PATCH",
      &format!("/movies/{id}"),
      Some(json!({ "year": 2010, "id": Uuid::new_v4().to_string() })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let mut expected = created.clone();
    expected["year"] = json!(2010);
    assert_eq!(updated, expected);

    let (_, fetched) =
      oneshot_json(store, "GET", &format!("/movies/{id}"), None).await;
    assert_eq!(fetched, expected);
  }

  #[tokio::test]
  async fn patch_invalid_body_returns_400() {
    let (store, ids) = seeded(&[Genre::Comedy]).await;
    let (status, body) = oneshot_json(
      store,
      "PATCH",
      &format!("/movies/{}", ids[0]),
      Some(json!({ "rate": 42 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"][0]["field"], "rate");
  }

  #[tokio::test]
  async fn patch_unknown_returns_404() {
    let (status, body) = oneshot_json(
      Arc::new(MemoryStore::new()),
      "PATCH",
      &format!("/movies/{}", Uuid::new_v4()),
      Some(json!({ "year": 2010 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Movie not found" }));
  }

  #[tokio::test]
  async fn patch_invalid_body_on_unknown_id_returns_400() {
    let (status, body) = oneshot_json(
      Arc::new(MemoryStore::new()),
      "PATCH",
      &format!("/movies/{}", Uuid::new_v4()),
      Some(json!({ "year": 1800 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"][0]["field"], "year");
  }

  #[tokio::test]
  async fn patch_malformed_json_returns_400() {
    let (store, ids) = seeded(&[Genre::Thriller]).await;
    let req = Request::builder()
      .method("PATCH")
      .uri(format!("/movies/{}", ids[0]))
      .header(header::CONTENT_TYPE, "application/json")
      .body(Body::from("{\"year\": "))
      .unwrap();
    let resp = api_router(store.clone()).oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"][0]["field"], "$root");

    let unchanged = store.get(ids[0]).await.unwrap().unwrap();
    assert_eq!(unchanged.year, 2000);
  }

  // ── Delete ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn delete_then_get_and_delete_again_miss() {
    let (store, ids) = seeded(&[Genre::Horror]).await;
    let uri = format!("/movies/{}", ids[0]);

    let (status, body) = oneshot_json(store.clone(), "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Movie deleted" }));

    let (status, _) = oneshot_json(store.clone(), "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = oneshot_json(store, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "message": "Movie not found" }));
  }
}
