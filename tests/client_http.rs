//! Round-trips through the real HTTP client against a loopback axum server.
//!
//! The client is blocking, so every call runs on tokio's blocking pool while
//! the server keeps serving on the test runtime.

use std::sync::Arc;

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode, Uri},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::{oneshot, Mutex};

use storefront_carousel::{FetchError, FetchErrorKind, Product, ProductClient, ProductSource};

/// What the server saw of the one request it answered.
#[derive(Debug)]
struct Recorded {
    path: String,
    key: String,
    accept: Option<String>,
}

#[derive(Clone)]
struct ServerState {
    status: StatusCode,
    body: &'static str,
    tx: Arc<Mutex<Option<oneshot::Sender<Recorded>>>>,
}

async fn handle_category(
    State(state): State<ServerState>,
    Path(key): Path<String>,
    uri: Uri,
    headers: HeaderMap,
) -> (StatusCode, [(header::HeaderName, &'static str); 1], &'static str) {
    if let Some(tx) = state.tx.lock().await.take() {
        let _ = tx.send(Recorded {
            path: uri.path().to_string(),
            key,
            accept: headers
                .get(header::ACCEPT)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
        });
    }
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

/// Serve `/api/categorias/:key` with a fixed `status` and `body`; returns the
/// base URL and a receiver for the first request seen.
async fn spawn_category_server(
    status: StatusCode,
    body: &'static str,
) -> Result<(String, oneshot::Receiver<Recorded>)> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel();
    let state = ServerState {
        status,
        body,
        tx: Arc::new(Mutex::new(Some(tx))),
    };
    let app = Router::new()
        .route("/api/categorias/:key", get(handle_category))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/api"), rx))
}

async fn fetch(base: String, category: &'static str) -> Result<Vec<Product>, FetchError> {
    tokio::task::spawn_blocking(move || ProductClient::new(&base)?.fetch_products(category))
        .await
        .expect("client thread")
}

const TWO_PRODUCTS: &str = r#"[
  {"id": 1, "nombre": "Dona glaseada", "precio": "18.00", "imagen": "https://cdn.example.com/1.jpg",
   "disponible": 1, "categoria_id": 2,
   "created_at": "2024-05-01T12:00:00.000000Z", "updated_at": "2024-05-01T12:00:00.000000Z"},
  {"id": 2, "nombre": "Dona de chocolate", "precio": 20.5, "imagen": "https://cdn.example.com/2.jpg",
   "disponible": false, "categoria_id": 2, "descripcion": "Rellena",
   "created_at": "2024-05-01 12:00:00", "updated_at": "2024-05-01 12:00:00"}
]"#;

#[tokio::test]
async fn fetches_lowercased_category_path() {
    let (base, requests) = spawn_category_server(StatusCode::OK, TWO_PRODUCTS)
        .await
        .expect("spawn server");

    let products = fetch(base, "donas").await.expect("products");
    let seen = requests.await.expect("request recorded");
    assert_eq!(seen.path, "/api/categorias/donas");
    assert_eq!(seen.key, "donas");
    assert_eq!(seen.accept.as_deref(), Some("application/json"));

    assert_eq!(products.len(), 2);
    assert_eq!(products[0].name, "Dona glaseada");
    assert!(products[0].available);
    assert_eq!(products[1].display_price(), "$20.50");
    assert_eq!(products[1].description.as_deref(), Some("Rellena"));
}

#[tokio::test]
async fn category_name_is_percent_encoded() {
    let (base, requests) = spawn_category_server(StatusCode::OK, "[]")
        .await
        .expect("spawn server");

    fetch(base, "tacos al pastor").await.expect("products");
    let seen = requests.await.expect("request recorded");
    assert_eq!(seen.path, "/api/categorias/tacos%20al%20pastor");
    assert_eq!(seen.key, "tacos al pastor");
}

#[tokio::test]
async fn empty_array_is_success() {
    let (base, _requests) = spawn_category_server(StatusCode::OK, "[]")
        .await
        .expect("spawn server");
    assert!(fetch(base, "galletas").await.expect("products").is_empty());
}

#[tokio::test]
async fn internal_server_error_is_transport() {
    let (base, _requests) =
        spawn_category_server(StatusCode::INTERNAL_SERVER_ERROR, r#"{"message":"Server Error"}"#)
            .await
            .expect("spawn server");

    let err = fetch(base, "pizzas").await.unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::Transport);
    assert_eq!(err.status, Some(500));
    assert_eq!(err.detail, "Server Error");
}

#[tokio::test]
async fn unknown_category_is_not_found() {
    let (base, _requests) = spawn_category_server(StatusCode::NOT_FOUND, "{}")
        .await
        .expect("spawn server");

    let err = fetch(base, "tacos").await.unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::NotFound);
    assert_eq!(err.status, Some(404));
    assert_eq!(err.detail, "Not found");
}

#[tokio::test]
async fn malformed_json_is_parse_error() {
    let (base, _requests) = spawn_category_server(StatusCode::OK, "[{\"id\": ")
        .await
        .expect("spawn server");

    let err = fetch(base, "cafe").await.unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::Parse);
}

#[tokio::test]
async fn unreachable_service_is_transport() {
    // Bind then drop to get a port nobody listens on.
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        listener.local_addr().expect("addr").port()
    };

    let err = fetch(format!("http://127.0.0.1:{port}/api"), "cafe")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FetchErrorKind::Transport);
    assert_eq!(err.status, None);
}
