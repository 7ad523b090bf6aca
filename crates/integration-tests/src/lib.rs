//! Integration test support for the Fakestore storefront.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fakestore-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart store scenarios through the public API
//! - `catalog_client` - Catalog client and background loading against a mock API
//! - `storefront_routes` - Pages, cart forms and JSON API through the router
//!
//! The mock catalog API is a small axum app bound to `127.0.0.1:0`, so tests
//! never touch the public catalog. [`get_page`] and [`post_form`] send
//! cookie-less requests, each one a brand new visitor; a [`Visitor`] keeps
//! its session cookie across requests.

#![allow(clippy::missing_panics_doc, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    body::Body,
    extract::Path,
    http::{Request, StatusCode, header},
    response::Response,
    routing::get,
};
use fakestore_storefront::config::StorefrontConfig;
use fakestore_storefront::models::Product;
use fakestore_storefront::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;
use url::Url;

/// Catalog records used across tests: one product per category.
///
/// Product 4 is the only electronics item and costs $200.
#[must_use]
pub fn sample_catalog() -> Value {
    json!([
        {
            "id": 1,
            "title": "Test Product 1",
            "price": 109.95,
            "description": "A backpack for everyday use.",
            "category": "men's clothing",
            "image": "https://example.com/image1.jpg",
            "rating": { "rate": 3.9, "count": 120 }
        },
        {
            "id": 2,
            "title": "Test Product 2",
            "price": 22.3,
            "description": "A slim fit t-shirt.",
            "category": "women's clothing",
            "image": "https://example.com/image2.jpg",
            "rating": { "rate": 4.1, "count": 259 }
        },
        {
            "id": 3,
            "title": "Test Product 3",
            "price": 695,
            "description": "A gold and silver bracelet.",
            "category": "jewelery",
            "image": "https://example.com/image3.jpg",
            "rating": { "rate": 4.6, "count": 400 }
        },
        {
            "id": 4,
            "title": "Test Product 4",
            "price": 200,
            "description": "A portable external hard drive.",
            "category": "electronics",
            "image": "https://example.com/image4.jpg",
            "rating": { "rate": 3.3, "count": 203 }
        }
    ])
}

/// Parse [`sample_catalog`] into products.
#[must_use]
pub fn sample_products() -> Vec<Product> {
    serde_json::from_value(sample_catalog()).unwrap()
}

/// Mock catalog API serving `records` at `/products` and `/products/{id}`.
pub fn catalog_api(records: Value) -> Router {
    let records = Arc::new(records);
    let listing = Arc::clone(&records);

    Router::new()
        .route(
            "/products",
            get(move || {
                let listing = Arc::clone(&listing);
                async move { Json((*listing).clone()) }
            }),
        )
        .route(
            "/products/{id}",
            get(move |Path(id): Path<i64>| {
                let records = Arc::clone(&records);
                async move {
                    records
                        .as_array()
                        .and_then(|all| {
                            all.iter()
                                .find(|record| record.get("id").and_then(Value::as_i64) == Some(id))
                        })
                        .cloned()
                        .map(Json)
                        .ok_or(StatusCode::NOT_FOUND)
                }
            }),
        )
}

/// Mock catalog API that fails every request with `status`.
pub fn failing_catalog_api(status: StatusCode) -> Router {
    Router::new()
        .route("/products", get(move || async move { (status, "upstream down") }))
        .route(
            "/products/{id}",
            get(move || async move { (status, "upstream down") }),
        )
}

/// Serve `router` on an ephemeral local port and return its base URL.
pub async fn spawn_catalog_api(router: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/")).unwrap()
}

/// Application state whose catalog client points at `catalog_url`.
#[must_use]
pub fn state_for(catalog_url: &Url) -> AppState {
    let url = catalog_url.to_string();
    let config =
        StorefrontConfig::from_lookup(|key| (key == "CATALOG_API_URL").then(|| url.clone()))
            .unwrap();
    AppState::new(config)
}

/// Application state whose listing is already loaded with [`sample_products`].
///
/// The catalog URL points at a closed port; only tests that mount a product
/// detail view would ever reach it.
pub async fn seeded_state() -> AppState {
    let state = state_for(&Url::parse("http://127.0.0.1:9/").unwrap());
    {
        let mut catalog = state.catalog().lock().await;
        let ticket = catalog.begin_load().unwrap();
        assert!(catalog.finish_load(ticket, sample_products()));
    }
    state
}

/// Poll `check` until it holds, failing the test after two seconds.
pub async fn wait_for<F, Fut>(mut check: F)
where
    F: FnMut() -> Fut,
    Fut: Future<Output = bool>,
{
    for _ in 0..200 {
        if check().await {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("condition not met in time");
}

/// Send a `GET` through the storefront router.
pub async fn get_page(state: &AppState, uri: &str) -> Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    fakestore_storefront::routes::app(state.clone())
        .oneshot(request)
        .await
        .unwrap()
}

/// Send a url-encoded form `POST` through the storefront router.
pub async fn post_form(state: &AppState, uri: &str, form: &str) -> Response {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    fakestore_storefront::routes::app(state.clone())
        .oneshot(request)
        .await
        .unwrap()
}

/// A browser session against the storefront router.
///
/// Remembers the session cookie handed out by the storefront and sends it
/// back on every later request, like a real browser would.
pub struct Visitor {
    state: AppState,
    cookie: Option<String>,
}

impl Visitor {
    /// A visitor without a session yet.
    #[must_use]
    pub fn new(state: &AppState) -> Self {
        Self {
            state: state.clone(),
            cookie: None,
        }
    }

    /// Send a `GET` with this visitor's cookie.
    pub async fn get(&mut self, uri: &str) -> Response {
        self.send(Request::builder().uri(uri), Body::empty()).await
    }

    /// Send a url-encoded form `POST` with this visitor's cookie.
    pub async fn post(&mut self, uri: &str, form: &str) -> Response {
        let builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        self.send(builder, Body::from(form.to_string())).await
    }

    /// This visitor's cart as returned by `/api/cart`.
    pub async fn cart_summary(&mut self) -> Value {
        let response = self.get("/api/cart").await;
        assert_eq!(response.status(), StatusCode::OK);
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    async fn send(&mut self, mut builder: axum::http::request::Builder, body: Body) -> Response {
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let response = fakestore_storefront::routes::app(self.state.clone())
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        if let Some(set_cookie) = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|value| value.to_str().ok())
        {
            let pair = set_cookie.split(';').next().unwrap_or_default();
            self.cookie = Some(pair.to_string());
        }
        response
    }
}

/// Read a response body as text.
pub async fn body_text(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}
