//! Static page route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::session::cart_count;
use crate::routes::products::{ListingQuery, visitor_listing};
use crate::state::AppState;
use crate::views::ListingView;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub cart_count: usize,
    /// Full product listing below the hero.
    pub listing: ListingView,
}

/// About page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/about.html")]
pub struct AboutTemplate {
    pub cart_count: usize,
}

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/contact.html")]
pub struct ContactTemplate {
    pub cart_count: usize,
}

/// Not found page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/not_found.html")]
pub struct NotFoundTemplate {
    pub cart_count: usize,
}

/// Display the home page: the hero followed by the product listing.
#[instrument(skip(state, session))]
pub async fn home(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListingQuery>,
) -> impl IntoResponse {
    let listing = visitor_listing(&state, &session, query.category.as_deref(), "/").await;
    HomeTemplate {
        cart_count: cart_count(&session).await,
        listing,
    }
}

/// Display the about page.
#[instrument(skip(session))]
pub async fn about(session: Session) -> impl IntoResponse {
    AboutTemplate {
        cart_count: cart_count(&session).await,
    }
}

/// Display the contact page.
#[instrument(skip(session))]
pub async fn contact(session: Session) -> impl IntoResponse {
    ContactTemplate {
        cart_count: cart_count(&session).await,
    }
}

/// Fallback for unknown paths.
pub async fn not_found(session: Session) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        NotFoundTemplate {
            cart_count: cart_count(&session).await,
        },
    )
}
