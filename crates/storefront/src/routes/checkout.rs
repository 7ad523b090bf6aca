//! Checkout route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;
use tracing::instrument;

use crate::checkout::{CheckoutForm, can_submit};
use crate::middleware::session::load_cart;
use crate::views::CartView;

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart_count: usize,
    pub cart: CartView,
    pub form: CheckoutForm,
    /// Labels of blank required fields after a submission.
    pub missing: Vec<&'static str>,
    /// Whether the submit button is enabled.
    pub submit_enabled: bool,
    /// Set after a valid submission.
    pub confirmed: bool,
}

/// Display the checkout form.
#[instrument(skip(session))]
pub async fn show(session: Session) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    CheckoutTemplate {
        cart_count: cart.item_count(),
        cart: CartView::from(&cart),
        form: CheckoutForm::default(),
        missing: Vec::new(),
        // Blank fields are enforced by the browser (`required`) until posted.
        submit_enabled: !cart.is_empty(),
        confirmed: false,
    }
}

/// Validate a checkout submission.
///
/// Nothing is charged; a valid form only renders a confirmation notice.
#[instrument(skip(session, form))]
pub async fn submit(session: Session, Form(form): Form<CheckoutForm>) -> impl IntoResponse {
    let cart = load_cart(&session).await;
    let confirmed = can_submit(&cart, &form);
    let missing = form.missing_fields();

    let status = if confirmed {
        tracing::info!(items = cart.item_count(), "Checkout form accepted");
        StatusCode::OK
    } else {
        tracing::debug!(missing = ?missing, empty_cart = cart.is_empty(), "Checkout form rejected");
        StatusCode::UNPROCESSABLE_ENTITY
    };

    (
        status,
        CheckoutTemplate {
            cart_count: cart.item_count(),
            cart: CartView::from(&cart),
            submit_enabled: !cart.is_empty(),
            missing,
            form,
            confirmed,
        },
    )
}
