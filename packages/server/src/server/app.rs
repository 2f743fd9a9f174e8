//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::StatusCode,
    routing::{get, post, put},
    Router,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    add_user_handler, approve_handler, availability_handler, begin_review_handler,
    create_application_handler, first_login_handler, get_application_handler, health_handler,
    list_applications_handler, list_contacts_handler, reject_handler, retrieve_handler, save_contact_handler,
    submit_handler, withdraw_handler,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps) -> Router {
    let state = AppState {
        deps: Arc::new(deps),
    };

    let api = Router::new()
        .route("/available/:domain", get(availability_handler))
        .route("/applications", post(create_application_handler))
        .route("/applications/:id", get(get_application_handler))
        .route("/applications/:id/submit", post(submit_handler))
        .route("/applications/:id/review", post(begin_review_handler))
        .route("/applications/:id/approve", post(approve_handler))
        .route("/applications/:id/reject", post(reject_handler))
        .route("/applications/:id/withdraw", post(withdraw_handler))
        .route("/domains/:id/contacts", get(list_contacts_handler))
        .route("/domains/:id/contacts/:contact_type", put(save_contact_handler))
        .route("/domains/:id/users", post(add_user_handler))
        .route("/invitations/:id/retrieve", post(retrieve_handler))
        .route("/users/:id/applications", get(list_applications_handler))
        .route("/users/:id/first-login", post(first_login_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api/v1", api)
        .layer(Extension(state))
        .layer(request_timeout(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
}

/// Requests still running after `limit` are answered with 408.
fn request_timeout(limit: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, limit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    #[tokio::test]
    async fn slow_requests_time_out_with_408() {
        let app = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "done"
                }),
            )
            .layer(request_timeout(Duration::from_millis(20)));

        let response = app
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }
}
