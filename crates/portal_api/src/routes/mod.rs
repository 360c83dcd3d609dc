use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{self, admin, auth, documents, payment, profile, progress};
use crate::state::AppState;

/// The full HTTP surface. Everything but the health probe lives under
/// `/api/auth`, as the front end expects. The body limit is raised above
/// the framework default to admit inline base64 document uploads.
pub fn app_router(state: AppState, max_body_bytes: usize) -> Router {
    let api = Router::new()
        .route("/register", post(auth::register))
        .route("/generate-otp", post(auth::generate_registration_otp))
        .route("/generate-otp-user", post(auth::generate_user_otp))
        .route("/verify-otp", post(auth::verify_registration_otp))
        .route("/verify-otp-user", post(auth::verify_user_otp))
        .route("/login", post(auth::login))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/change-password", post(auth::change_password))
        .route(
            "/candidate-details/:user_id",
            get(profile::get_candidate_details).put(profile::put_candidate_details),
        )
        .route(
            "/qualification-details/:user_id",
            get(profile::get_qualification_details).put(profile::put_qualification_details),
        )
        .route(
            "/document-details/:user_id",
            get(documents::get_document_details)
                .put(documents::put_document_details)
                .delete(documents::delete_document_details),
        )
        .route(
            "/payment-details/:user_id",
            get(payment::get_payment_details).put(payment::put_payment_details),
        )
        .route("/progress/:user_id", get(progress::get_progress))
        .route("/admin/payment-status/:user_id", put(admin::put_payment_status))
        .route("/admin/users-payments", get(admin::get_users_payments));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/auth", api)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .with_state(state)
}
