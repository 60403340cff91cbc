mod error;
mod state;
mod util;
mod views;

pub mod routes;

pub use error::ApiError;
pub use state::{AppState, FlashStore};
pub use util::{FLASH_COOKIE, SESSION_COOKIE};

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::pages::home))
        .route("/health", get(routes::health::health_check))
        // Search
        .route("/usersearch", get(routes::search::search_form))
        .route("/searchaction", post(routes::search::search_action))
        // Account pages
        .route("/userInfo", get(routes::accounts::user_info))
        .route("/admin", get(routes::accounts::admin))
        .route("/403", get(routes::pages::access_denied))
        // Sessions
        .route("/login", get(routes::pages::login))
        .route("/login", post(routes::session::login_action))
        .route("/logout", post(routes::session::logout_action))
        .route("/logoutSuccessful", get(routes::pages::logout_successful))
        // Registration
        .route("/registration", get(routes::registration::registration_form))
        .route("/registration", post(routes::registration::register))
        .route(
            "/registrationSuccessful",
            get(routes::registration::registration_successful),
        )
        // JSON API
        .route("/api/useraccounts", get(routes::accounts::list_user_accounts))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
