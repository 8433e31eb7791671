use axum::{Router, routing::get};

use crate::api::admin::handlers::who_am_i;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/me", get(who_am_i))
}
