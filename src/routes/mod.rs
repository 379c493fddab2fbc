pub mod misc;

use axum::{
    Router,
    routing::{get, post},
};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/ping", get(misc::ping))
        .route("/localCallbackExample", post(misc::local_callback))
}
