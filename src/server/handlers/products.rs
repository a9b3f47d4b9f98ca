use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};

use crate::server::state::AppState;

pub async fn list_products(State(state): State<AppState>) -> Response {
    Json(state.catalog.products()).into_response()
}
