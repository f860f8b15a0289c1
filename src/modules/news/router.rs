use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use super::controller::{
    create_news, delete_news, get_all_news, get_filtered_news, get_news, search_news,
    update_news,
};

pub fn init_news_router() -> Router<AppState> {
    Router::new()
        .route("/create", post(create_news))
        .route("/getall", get(get_all_news))
        .route("/filtered", get(get_filtered_news))
        .route("/search", get(search_news))
        .route("/get/{id}", get(get_news))
        .route("/update/{id}", put(update_news))
        .route("/delete/{id}", delete(delete_news))
}
