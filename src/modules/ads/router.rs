use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_ad, delete_ad, get_ad, get_all_ads, update_ad};

pub fn init_ads_router() -> Router<AppState> {
    Router::new()
        .route("/ads/", post(create_ad).put(update_ad))
        .route("/ads/all", get(get_all_ads))
        .route("/ads/{id}", get(get_ad).delete(delete_ad))
}
