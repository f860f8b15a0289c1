use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use super::controller::{
    append_subcategories, create_category, create_source, delete_category, delete_source,
    delete_subcategory, get_categories, get_categories_with_subcategories, get_category,
    get_sources, get_subcategories, update_category, update_subcategory,
};

pub fn init_categories_router() -> Router<AppState> {
    Router::new()
        .route("/category", post(create_category))
        .route("/category/categories", get(get_categories_with_subcategories))
        .route("/category/source", post(create_source).get(get_sources))
        .route("/category/source/delete/{id}", delete(delete_source))
        .route(
            "/category/{id}",
            get(get_category).put(update_category).delete(delete_category),
        )
        .route("/categories", get(get_categories))
        .route("/subcategory/append", put(append_subcategories))
        .route(
            "/subcategory/{id}",
            put(update_subcategory).delete(delete_subcategory),
        )
        .route("/subcategories/{id}", get(get_subcategories))
}
