use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

use super::controller::{
    admin_login, create_admin, delete_admin, edit_admin, edit_superadmin, get_admin,
    get_all_admins, superadmin_login,
};

/// Login routes; rate limited separately from the rest of `/v1/auth`.
pub fn init_login_router() -> Router<AppState> {
    Router::new()
        .route("/admin/login", post(admin_login))
        .route("/superadmin/login", post(superadmin_login))
}

pub fn init_auth_router() -> Router<AppState> {
    Router::new()
        .route("/admin/create", post(create_admin))
        .route("/admin/delete/{id}", delete(delete_admin))
        .route("/admin/getall", get(get_all_admins))
        .route("/admin/edit", put(edit_admin))
        .route("/admin/{id}", get(get_admin))
        .route("/superadmin/edit", put(edit_superadmin))
}
