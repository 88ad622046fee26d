use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{
    account, login_user, login_user_form, logout_user, signup_user, signup_user_form,
};

pub fn init_users_router() -> Router<AppState> {
    Router::new()
        .route("/user/signup", get(signup_user_form).post(signup_user))
        .route("/user/login", get(login_user_form).post(login_user))
}

/// Routes that need a logged-in user.
pub fn init_protected_users_router() -> Router<AppState> {
    Router::new()
        .route("/user/logout", post(logout_user))
        .route("/account/view", get(account))
}
