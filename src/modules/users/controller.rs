use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use snippetbox_core::AppError;
use snippetbox_models::{ModelError, UserId};
use tracing::instrument;

use crate::middleware::auth::{AuthenticatedUser, LOGIN_PATH};
use crate::middleware::session::{AUTHENTICATED_USER_ID, FLASH, REDIRECT_AFTER_LOGIN};
use crate::modules::users::model::{
    DUPLICATE_EMAIL, INVALID_CREDENTIALS, LOGOUT_FLASH, SIGNUP_FLASH, UserLoginForm,
    UserSignupForm,
};
use crate::state::AppState;
use crate::templates::ViewContext;
use crate::utils::redirect::found;
use crate::validator::{HtmlForm, field_errors};

#[instrument(skip_all)]
pub async fn signup_user_form(
    State(state): State<AppState>,
    view: ViewContext,
) -> Result<Response, AppError> {
    let data = view.data().await?.with_form(&UserSignupForm::default());
    state.templates.render(StatusCode::OK, "pages/signup.html", &data)
}

/// Creates the account and sends the user to log in. Signing up never
/// authenticates the session.
#[instrument(skip_all)]
pub async fn signup_user(
    State(state): State<AppState>,
    view: ViewContext,
    HtmlForm(form): HtmlForm<UserSignupForm>,
) -> Result<Response, AppError> {
    let mut errors = field_errors(&form);

    if errors.is_empty() {
        match state
            .users
            .insert(&form.name, &form.email, &form.password)
            .await
        {
            Ok(user_id) => {
                tracing::info!(%user_id, "user signed up");
                view.session().insert(FLASH, SIGNUP_FLASH).await?;
                return Ok(found(LOGIN_PATH).into_response());
            }
            Err(ModelError::DuplicateEmail) => {
                errors.insert("email".to_string(), DUPLICATE_EMAIL.to_string());
            }
            Err(e) => return Err(e.into()),
        }
    }

    let data = view.data().await?.with_form(&form).with_field_errors(errors);
    state
        .templates
        .render(StatusCode::UNPROCESSABLE_ENTITY, "pages/signup.html", &data)
}

#[instrument(skip_all)]
pub async fn login_user_form(
    State(state): State<AppState>,
    view: ViewContext,
) -> Result<Response, AppError> {
    let data = view.data().await?.with_form(&UserLoginForm::default());
    state.templates.render(StatusCode::OK, "pages/login.html", &data)
}

/// Checks credentials, then rotates the session id before storing the user
/// so a token planted before login is useless afterwards.
#[instrument(skip_all)]
pub async fn login_user(
    State(state): State<AppState>,
    view: ViewContext,
    HtmlForm(form): HtmlForm<UserLoginForm>,
) -> Result<Response, AppError> {
    let errors = field_errors(&form);
    if !errors.is_empty() {
        let data = view.data().await?.with_form(&form).with_field_errors(errors);
        return state
            .templates
            .render(StatusCode::UNPROCESSABLE_ENTITY, "pages/login.html", &data);
    }

    let user_id = match state.users.authenticate(&form.email, &form.password).await {
        Ok(user_id) => user_id,
        Err(ModelError::InvalidCredentials) => {
            tracing::info!("login rejected");
            let mut data = view.data().await?.with_form(&form);
            data.non_field_errors.push(INVALID_CREDENTIALS.to_string());
            return state
                .templates
                .render(StatusCode::UNPROCESSABLE_ENTITY, "pages/login.html", &data);
        }
        Err(e) => return Err(e.into()),
    };

    let session = view.session();
    session.cycle_id().await?;
    session.insert(AUTHENTICATED_USER_ID, user_id).await?;
    tracing::info!(%user_id, "user logged in");

    let target = session
        .remove::<String>(REDIRECT_AFTER_LOGIN)
        .await?
        .unwrap_or_else(|| "/".to_string());
    Ok(found(&target).into_response())
}

#[instrument(skip_all, fields(user_id = %user.user_id()))]
pub async fn logout_user(
    user: AuthenticatedUser,
    view: ViewContext,
) -> Result<Response, AppError> {
    let session = view.session();
    session.remove::<UserId>(AUTHENTICATED_USER_ID).await?;
    session.cycle_id().await?;
    session.insert(FLASH, LOGOUT_FLASH).await?;
    tracing::info!("user logged out");

    Ok(found("/").into_response())
}

#[instrument(skip_all, fields(user_id = %user.user_id()))]
pub async fn account(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    view: ViewContext,
) -> Result<Response, AppError> {
    let account = match state.users.get(user.user_id()).await {
        Ok(account) => account,
        Err(ModelError::NoRecord) => return Ok(found(LOGIN_PATH).into_response()),
        Err(e) => return Err(e.into()),
    };

    let mut data = view.data().await?;
    data.user = Some(account);
    state.templates.render(StatusCode::OK, "pages/account.html", &data)
}
