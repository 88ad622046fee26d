use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use snippetbox_core::AppError;
use snippetbox_models::{ModelError, SnippetId};
use tracing::instrument;

use crate::middleware::session::FLASH;
use crate::modules::snippets::model::{CREATED_FLASH, SnippetCreateForm};
use crate::state::AppState;
use crate::templates::ViewContext;
use crate::utils::redirect::found;
use crate::validator::HtmlForm;

#[instrument(skip_all)]
pub async fn home(State(state): State<AppState>, view: ViewContext) -> Result<Response, AppError> {
    let snippets = state.snippets.latest().await?;

    let mut data = view.data().await?;
    data.snippets = snippets;
    state.templates.render(StatusCode::OK, "pages/home.html", &data)
}

/// Ids that are not positive integers are answered like unknown ids.
#[instrument(skip(state, view))]
pub async fn view_snippet(
    State(state): State<AppState>,
    view: ViewContext,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = SnippetId::parse_positive(&id)
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("invalid snippet id {id:?}")))?;

    let snippet = match state.snippets.get(id).await {
        Ok(snippet) => snippet,
        Err(ModelError::NoRecord) => {
            return Err(AppError::not_found(anyhow::anyhow!("snippet {id} not found")));
        }
        Err(e) => return Err(e.into()),
    };

    let mut data = view.data().await?;
    data.snippet = Some(snippet);
    state.templates.render(StatusCode::OK, "pages/view.html", &data)
}

#[instrument(skip_all)]
pub async fn create_snippet_form(
    State(state): State<AppState>,
    view: ViewContext,
) -> Result<Response, AppError> {
    let data = view.data().await?.with_form(&SnippetCreateForm::default());
    state.templates.render(StatusCode::OK, "pages/create.html", &data)
}

#[instrument(skip_all)]
pub async fn create_snippet(
    State(state): State<AppState>,
    view: ViewContext,
    HtmlForm(form): HtmlForm<SnippetCreateForm>,
) -> Result<Response, AppError> {
    let errors = form.validation_errors();
    if !errors.is_empty() {
        let data = view.data().await?.with_form(&form).with_field_errors(errors);
        return state
            .templates
            .render(StatusCode::UNPROCESSABLE_ENTITY, "pages/create.html", &data);
    }

    let id = state
        .snippets
        .insert(&form.title, &form.content, form.expiry_days)
        .await?;
    tracing::info!(snippet_id = %id, "snippet created");

    view.session().insert(FLASH, CREATED_FLASH).await?;
    Ok(found(&format!("/snippet/view/{id}")).into_response())
}
