//! View renderer.
//!
//! Templates are compiled into the binary and parsed once by
//! [`Templates::new`]; the resulting cache is immutable and shared by every
//! request through `Arc`. Pages are rendered into a `String` before any byte
//! is written, so a failing template yields a clean 500 instead of half a
//! page.

use std::collections::{BTreeMap, HashMap};

use anyhow::Context as _;
use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{Html, IntoResponse, Response},
};
use chrono::{DateTime, Datelike, Utc};
use serde::Serialize;
use serde_json::Value;
use snippetbox_core::AppError;
use snippetbox_models::{Snippet, User};
use tera::{Context, Tera};
use tower_sessions::Session;

use crate::middleware::auth::AuthenticatedUser;
use crate::middleware::csrf::CsrfToken;
use crate::middleware::session::FLASH;

const TEMPLATES: [(&str, &str); 8] = [
    ("base.html", include_str!("../ui/html/base.html")),
    ("partials/nav.html", include_str!("../ui/html/partials/nav.html")),
    ("pages/home.html", include_str!("../ui/html/pages/home.html")),
    ("pages/view.html", include_str!("../ui/html/pages/view.html")),
    ("pages/create.html", include_str!("../ui/html/pages/create.html")),
    ("pages/signup.html", include_str!("../ui/html/pages/signup.html")),
    ("pages/login.html", include_str!("../ui/html/pages/login.html")),
    ("pages/account.html", include_str!("../ui/html/pages/account.html")),
];

pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        tera.register_filter("human_date", human_date);
        Ok(Self { tera })
    }

    pub fn render_string(&self, page: &str, data: &TemplateData) -> anyhow::Result<String> {
        let context = Context::from_serialize(data).context("building template context")?;
        self.tera
            .render(page, &context)
            .with_context(|| format!("rendering template {page}"))
    }

    pub fn render(
        &self,
        status: StatusCode,
        page: &str,
        data: &TemplateData,
    ) -> Result<Response, AppError> {
        let body = self.render_string(page, data).map_err(AppError::internal)?;
        Ok((status, Html(body)).into_response())
    }
}

/// `2024-03-17T09:05:00Z` becomes `17 Mar 2024 at 09:05`, always in UTC.
fn human_date(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let raw = value
        .as_str()
        .ok_or_else(|| tera::Error::msg("human_date expects an RFC 3339 string"))?;
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| tera::Error::msg(format!("human_date: {e}")))?;

    Ok(Value::String(
        parsed
            .with_timezone(&Utc)
            .format("%d %b %Y at %H:%M")
            .to_string(),
    ))
}

/// Everything a page template can see.
#[derive(Serialize, Debug, Clone, Default)]
pub struct TemplateData {
    pub current_year: i32,
    pub flash: Option<String>,
    pub is_authenticated: bool,
    pub csrf_token: String,
    pub snippet: Option<Snippet>,
    pub snippets: Vec<Snippet>,
    pub user: Option<User>,
    pub form: Value,
    pub field_errors: BTreeMap<String, String>,
    pub non_field_errors: Vec<String>,
}

impl TemplateData {
    /// Stores the submitted (or blank) form so inputs can be refilled.
    pub fn with_form<F: Serialize>(mut self, form: &F) -> Self {
        self.form = serde_json::to_value(form).unwrap_or(Value::Null);
        self
    }

    pub fn with_field_errors(mut self, errors: BTreeMap<String, String>) -> Self {
        self.field_errors = errors;
        self
    }
}

/// Per-request inputs for [`TemplateData`], extracted up front so handlers
/// only touch the flash message when they actually render a page.
#[derive(Clone, Debug)]
pub struct ViewContext {
    session: Session,
    is_authenticated: bool,
    csrf_token: String,
}

impl ViewContext {
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Base data for a page. Pops the session's flash message.
    pub async fn data(&self) -> Result<TemplateData, AppError> {
        let flash = self.session.remove::<String>(FLASH).await?;

        Ok(TemplateData {
            current_year: Utc::now().year(),
            flash,
            is_authenticated: self.is_authenticated,
            csrf_token: self.csrf_token.clone(),
            ..Default::default()
        })
    }
}

impl<S> FromRequestParts<S> for ViewContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(status, msg)| AppError::new(status, anyhow::anyhow!(msg)))?;

        Ok(ViewContext {
            session,
            is_authenticated: parts.extensions.get::<AuthenticatedUser>().is_some(),
            csrf_token: parts
                .extensions
                .get::<CsrfToken>()
                .map(|token| token.0.clone())
                .unwrap_or_default(),
        })
    }
}
