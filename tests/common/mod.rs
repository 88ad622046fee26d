use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use clap::Parser;
use http_body_util::BodyExt;
use snippetbox::router::init_router;
use snippetbox::state::AppState;
use snippetbox::templates::Templates;
use snippetbox::testing::{MemorySnippetRepository, MemoryUserRepository};
use snippetbox_config::Config;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

pub const PASSWORD: &str = "validpass123";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub snippets: Arc<MemorySnippetRepository>,
    pub users: Arc<MemoryUserRepository>,
}

pub fn test_config() -> Config {
    Config::try_parse_from([
        "snippetbox",
        "--ui-dir",
        concat!(env!("CARGO_MANIFEST_DIR"), "/ui"),
    ])
    .unwrap()
}

#[allow(dead_code)]
impl TestApp {
    pub fn new() -> Self {
        let snippets = Arc::new(MemorySnippetRepository::new());
        let users = Arc::new(MemoryUserRepository::new());
        let state = AppState::new(
            snippets.clone(),
            users.clone(),
            Templates::new().unwrap(),
            &test_config(),
        );

        Self {
            router: init_router(state, MemoryStore::default()),
            snippets,
            users,
        }
    }

    pub fn client(&self) -> TestClient {
        TestClient {
            router: self.router.clone(),
            cookie: None,
        }
    }

    /// A client that has signed up and logged in as Bob.
    pub async fn logged_in_client(&self, email: &str) -> TestClient {
        let mut client = self.client();
        client.signup("Bob", email, PASSWORD).await;
        let response = client.login(email, PASSWORD).await;
        assert_eq!(response.status, StatusCode::FOUND);
        client
    }
}

#[allow(dead_code)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

#[allow(dead_code)]
impl TestResponse {
    pub fn location(&self) -> Option<&str> {
        self.headers
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn session_cookie(&self) -> Option<String> {
        session_cookie(&self.headers)
    }

    /// The hidden `csrf_token` field of the first form on the page.
    pub fn csrf_token(&self) -> Option<String> {
        let marker = r#"name="csrf_token" value=""#;
        let start = self.body.find(marker)? + marker.len();
        let end = self.body[start..].find('"')?;
        Some(self.body[start..start + end].to_string())
    }
}

/// Value of the `session` cookie set by a response, if any.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            cookie
                .strip_prefix("session=")
                .map(|rest| rest.split(';').next().unwrap_or_default().to_string())
        })
}

/// Drives the router like a browser: keeps the session cookie between
/// requests.
pub struct TestClient {
    router: Router,
    pub cookie: Option<String>,
}

#[allow(dead_code)]
impl TestClient {
    pub async fn send(&mut self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        if let Some(cookie) = session_cookie(&headers) {
            self.cookie = Some(cookie);
        }

        TestResponse {
            status,
            headers,
            body: String::from_utf8_lossy(&bytes).into_owned(),
        }
    }

    fn builder(&self, method: Method, uri: &str) -> axum::http::request::Builder {
        let builder = Request::builder().method(method).uri(uri);
        match &self.cookie {
            Some(cookie) => builder.header(header::COOKIE, format!("session={cookie}")),
            None => builder,
        }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        let request = self.builder(Method::GET, uri).body(Body::empty()).unwrap();
        self.send(request).await
    }

    /// Posts the fields as-is, without adding a CSRF token.
    pub async fn post_raw(&mut self, uri: &str, fields: &[(&str, &str)]) -> TestResponse {
        let request = self
            .builder(Method::POST, uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(serde_urlencoded::to_string(fields).unwrap()))
            .unwrap();
        self.send(request).await
    }

    /// Fetches `form_page` for a token, then posts the fields with it.
    pub async fn post_form(
        &mut self,
        form_page: &str,
        uri: &str,
        fields: &[(&str, &str)],
    ) -> TestResponse {
        let token = self.csrf_token(form_page).await;
        let mut fields = fields.to_vec();
        fields.push(("csrf_token", token.as_str()));
        self.post_raw(uri, &fields).await
    }

    pub async fn csrf_token(&mut self, page: &str) -> String {
        let response = self.get(page).await;
        response
            .csrf_token()
            .unwrap_or_else(|| panic!("no csrf token on {page}"))
    }

    pub async fn signup(&mut self, name: &str, email: &str, password: &str) -> TestResponse {
        self.post_form(
            "/user/signup",
            "/user/signup",
            &[("name", name), ("email", email), ("password", password)],
        )
        .await
    }

    pub async fn login(&mut self, email: &str, password: &str) -> TestResponse {
        self.post_form(
            "/user/login",
            "/user/login",
            &[("email", email), ("password", password)],
        )
        .await
    }

    pub async fn create_snippet(&mut self, title: &str, content: &str, days: &str) -> TestResponse {
        self.post_form(
            "/snippet/create",
            "/snippet/create",
            &[("title", title), ("content", content), ("expiry-days", days)],
        )
        .await
    }
}
