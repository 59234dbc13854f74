use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use crate::error::ApiError;
use crate::model::{BlogPost, Exercise, Program, User, WorkoutDay};
use crate::storage::ApiConfig;

pub struct ApiClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, Duration::from_secs(15))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: Url::parse(base_url)?,
            token: None,
        })
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Self::with_timeout(&config.base_url, Duration::from_secs(config.timeout_secs))?;
        Ok(match &config.token {
            Some(token) if !token.is_empty() => client.with_token(token.clone()),
            _ => client,
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    // ── Public content ───────────────────────────────────────────────

    pub async fn workout_day(&self, program: &str, day: u32) -> Result<WorkoutDay, ApiError> {
        let day = day.to_string();
        let url = self.endpoint(&["api", "workouts", program, "day", &day])?;
        self.get_json(url, false).await
    }

    pub async fn blog_posts(&self) -> Result<Vec<BlogPost>, ApiError> {
        self.get_json(self.endpoint(&["api", "blog"])?, false).await
    }

    pub async fn blog_post(&self, slug: &str) -> Result<BlogPost, ApiError> {
        self.get_json(self.endpoint(&["api", "blog", slug])?, false)
            .await
    }

    // ── Admin ────────────────────────────────────────────────────────

    pub async fn programs(&self) -> Result<Vec<Program>, ApiError> {
        self.get_json(self.endpoint(&["api", "admin", "programs"])?, true)
            .await
    }

    pub async fn create_program(&self, program: &Program) -> Result<Program, ApiError> {
        let url = self.endpoint(&["api", "admin", "programs"])?;
        self.send_json(Method::POST, url, program).await
    }

    pub async fn update_program(&self, id: &str, program: &Program) -> Result<Program, ApiError> {
        let url = self.endpoint(&["api", "admin", "programs", id])?;
        self.send_json(Method::PUT, url, program).await
    }

    pub async fn delete_program(&self, id: &str) -> Result<(), ApiError> {
        self.delete(self.endpoint(&["api", "admin", "programs", id])?)
            .await
    }

    pub async fn exercises(&self) -> Result<Vec<Exercise>, ApiError> {
        self.get_json(self.endpoint(&["api", "admin", "exercises"])?, true)
            .await
    }

    pub async fn create_exercise(&self, exercise: &Exercise) -> Result<Exercise, ApiError> {
        let url = self.endpoint(&["api", "admin", "exercises"])?;
        self.send_json(Method::POST, url, exercise).await
    }

    pub async fn update_exercise(&self, id: &str, exercise: &Exercise) -> Result<Exercise, ApiError> {
        let url = self.endpoint(&["api", "admin", "exercises", id])?;
        self.send_json(Method::PUT, url, exercise).await
    }

    pub async fn delete_exercise(&self, id: &str) -> Result<(), ApiError> {
        self.delete(self.endpoint(&["api", "admin", "exercises", id])?)
            .await
    }

    pub async fn workout_days(&self, program: &str) -> Result<Vec<WorkoutDay>, ApiError> {
        let mut url = self.endpoint(&["api", "admin", "workout-days"])?;
        url.query_pairs_mut().append_pair("program", program);
        self.get_json(url, true).await
    }

    pub async fn create_workout_day(&self, day: &WorkoutDay) -> Result<WorkoutDay, ApiError> {
        validate_day(day)?;
        let url = self.endpoint(&["api", "admin", "workout-days"])?;
        self.send_json(Method::POST, url, day).await
    }

    pub async fn update_workout_day(&self, id: &str, day: &WorkoutDay) -> Result<WorkoutDay, ApiError> {
        validate_day(day)?;
        let url = self.endpoint(&["api", "admin", "workout-days", id])?;
        self.send_json(Method::PUT, url, day).await
    }

    pub async fn delete_workout_day(&self, id: &str) -> Result<(), ApiError> {
        self.delete(self.endpoint(&["api", "admin", "workout-days", id])?)
            .await
    }

    pub async fn create_blog_post(&self, post: &BlogPost) -> Result<BlogPost, ApiError> {
        let url = self.endpoint(&["api", "blog"])?;
        self.send_json(Method::POST, url, post).await
    }

    pub async fn update_blog_post(&self, id: &str, post: &BlogPost) -> Result<BlogPost, ApiError> {
        let url = self.endpoint(&["api", "blog", id])?;
        self.send_json(Method::PUT, url, post).await
    }

    pub async fn delete_blog_post(&self, id: &str) -> Result<(), ApiError> {
        self.delete(self.endpoint(&["api", "blog", id])?).await
    }

    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.get_json(self.endpoint(&["api", "admin", "users"])?, true)
            .await
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Append percent-encoded path segments to the base URL, keeping any
    /// path prefix it already has.
    pub(super) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(super) fn request(&self, method: Method, url: Url, admin: bool) -> Result<RequestBuilder, ApiError> {
        let builder = self.http.request(method, url);
        match (&self.token, admin) {
            (Some(token), _) => Ok(builder.bearer_auth(token)),
            (None, true) => Err(ApiError::Unauthorized),
            (None, false) => Ok(builder),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, admin: bool) -> Result<T, ApiError> {
        let resp = self.request(Method::GET, url, admin)?.send().await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: &B,
    ) -> Result<T, ApiError> {
        debug!(%method, path = url.path(), "admin request");
        let resp = self.request(method, url, true)?.json(body).send().await?;
        Ok(check(resp).await?.json().await?)
    }

    async fn delete(&self, url: Url) -> Result<(), ApiError> {
        let resp = self.request(Method::DELETE, url, true)?.send().await?;
        check(resp).await?;
        Ok(())
    }
}

/// Reject days whose blocks fail validation, as the backend would with 422.
fn validate_day(day: &WorkoutDay) -> Result<(), ApiError> {
    for block in &day.blocks {
        block.validate().map_err(|e| ApiError::Status {
            code: 422,
            message: e.to_string(),
        })?;
    }
    Ok(())
}

/// Map non-success statuses to [`ApiError`].
pub(super) async fn check(resp: Response) -> Result<Response, ApiError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    match status {
        StatusCode::UNAUTHORIZED => Err(ApiError::Unauthorized),
        StatusCode::FORBIDDEN => Err(ApiError::Forbidden),
        _ => {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
                .unwrap_or(body);
            Err(ApiError::Status {
                code: status.as_u16(),
                message,
            })
        }
    }
}
