use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

pub mod auth;
pub mod cover_letter;
pub mod error;
pub mod job_fit;
pub mod profile;
pub mod resume;
pub mod session;

pub use error::{ApiError, Result};
pub use session::{Session, SessionStore};

/// Single entry point for every backend call. Owns the base URL, the
/// persisted session and the error normalization, so feature code never
/// duplicates header construction or token handling.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
    store: SessionStore,
    session: Option<Session>,
}

/// Token policy for a single request.
pub(crate) enum Auth<'a> {
    /// Attach the stored session token when one is present, omit the
    /// header otherwise.
    Session,
    /// Never attach a token (credential issuance endpoints).
    Anonymous,
    /// Attach the given token instead of the stored session.
    Bearer(&'a str),
}

impl ApiClient {
    pub fn new(base_url: Url, store: SessionStore) -> Result<Self> {
        let session = store.load()?;
        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
            store,
            session,
        })
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Pre-flight check for flows that cannot work anonymously.
    pub(crate) fn require_session(&self) -> Result<&Session> {
        self.session.as_ref().ok_or(ApiError::NotLoggedIn)
    }

    pub(crate) fn request(
        &self,
        method: Method,
        path: &str,
        auth: Auth<'_>,
    ) -> Result<RequestBuilder> {
        let url = self.base_url.join(path)?;
        debug!(%method, %url, "Building api request");
        let mut builder = self.http.request(method, url);
        match auth {
            Auth::Session => {
                if let Some(session) = &self.session {
                    builder = builder.bearer_auth(&session.access_token);
                }
            }
            Auth::Anonymous => {}
            Auth::Bearer(token) => {
                builder = builder.bearer_auth(token);
            }
        }
        Ok(builder)
    }

    /// Sends the request and decodes the JSON body, treating an empty
    /// success as an error.
    pub(crate) async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        match self.send_opt(builder).await? {
            Some(value) => Ok(value),
            None => Err(ApiError::EmptyResponse),
        }
    }

    /// Sends the request, mapping 204 or an empty success body to `None`
    /// and any non-success status to [`ApiError::Status`].
    pub(crate) async fn send_opt<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await?;
            debug!(%status, body = %body, "Api request rejected");
            return Err(ApiError::status(status, &body));
        }
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let body = response.bytes().await?;
        if body.is_empty() {
            return Ok(None);
        }
        let value = serde_json::from_slice(&body)?;
        Ok(Some(value))
    }

    /// Generic GET escape hatch for endpoints without a dedicated method.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        let request = self.request(Method::GET, path, Auth::Session)?;
        self.send_opt(request).await
    }

    /// Generic POST escape hatch with a JSON body.
    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>> {
        let request = self.request(Method::POST, path, Auth::Session)?.json(body);
        self.send_opt(request).await
    }
}
