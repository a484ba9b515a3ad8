use reqwest::Method;
use secrecy::SecretString;
use shared::{SignInRequest, SignInResponse, SignUpRequest, UserAccount};
use tracing::info;

use crate::{ApiClient, Auth, Result, Session};

impl ApiClient {
    pub async fn signup(&self, email: &str, password: SecretString) -> Result<UserAccount> {
        let body = SignUpRequest {
            email: email.to_owned(),
            password,
        };
        let request = self
            .request(Method::POST, "/auth/signup", Auth::Anonymous)?
            .json(&body);
        self.send(request).await
    }

    /// Signs in and persists the session; this is the only path that
    /// creates a stored token.
    pub async fn login(&mut self, email: &str, password: SecretString) -> Result<Session> {
        let body = SignInRequest {
            email: email.to_owned(),
            password,
        };
        let request = self
            .request(Method::POST, "/auth/login", Auth::Anonymous)?
            .json(&body);
        let response: SignInResponse = self.send(request).await?;
        let session = Session {
            email: email.to_owned(),
            access_token: response.access_token,
        };
        self.store.save(&session)?;
        self.session = Some(session.clone());
        info!(email, "Signed in");
        Ok(session)
    }

    pub async fn me(&self) -> Result<UserAccount> {
        let request = self.request(Method::GET, "/auth/me", Auth::Session)?;
        self.send(request).await
    }

    /// Validates a token that has not been persisted yet.
    pub async fn me_with_token(&self, token: &str) -> Result<UserAccount> {
        let request = self.request(Method::GET, "/auth/me", Auth::Bearer(token))?;
        self.send(request).await
    }

    /// Drops the stored session; no network call involved.
    pub fn logout(&mut self) -> Result<()> {
        self.store.clear()?;
        self.session = None;
        info!("Signed out");
        Ok(())
    }
}
