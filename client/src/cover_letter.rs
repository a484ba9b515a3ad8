use reqwest::Method;
use shared::{CoverLetterRequest, CoverLetterResponse, FromSavedRequest};

use crate::{ApiClient, Auth, Result};

impl ApiClient {
    pub async fn generate_cover_letter(
        &self,
        resume_text: &str,
        job_description: &str,
    ) -> Result<String> {
        let body = CoverLetterRequest {
            resume_text: resume_text.to_owned(),
            job_description: job_description.to_owned(),
        };
        let request = self
            .request(Method::POST, "/cover-letter/generate", Auth::Session)?
            .json(&body);
        let response: CoverLetterResponse = self.send(request).await?;
        Ok(response.cover_letter)
    }

    /// Generates against the resume saved on the backend; requires a
    /// session up front rather than bouncing off a 401.
    pub async fn generate_cover_letter_from_saved(&self, job_description: &str) -> Result<String> {
        self.require_session()?;
        let body = FromSavedRequest {
            job_description: job_description.to_owned(),
        };
        let request = self
            .request(
                Method::POST,
                "/cover-letter/generate-from-saved",
                Auth::Session,
            )?
            .json(&body);
        let response: CoverLetterResponse = self.send(request).await?;
        Ok(response.cover_letter)
    }
}
