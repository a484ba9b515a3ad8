use reqwest::Method;
use shared::{FromSavedRequest, JobFitAnalysis, JobFitRequest};

use crate::{ApiClient, Auth, Result};

impl ApiClient {
    pub async fn analyze_job_fit(
        &self,
        job_description: &str,
        resume_text: &str,
    ) -> Result<JobFitAnalysis> {
        let body = JobFitRequest {
            job_description: job_description.to_owned(),
            resume_text: resume_text.to_owned(),
        };
        let request = self
            .request(Method::POST, "/job-fit/analyze", Auth::Session)?
            .json(&body);
        self.send(request).await
    }

    pub async fn analyze_job_fit_from_saved(&self, job_description: &str) -> Result<JobFitAnalysis> {
        self.require_session()?;
        let body = FromSavedRequest {
            job_description: job_description.to_owned(),
        };
        let request = self
            .request(Method::POST, "/job-fit/analyze-from-saved", Auth::Session)?
            .json(&body);
        self.send(request).await
    }
}
