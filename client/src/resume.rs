use reqwest::multipart::{Form, Part};
use reqwest::Method;
use shared::{
    FromSavedRequest, ImproveResumeResponse, OptimizeResumeRequest, OptimizeResumeResponse,
    RenameResumeRequest, ResumeRecord, TailorResumeResponse,
};

use crate::{ApiClient, Auth, Result};

fn file_form(filename: &str, bytes: Vec<u8>) -> Form {
    Form::new().part("file", Part::bytes(bytes).file_name(filename.to_owned()))
}

impl ApiClient {
    pub async fn optimize_resume(
        &self,
        job_description: &str,
        resume_text: &str,
    ) -> Result<String> {
        let body = OptimizeResumeRequest {
            job_description: job_description.to_owned(),
            resume_text: resume_text.to_owned(),
        };
        let request = self
            .request(Method::POST, "/resume/optimize-from-jd", Auth::Session)?
            .json(&body);
        let response: OptimizeResumeResponse = self.send(request).await?;
        Ok(response.optimized_resume)
    }

    pub async fn tailor_resume_from_saved(
        &self,
        job_description: &str,
    ) -> Result<TailorResumeResponse> {
        self.require_session()?;
        let body = FromSavedRequest {
            job_description: job_description.to_owned(),
        };
        let request = self
            .request(Method::POST, "/resume/tailor-from-saved", Auth::Session)?
            .json(&body);
        self.send(request).await
    }

    /// One-shot improvement of an uploaded resume file; works without an
    /// account.
    pub async fn improve_resume(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<ImproveResumeResponse> {
        let request = self
            .request(Method::POST, "/resume/improve", Auth::Anonymous)?
            .multipart(file_form(filename, bytes));
        self.send(request).await
    }

    /// The saved resume on file for the current account, if any.
    pub async fn saved_resume(&self) -> Result<Option<ResumeRecord>> {
        let request = self.request(Method::GET, "/user/resume", Auth::Session)?;
        match self.send::<ResumeRecord>(request).await {
            Ok(record) => Ok(Some(record)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }

    pub async fn upload_resume(&self, filename: &str, bytes: Vec<u8>) -> Result<ResumeRecord> {
        self.require_session()?;
        let request = self
            .request(Method::POST, "/user/resume/upload", Auth::Session)?
            .multipart(file_form(filename, bytes));
        self.send(request).await
    }

    pub async fn rename_resume(&self, new_filename: &str) -> Result<ResumeRecord> {
        let body = RenameResumeRequest {
            new_filename: new_filename.to_owned(),
        };
        let request = self
            .request(Method::PATCH, "/user/resume/rename", Auth::Session)?
            .json(&body);
        self.send(request).await
    }
}
