use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

fn expose_secret<S>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(secret.expose_secret())
}

#[derive(Debug, Serialize)]
pub struct SignUpRequest {
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
}

#[derive(Debug, Serialize)]
pub struct SignInRequest {
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignInResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: i64,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverLetterRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobFitRequest {
    pub job_description: String,
    pub resume_text: String,
}

// The backend carries no guarantee on the casing of analysis fields, and
// older deployments report strengths as "strong_points". The aliases plus
// defaults normalize every observed shape into this one struct.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct JobFitAnalysis {
    #[serde(default, alias = "matchScore")]
    pub match_score: u8,

    #[serde(default, alias = "strong_points", alias = "strongPoints")]
    pub strengths: Vec<String>,

    #[serde(default, alias = "missingSkills")]
    pub missing_skills: Vec<String>,

    #[serde(default, alias = "redFlags")]
    pub red_flags: Vec<String>,

    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResumeRequest {
    pub job_description: String,
    pub resume_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeResumeResponse {
    #[serde(alias = "optimizedResume")]
    pub optimized_resume: String,
}

// Body for the *-from-saved endpoints, which read the resume stored on the
// backend and only need the job description from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FromSavedRequest {
    pub job_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TailorResumeResponse {
    #[serde(alias = "tailoredResume")]
    pub tailored_resume: String,

    #[serde(default, alias = "improvementExplanation")]
    pub improvement_explanation: String,

    #[serde(default, alias = "improvedMatch")]
    pub improved_match: JobFitAnalysis,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImproveResumeResponse {
    #[serde(default)]
    pub versions: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: i64,
    pub original_filename: String,
    pub content_type: Option<String>,
    pub extracted_text: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameResumeRequest {
    pub new_filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerProfile {
    pub id: i64,
    pub user_id: i64,
    pub experience_level: Option<String>,
    pub preferred_roles: Option<String>,
    pub preferred_industries: Option<String>,
    pub preferred_locations: Option<String>,
    pub skills: Option<String>,
    pub work_authorization: Option<String>,
    pub career_goal: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CareerProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_roles: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_industries: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_locations: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_authorization: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub career_goal: Option<String>,
}
