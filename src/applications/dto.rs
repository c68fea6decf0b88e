use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Application {
    pub id: Uuid,
    pub job_id: Uuid,
    pub user_email: String,
    pub status: String,
    #[serde(flatten)]
    pub extra: serde_json::Value,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// An application joined with its job posting at read time. The job fields
/// are absent when the referenced posting no longer exists; the application
/// is still returned.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct EnrichedApplication {
    pub id: Uuid,
    pub job_id: Uuid,
    pub user_email: String,
    pub status: String,
    #[serde(flatten)]
    pub extra: serde_json::Value,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(rename = "jobType", skip_serializing_if = "Option::is_none")]
    pub job_type: Option<String>,
    #[serde(
        rename = "applicationDeadline",
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub application_deadline: Option<OffsetDateTime>,
}

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    /// The original wire format called this `user_id` even though it holds a
    /// job id; the alias keeps old clients working.
    #[serde(alias = "user_id")]
    pub job_id: Uuid,
    pub user_email: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CreateApplicationRequest {
    pub fn strip_server_fields(&mut self) {
        for key in ["createdAt", "created_at"] {
            self.extra.remove(key);
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MyApplicationsQuery {
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusPatch {
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct UpdateAck {
    pub acknowledged: bool,
    #[serde(rename = "matchedCount")]
    pub matched_count: u64,
    #[serde(rename = "modifiedCount")]
    pub modified_count: u64,
}

#[derive(Debug, Serialize)]
pub struct DeleteAck {
    pub acknowledged: bool,
    #[serde(rename = "deletedCount")]
    pub deleted_count: u64,
}
