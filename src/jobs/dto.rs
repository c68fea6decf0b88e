use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Keys the server owns; client-supplied copies are dropped at the boundary
/// so a read can never echo them back.
const SERVER_FIELDS: &[&str] = &[
    "createdAt",
    "created_at",
    "applicationCount",
    "application_count",
];

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Job {
    pub id: Uuid,
    pub hr_email: String,
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "jobType")]
    pub job_type: Option<String>,
    #[serde(rename = "applicationDeadline", with = "time::serde::rfc3339::option")]
    pub application_deadline: Option<OffsetDateTime>,
    #[serde(rename = "applicationCount")]
    pub application_count: i64,
    #[serde(flatten)]
    pub extra: serde_json::Value,
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub hr_email: String,
    pub title: String,
    pub company: String,
    pub company_logo: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "jobType")]
    pub job_type: Option<String>,
    #[serde(
        rename = "applicationDeadline",
        with = "time::serde::rfc3339::option",
        default
    )]
    pub application_deadline: Option<OffsetDateTime>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl CreateJobRequest {
    pub fn strip_server_fields(&mut self) {
        for key in SERVER_FIELDS {
            self.extra.remove(*key);
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JobsQuery {
    pub email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct InsertAck {
    pub acknowledged: bool,
    #[serde(rename = "insertedId")]
    pub inserted_id: Uuid,
}
