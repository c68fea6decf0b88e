use sqlx::PgPool;
use uuid::Uuid;

use super::dto::{CreateJobRequest, Job};

/// Cap on the home-page listing.
pub const HOME_PAGE_LIMIT: i64 = 8;

const JOB_COLUMNS: &str = "id, hr_email, title, company, company_logo, location, \
     job_type, application_deadline, application_count, extra, created_at";

pub async fn list(db: &PgPool, hr_email: Option<&str>) -> Result<Vec<Job>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {JOB_COLUMNS}
        FROM jobs
        WHERE ($1::text IS NULL OR hr_email = $1)
        ORDER BY created_at DESC
        "#
    );
    sqlx::query_as::<_, Job>(&sql).bind(hr_email).fetch_all(db).await
}

pub async fn list_home(db: &PgPool) -> Result<Vec<Job>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {JOB_COLUMNS}
        FROM jobs
        ORDER BY created_at DESC
        LIMIT $1
        "#
    );
    sqlx::query_as::<_, Job>(&sql)
        .bind(HOME_PAGE_LIMIT)
        .fetch_all(db)
        .await
}

pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<Job>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {JOB_COLUMNS}
        FROM jobs
        WHERE id = $1
        "#
    );
    sqlx::query_as::<_, Job>(&sql).bind(id).fetch_optional(db).await
}

/// Inserts a posting; `created_at` comes from the database clock, never the
/// client.
pub async fn create(db: &PgPool, job: &CreateJobRequest) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO jobs
            (hr_email, title, company, company_logo, location, job_type,
             application_deadline, extra)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id
        "#,
    )
    .bind(&job.hr_email)
    .bind(&job.title)
    .bind(&job.company)
    .bind(&job.company_logo)
    .bind(&job.location)
    .bind(&job.job_type)
    .bind(job.application_deadline)
    .bind(serde_json::Value::Object(job.extra.clone()))
    .fetch_one(db)
    .await
}

/// Single atomic increment. The original read the count, added one and wrote
/// it back, losing updates under concurrent submissions; this closes that
/// race at the cost of a deliberate behavior change under load.
pub async fn increment_application_count(db: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE jobs
        SET application_count = application_count + 1
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}
