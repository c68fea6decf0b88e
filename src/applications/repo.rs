use sqlx::PgPool;
use uuid::Uuid;

use super::dto::{Application, CreateApplicationRequest, EnrichedApplication};

const APP_COLUMNS: &str = "id, job_id, user_email, status, extra, created_at";

/// Applications for one applicant, enriched with the referenced posting's
/// fields. LEFT JOIN so a dangling job reference yields NULL job columns
/// instead of dropping the row.
pub async fn list_for_applicant(
    db: &PgPool,
    email: &str,
) -> Result<Vec<EnrichedApplication>, sqlx::Error> {
    sqlx::query_as::<_, EnrichedApplication>(
        r#"
        SELECT a.id, a.job_id, a.user_email, a.status, a.extra, a.created_at,
               j.title, j.company, j.company_logo, j.location, j.job_type,
               j.application_deadline
        FROM applications a
        LEFT JOIN jobs j ON j.id = a.job_id
        WHERE a.user_email = $1
        "#,
    )
    .bind(email)
    .fetch_all(db)
    .await
}

pub async fn list_for_job(db: &PgPool, job_id: Uuid) -> Result<Vec<Application>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {APP_COLUMNS}
        FROM applications
        WHERE job_id = $1
        "#
    );
    sqlx::query_as::<_, Application>(&sql)
        .bind(job_id)
        .fetch_all(db)
        .await
}

pub async fn get(db: &PgPool, id: Uuid) -> Result<Option<Application>, sqlx::Error> {
    let sql = format!(
        r#"
        SELECT {APP_COLUMNS}
        FROM applications
        WHERE id = $1
        "#
    );
    sqlx::query_as::<_, Application>(&sql)
        .bind(id)
        .fetch_optional(db)
        .await
}

pub async fn create(db: &PgPool, app: &CreateApplicationRequest) -> Result<Uuid, sqlx::Error> {
    sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO applications (job_id, user_email, status, extra)
        VALUES ($1, $2, COALESCE($3, 'pending'), $4)
        RETURNING id
        "#,
    )
    .bind(app.job_id)
    .bind(&app.user_email)
    .bind(&app.status)
    .bind(serde_json::Value::Object(app.extra.clone()))
    .fetch_one(db)
    .await
}

/// Updates only the status column; everything else on the row is untouched.
/// Returns `(matched, modified)` with updateOne's semantics: a row whose
/// status already equals the new value is matched but not modified. The
/// self-join reads the pre-update status, which Postgres snapshots before
/// the write.
pub async fn set_status(
    db: &PgPool,
    id: Uuid,
    status: &str,
) -> Result<(u64, u64), sqlx::Error> {
    let changed = sqlx::query_scalar::<_, bool>(
        r#"
        UPDATE applications a
        SET status = $2
        FROM applications old
        WHERE a.id = $1 AND old.id = a.id
        RETURNING old.status IS DISTINCT FROM $2
        "#,
    )
    .bind(id)
    .bind(status)
    .fetch_optional(db)
    .await?;
    Ok(match changed {
        Some(true) => (1, 1),
        Some(false) => (1, 0),
        None => (0, 0),
    })
}

pub async fn delete(db: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        DELETE FROM applications
        WHERE id = $1
        "#,
    )
    .bind(id)
    .execute(db)
    .await?;
    Ok(result.rows_affected())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::{dto::CreateJobRequest, repo as jobs_repo};

    fn app_req(job_id: Uuid, user_email: &str) -> CreateApplicationRequest {
        let mut extra = serde_json::Map::new();
        extra.insert("resume".into(), serde_json::json!("http://cv"));
        CreateApplicationRequest {
            job_id,
            user_email: user_email.into(),
            status: None,
            extra,
        }
    }

    async fn seed_job(db: &PgPool, title: &str) -> Uuid {
        jobs_repo::create(
            db,
            &CreateJobRequest {
                hr_email: "hr@corp.com".into(),
                title: title.into(),
                company: "Corp".into(),
                company_logo: None,
                location: None,
                job_type: None,
                application_deadline: None,
                extra: serde_json::Map::new(),
            },
        )
        .await
        .expect("seed job")
    }

    #[sqlx::test]
    async fn status_defaults_to_pending(pool: PgPool) {
        let job_id = seed_job(&pool, "T").await;
        let id = create(&pool, &app_req(job_id, "a@b.com")).await.unwrap();
        let app = get(&pool, id).await.unwrap().expect("application exists");
        assert_eq!(app.status, "pending");

        let mut req = app_req(job_id, "b@c.com");
        req.status = Some("accepted".into());
        let id = create(&pool, &req).await.unwrap();
        let app = get(&pool, id).await.unwrap().unwrap();
        assert_eq!(app.status, "accepted");
    }

    #[sqlx::test]
    async fn patch_updates_only_the_status_column(pool: PgPool) {
        let job_id = seed_job(&pool, "T").await;
        let id = create(&pool, &app_req(job_id, "a@b.com")).await.unwrap();
        let before = get(&pool, id).await.unwrap().unwrap();

        let (matched, modified) = set_status(&pool, id, "accepted").await.unwrap();
        assert_eq!((matched, modified), (1, 1));

        let after = get(&pool, id).await.unwrap().unwrap();
        assert_eq!(after.status, "accepted");
        assert_eq!(after.user_email, before.user_email);
        assert_eq!(after.extra, before.extra);
        assert_eq!(after.created_at, before.created_at);
        assert_eq!(after.job_id, before.job_id);
    }

    #[sqlx::test]
    async fn patch_to_same_status_matches_without_modifying(pool: PgPool) {
        let job_id = seed_job(&pool, "T").await;
        let id = create(&pool, &app_req(job_id, "a@b.com")).await.unwrap();
        assert_eq!(set_status(&pool, id, "pending").await.unwrap(), (1, 0));
    }

    #[sqlx::test]
    async fn patch_of_missing_id_matches_nothing(pool: PgPool) {
        let counts = set_status(&pool, Uuid::new_v4(), "accepted").await.unwrap();
        assert_eq!(counts, (0, 0));
    }

    #[sqlx::test]
    async fn delete_of_missing_id_reports_zero_without_error(pool: PgPool) {
        let job_id = seed_job(&pool, "T").await;
        let id = create(&pool, &app_req(job_id, "a@b.com")).await.unwrap();
        assert_eq!(delete(&pool, id).await.unwrap(), 1);
        assert_eq!(delete(&pool, id).await.unwrap(), 0);
        assert_eq!(delete(&pool, Uuid::new_v4()).await.unwrap(), 0);
    }

    #[sqlx::test]
    async fn applicant_listing_enriches_from_the_posting(pool: PgPool) {
        let job_id = seed_job(&pool, "Backend Engineer").await;
        create(&pool, &app_req(job_id, "a@b.com")).await.unwrap();

        let apps = list_for_applicant(&pool, "a@b.com").await.unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].title.as_deref(), Some("Backend Engineer"));
        assert_eq!(apps[0].company.as_deref(), Some("Corp"));
    }

    #[sqlx::test]
    async fn dangling_job_reference_returns_unenriched_row(pool: PgPool) {
        create(&pool, &app_req(Uuid::new_v4(), "a@b.com"))
            .await
            .unwrap();
        let apps = list_for_applicant(&pool, "a@b.com").await.unwrap();
        assert_eq!(apps.len(), 1);
        assert!(apps[0].title.is_none());
        assert!(apps[0].application_deadline.is_none());
    }

    #[sqlx::test]
    async fn job_listing_is_scoped_to_the_job(pool: PgPool) {
        let job_a = seed_job(&pool, "A").await;
        let job_b = seed_job(&pool, "B").await;
        create(&pool, &app_req(job_a, "a@b.com")).await.unwrap();
        create(&pool, &app_req(job_a, "c@d.com")).await.unwrap();
        create(&pool, &app_req(job_b, "a@b.com")).await.unwrap();

        let apps = list_for_job(&pool, job_a).await.unwrap();
        assert_eq!(apps.len(), 2);
        assert!(apps.iter().all(|a| a.job_id == job_a));
    }
}
