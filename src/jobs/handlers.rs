use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{info, instrument};
use uuid::Uuid;

use super::{
    dto::{CreateJobRequest, InsertAck, Job, JobsQuery},
    repo,
};
use crate::{
    error::{ApiError, ApiResult},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(list_jobs).post(create_job))
        .route("/HomeJobs", get(home_jobs))
        .route("/jobs/:id", get(get_job))
}

#[instrument(skip(state))]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(q): Query<JobsQuery>,
) -> ApiResult<Json<Vec<Job>>> {
    let jobs = repo::list(&state.db, q.email.as_deref()).await?;
    Ok(Json(jobs))
}

#[instrument(skip(state))]
pub async fn home_jobs(State(state): State<AppState>) -> ApiResult<Json<Vec<Job>>> {
    let jobs = repo::list_home(&state.db).await?;
    Ok(Json(jobs))
}

#[instrument(skip(state))]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Job>> {
    let job = repo::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Job not found"))?;
    Ok(Json(job))
}

#[instrument(skip(state, payload))]
pub async fn create_job(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateJobRequest>,
) -> ApiResult<Json<InsertAck>> {
    payload.strip_server_fields();
    let id = repo::create(&state.db, &payload).await?;
    info!(job_id = %id, hr_email = %payload.hr_email, "job posted");
    Ok(Json(InsertAck {
        acknowledged: true,
        inserted_id: id,
    }))
}
