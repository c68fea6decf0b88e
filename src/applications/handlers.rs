use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::{
    dto::{
        Application, CreateApplicationRequest, DeleteAck, EnrichedApplication,
        MyApplicationsQuery, StatusPatch, UpdateAck,
    },
    repo,
};
use crate::{
    auth::extractors::SessionUser,
    error::{ApiError, ApiResult},
    jobs::{self, dto::InsertAck},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/job-application",
            get(my_applications).post(create_application),
        )
        .route(
            "/job-application/:id",
            get(get_application)
                .patch(patch_status)
                .delete(delete_application),
        )
        .route("/jobApplications/jobs/:job_id", get(applications_for_job))
}

/// Self-service listing. The query email must match the authenticated
/// identity; anything else (including a missing parameter) is a 403.
#[instrument(skip(state, user))]
pub async fn my_applications(
    State(state): State<AppState>,
    user: SessionUser,
    Query(q): Query<MyApplicationsQuery>,
) -> ApiResult<Json<Vec<EnrichedApplication>>> {
    match q.email.as_deref() {
        Some(email) if email == user.email => {}
        _ => {
            warn!(identity = %user.email, "application list email mismatch");
            return Err(ApiError::forbidden());
        }
    }
    let apps = repo::list_for_applicant(&state.db, &user.email).await?;
    Ok(Json(apps))
}

#[instrument(skip(state))]
pub async fn applications_for_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> ApiResult<Json<Vec<Application>>> {
    let apps = repo::list_for_job(&state.db, job_id).await?;
    Ok(Json(apps))
}

#[instrument(skip(state, payload))]
pub async fn create_application(
    State(state): State<AppState>,
    Json(mut payload): Json<CreateApplicationRequest>,
) -> ApiResult<Json<InsertAck>> {
    payload.strip_server_fields();
    let id = repo::create(&state.db, &payload).await?;

    let updated = jobs::repo::increment_application_count(&state.db, payload.job_id).await?;
    if updated == 0 {
        // No FK on job_id, so the insert succeeds even when the posting is
        // gone; the counter update just has nothing to touch.
        warn!(job_id = %payload.job_id, "application references missing job");
    }

    info!(application_id = %id, job_id = %payload.job_id, "application submitted");
    Ok(Json(InsertAck {
        acknowledged: true,
        inserted_id: id,
    }))
}

#[instrument(skip(state))]
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Application>> {
    let app = repo::get(&state.db, id)
        .await?
        .ok_or_else(|| ApiError::not_found("Application not found"))?;
    Ok(Json(app))
}

#[instrument(skip(state, payload))]
pub async fn patch_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusPatch>,
) -> ApiResult<Json<UpdateAck>> {
    let (matched, modified) = repo::set_status(&state.db, id, &payload.status).await?;
    Ok(Json(UpdateAck {
        acknowledged: true,
        matched_count: matched,
        modified_count: modified,
    }))
}

#[instrument(skip(state))]
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DeleteAck>> {
    let deleted = repo::delete(&state.db, id).await?;
    Ok(Json(DeleteAck {
        acknowledged: true,
        deleted_count: deleted,
    }))
}
