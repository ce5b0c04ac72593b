//! 职位处理器

use axum::{extract::State, response::Json};

use crate::{
    app::AppState,
    core::{document::DocumentView, error::CoreError},
};

pub async fn list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<DocumentView>>, CoreError> {
    let jobs = state.job_service.list_jobs().await?;
    Ok(Json(jobs.into_iter().map(DocumentView::from).collect()))
}
