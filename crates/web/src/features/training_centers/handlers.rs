use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::training_center::{CreateTrainingCenterRequest, TrainingCenterResponse},
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/centro_treinamento/",
    request_body = CreateTrainingCenterRequest,
    responses(
        (status = 201, description = "Training center created successfully", body = TrainingCenterResponse),
        (status = 303, description = "A training center with this name already exists"),
        (status = 400, description = "Validation error")
    ),
    tag = "centro_treinamento"
)]
pub async fn create_training_center(
    State(db): State<Database>,
    Json(req): Json<CreateTrainingCenterRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let training_center = services::create_training_center(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(training_center)).into_response())
}

#[utoipa::path(
    get,
    path = "/centro_treinamento/",
    responses(
        (status = 200, description = "List all training centers", body = Vec<TrainingCenterResponse>)
    ),
    tag = "centro_treinamento"
)]
pub async fn list_training_centers(State(db): State<Database>) -> Result<Response, WebError> {
    let training_centers = services::list_training_centers(&db).await?;

    Ok(Json(training_centers).into_response())
}

#[utoipa::path(
    get,
    path = "/centro_treinamento/{id}",
    params(
        ("id" = Uuid, Path, description = "Training center id")
    ),
    responses(
        (status = 200, description = "Training center found", body = TrainingCenterResponse),
        (status = 404, description = "Training center not found")
    ),
    tag = "centro_treinamento"
)]
pub async fn get_training_center(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let training_center = services::get_training_center(&db, id).await?;

    Ok(Json(training_center).into_response())
}
