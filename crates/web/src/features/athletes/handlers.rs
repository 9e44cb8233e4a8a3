use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::athlete::{
        AthleteListParams, AthleteListResponse, AthleteResponse, CreateAthleteRequest,
        UpdateAthleteRequest,
    },
};
use uuid::Uuid;
use validator::Validate;

use crate::error::WebError;

use super::services;

#[utoipa::path(
    post,
    path = "/atleta/",
    request_body = CreateAthleteRequest,
    responses(
        (status = 201, description = "Athlete created successfully", body = AthleteResponse),
        (status = 303, description = "An athlete with this cpf already exists"),
        (status = 400, description = "Validation error, or unknown category or training center")
    ),
    tag = "atleta"
)]
pub async fn create_athlete(
    State(db): State<Database>,
    Json(req): Json<CreateAthleteRequest>,
) -> Result<Response, WebError> {
    req.validate()?;

    let athlete = services::create_athlete(&db, &req).await?;

    Ok((StatusCode::CREATED, Json(athlete)).into_response())
}

#[utoipa::path(
    get,
    path = "/atleta/",
    params(AthleteListParams),
    responses(
        (status = 200, description = "Full records matching `nome` or `cpf`; without filters, the summary of every athlete", body = AthleteListResponse),
        (status = 404, description = "No athlete matched")
    ),
    tag = "atleta"
)]
pub async fn list_athletes(
    State(db): State<Database>,
    Query(params): Query<AthleteListParams>,
) -> Result<Response, WebError> {
    let athletes = services::list_athletes(&db, &params).await?;

    Ok(Json(athletes).into_response())
}

#[utoipa::path(
    get,
    path = "/atleta/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 200, description = "Athlete found", body = AthleteResponse),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atleta"
)]
pub async fn get_athlete(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    let athlete = services::get_athlete(&db, id).await?;

    Ok(Json(athlete).into_response())
}

#[utoipa::path(
    patch,
    path = "/atleta/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    request_body = UpdateAthleteRequest,
    responses(
        (status = 200, description = "Athlete updated successfully", body = AthleteResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atleta"
)]
pub async fn update_athlete(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
    Json(update_req): Json<UpdateAthleteRequest>,
) -> Result<Response, WebError> {
    update_req.validate()?;

    let updated = services::update_athlete(&db, id, &update_req).await?;

    Ok(Json(updated).into_response())
}

#[utoipa::path(
    delete,
    path = "/atleta/{id}",
    params(
        ("id" = Uuid, Path, description = "Athlete id")
    ),
    responses(
        (status = 204, description = "Athlete deleted successfully"),
        (status = 404, description = "Athlete not found")
    ),
    tag = "atleta"
)]
pub async fn delete_athlete(
    State(db): State<Database>,
    Path(id): Path<Uuid>,
) -> Result<Response, WebError> {
    services::delete_athlete(&db, id).await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
