use storage::{
    Database,
    dto::training_center::{CreateTrainingCenterRequest, TrainingCenterResponse},
    models::{NewTrainingCenter, TRAINING_CENTER_NAME_KEY},
    session::TrainingCenterFilter,
};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiResult, WebError};
use crate::features::add_and_commit;

/// Create a training center under a freshly generated id
pub async fn create_training_center(
    db: &Database,
    request: &CreateTrainingCenterRequest,
) -> ApiResult<TrainingCenterResponse> {
    let training_center = NewTrainingCenter {
        id: Uuid::new_v4(),
        name: request.name.clone(),
        address: request.address.clone(),
        owner: request.owner.clone(),
    };
    let response = TrainingCenterResponse {
        id: training_center.id,
        name: training_center.name.clone(),
        address: training_center.address.clone(),
        owner: training_center.owner.clone(),
    };

    let session = db.begin().await?;
    add_and_commit(session, training_center.into(), TRAINING_CENTER_NAME_KEY, || {
        format!(
            "A training center already exists with name: {}",
            request.name
        )
    })
    .await?;

    info!(training_center_id = %response.id, name = %response.name, "Training center created");

    Ok(response)
}

/// List all training centers
pub async fn list_training_centers(db: &Database) -> ApiResult<Vec<TrainingCenterResponse>> {
    let mut session = db.begin().await?;
    let training_centers = session
        .find_training_centers(TrainingCenterFilter::All)
        .await?;

    Ok(training_centers
        .into_iter()
        .map(TrainingCenterResponse::from)
        .collect())
}

/// Get training center by public id
pub async fn get_training_center(db: &Database, id: Uuid) -> ApiResult<TrainingCenterResponse> {
    let mut session = db.begin().await?;

    session
        .find_training_centers(TrainingCenterFilter::ById(id))
        .await?
        .into_iter()
        .next()
        .map(TrainingCenterResponse::from)
        .ok_or_else(|| WebError::NotFound(format!("Training center not found for id: {id}")))
}
