use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::TrainingCenter;

/// Request payload for creating a new training center
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTrainingCenterRequest {
    #[serde(rename = "nome")]
    #[validate(length(
        min = 1,
        max = 20,
        message = "Name must be between 1 and 20 characters"
    ))]
    #[schema(example = "CT King")]
    pub name: String,

    #[serde(rename = "endereco")]
    #[validate(length(
        min = 1,
        max = 60,
        message = "Address must be between 1 and 60 characters"
    ))]
    #[schema(example = "Rua X, 123")]
    pub address: String,

    #[serde(rename = "proprietario")]
    #[validate(length(
        min = 1,
        max = 30,
        message = "Owner must be between 1 and 30 characters"
    ))]
    #[schema(example = "Marcos")]
    pub owner: String,
}

/// Training center as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrainingCenterResponse {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "proprietario")]
    pub owner: String,
}

/// Training center referenced by name from an athlete payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct TrainingCenterRef {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 20))]
    #[schema(example = "CT King")]
    pub name: String,
}

impl From<TrainingCenter> for TrainingCenterResponse {
    fn from(training_center: TrainingCenter) -> Self {
        Self {
            id: training_center.id,
            name: training_center.name,
            address: training_center.address,
            owner: training_center.owner,
        }
    }
}
