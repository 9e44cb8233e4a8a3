use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::Category;

/// Request payload for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[serde(rename = "nome")]
    #[validate(length(
        min = 1,
        max = 10,
        message = "Name must be between 1 and 10 characters"
    ))]
    #[schema(example = "Scale")]
    pub name: String,
}

/// Category as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    #[serde(rename = "nome")]
    pub name: String,
}

/// Category referenced by name from an athlete payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct CategoryRef {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, max = 10))]
    #[schema(example = "Scale")]
    pub name: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
        }
    }
}
