use storage::{
    Database,
    dto::category::{CategoryResponse, CreateCategoryRequest},
    models::{CATEGORY_NAME_KEY, NewCategory},
    session::CategoryFilter,
};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiResult, WebError};
use crate::features::add_and_commit;

/// Create a category under a freshly generated id
pub async fn create_category(
    db: &Database,
    request: &CreateCategoryRequest,
) -> ApiResult<CategoryResponse> {
    let category = NewCategory {
        id: Uuid::new_v4(),
        name: request.name.clone(),
    };
    let response = CategoryResponse {
        id: category.id,
        name: category.name.clone(),
    };

    let session = db.begin().await?;
    add_and_commit(session, category.into(), CATEGORY_NAME_KEY, || {
        format!("A category already exists with name: {}", request.name)
    })
    .await?;

    info!(category_id = %response.id, name = %response.name, "Category created");

    Ok(response)
}

/// List all categories
pub async fn list_categories(db: &Database) -> ApiResult<Vec<CategoryResponse>> {
    let mut session = db.begin().await?;
    let categories = session.find_categories(CategoryFilter::All).await?;

    Ok(categories.into_iter().map(CategoryResponse::from).collect())
}

/// Get category by public id
pub async fn get_category(db: &Database, id: Uuid) -> ApiResult<CategoryResponse> {
    let mut session = db.begin().await?;

    session
        .find_categories(CategoryFilter::ById(id))
        .await?
        .into_iter()
        .next()
        .map(CategoryResponse::from)
        .ok_or_else(|| WebError::NotFound(format!("Category not found for id: {id}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str) -> CreateCategoryRequest {
        CreateCategoryRequest {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn created_category_can_be_fetched_by_id() {
        let db = Database::in_memory().await.unwrap();

        let created = create_category(&db, &request("Scale")).await.unwrap();
        let fetched = get_category(&db, created.id).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn each_category_gets_a_distinct_id() {
        let db = Database::in_memory().await.unwrap();

        let first = create_category(&db, &request("Scale")).await.unwrap();
        let second = create_category(&db, &request("RX")).await.unwrap();

        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn duplicate_name_is_a_conflict() {
        let db = Database::in_memory().await.unwrap();
        create_category(&db, &request("Scale")).await.unwrap();

        let err = create_category(&db, &request("Scale")).await.unwrap_err();

        match err {
            WebError::Conflict(msg) => {
                assert_eq!(msg, "A category already exists with name: Scale")
            }
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(list_categories(&db).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let db = Database::in_memory().await.unwrap();
        for name in ["Scale", "RX", "Master"] {
            create_category(&db, &request(name)).await.unwrap();
        }

        let names: Vec<String> = list_categories(&db)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, vec!["Scale", "RX", "Master"]);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let db = Database::in_memory().await.unwrap();

        let err = get_category(&db, Uuid::new_v4()).await.unwrap_err();

        assert!(matches!(err, WebError::NotFound(_)));
    }
}
