//! Create Category Handler

use std::sync::Arc;

use salvo::{
    http::header::LOCATION,
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use bakelink_app::domain::categories::{data::NewCategory, records::CategoryUuid};

use crate::{
    categories::{errors::into_status_error, responses::CategoryResponse},
    extensions::*,
    state::State,
};

/// Category Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct CategoryRequest {
    /// Display name, unique per owner
    pub name: String,
}

/// Create Category Handler
#[endpoint(
    tags("product-categories"),
    summary = "Create Category",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Category created"),
        (status_code = StatusCode::CONFLICT, description = "Category name already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CategoryRequest>,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<CategoryResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;

    let category = state
        .categories
        .create_category(
            owner,
            NewCategory {
                uuid: CategoryUuid::new(),
                name: json.into_inner().name,
            },
        )
        .await
        .map_err(into_status_error)?;

    res.add_header(
        LOCATION,
        format!("/product-categories/{}", category.uuid),
        true,
    )
    .or_500("failed to set location header")?
    .status_code(StatusCode::CREATED);

    Ok(Json(CategoryResponse::render(
        category,
        &req.display_time_zone(),
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bakelink_app::domain::categories::{CategoriesServiceError, MockCategoriesService};

    use crate::test_helpers::{TEST_OWNER_UUID, categories_service, make_category};

    use super::*;

    fn make_service(categories: MockCategoriesService) -> Service {
        categories_service(
            categories,
            Router::with_path("product-categories").post(handler),
        )
    }

    #[tokio::test]
    async fn test_create_category_returns_201_with_location() -> TestResult {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_category()
            .once()
            .withf(|owner, new| *owner == TEST_OWNER_UUID && new.name == "Loaves")
            .return_once(|_, new| Ok(make_category(new.uuid)));

        let mut res = TestClient::post("http://example.com/product-categories")
            .json(&json!({ "name": "Loaves" }))
            .send(&make_service(categories))
            .await;

        let body: CategoryResponse = res.take_json().await?;
        let location = res.headers().get("location").and_then(|v| v.to_str().ok());

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(
            location,
            Some(format!("/product-categories/{}", body.id).as_str())
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_create_duplicate_category_returns_409() {
        let mut categories = MockCategoriesService::new();

        categories
            .expect_create_category()
            .once()
            .return_once(|_, _| Err(CategoriesServiceError::AlreadyExists));

        let res = TestClient::post("http://example.com/product-categories")
            .json(&json!({ "name": "Loaves" }))
            .send(&make_service(categories))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn test_create_without_name_returns_400() {
        let res = TestClient::post("http://example.com/product-categories")
            .json(&json!({}))
            .send(&make_service(MockCategoriesService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
