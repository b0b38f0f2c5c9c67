//! Update Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bakelink_app::domain::products::data::ProductUpdate;

use crate::{
    extensions::*,
    products::{
        errors::into_status_error,
        responses::{IngredientDetailBody, ProductResponse},
    },
    state::State,
};

/// Update Product Request
///
/// Omitted or null fields keep their current value. A blank `description` or
/// `ingredients` clears it; `image_urls` and `ingredient_details` replace the
/// stored list.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub(crate) struct UpdateProductRequest {
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub price: Option<u64>,
    pub description: Option<String>,
    pub ingredients: Option<String>,
    pub is_active: Option<bool>,
    pub image_urls: Option<Vec<String>>,
    pub ingredient_details: Option<Vec<IngredientDetailBody>>,
}

impl From<UpdateProductRequest> for ProductUpdate {
    fn from(request: UpdateProductRequest) -> Self {
        ProductUpdate {
            category_uuid: request.category_id.map(Into::into),
            name: request.name,
            price: request.price,
            description: request.description.map(Some),
            ingredients: request.ingredients.map(Some),
            is_active: request.is_active,
            image_urls: request.image_urls,
            ingredient_details: request
                .ingredient_details
                .map(|details| details.into_iter().map(Into::into).collect()),
        }
    }
}

/// Product Update Handler
#[endpoint(
    tags("products"),
    summary = "Update Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product updated"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "products.update",
    skip(product, json, req, depot),
    fields(owner_uuid = tracing::field::Empty, product_uuid = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<UpdateProductRequest>,
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let owner = depot.owner_uuid_or_401()?;
    let product = product.into_inner();

    let span = tracing::Span::current();

    span.record("owner_uuid", tracing::field::display(owner));
    span.record("product_uuid", tracing::field::display(product));

    let updated = state
        .products
        .update_product(owner, product.into(), json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(ProductResponse::render(
        updated,
        &req.display_time_zone(),
    )))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use bakelink_app::domain::{
        categories::records::CategoryUuid,
        products::{
            MockProductsService, ProductsServiceError, data::IngredientDetail,
            records::ProductUuid,
        },
    };

    use crate::test_helpers::{TEST_OWNER_UUID, make_product, products_service};

    use super::*;

    fn make_service(products: MockProductsService) -> Service {
        products_service(products, Router::with_path("products/{product}").put(handler))
    }

    #[tokio::test]
    async fn test_update_product_forwards_only_supplied_fields() -> TestResult {
        let uuid = ProductUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |owner, u, update| {
                *owner == TEST_OWNER_UUID
                    && *u == uuid
                    && *update
                        == ProductUpdate {
                            price: Some(5_000),
                            ..ProductUpdate::default()
                        }
            })
            .return_once(move |_, _, _| {
                let mut product = make_product(uuid);
                product.price = 5_000;
                Ok(product)
            });

        let response: ProductResponse =
            TestClient::put(format!("http://example.com/products/{uuid}"))
                .json(&json!({ "price": 5_000 }))
                .send(&make_service(products))
                .await
                .take_json()
                .await?;

        assert_eq!(response.price, 5_000);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_product_invalid_uuid_returns_400() {
        let res = TestClient::put("http://example.com/products/123")
            .json(&json!({ "price": 1 }))
            .send(&make_service(MockProductsService::new()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn test_update_missing_product_returns_404() {
        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .return_once(|_, _, _| Err(ProductsServiceError::NotFound));

        let res = TestClient::put(format!("http://example.com/products/{}", Uuid::now_v7()))
            .json(&json!({ "name": "Rye" }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
    }

    #[tokio::test]
    async fn test_update_product_maps_descriptive_fields() -> TestResult {
        let uuid = ProductUuid::new();
        let category = CategoryUuid::new();

        let mut products = MockProductsService::new();

        products
            .expect_update_product()
            .once()
            .withf(move |_, _, update| {
                *update
                    == ProductUpdate {
                        category_uuid: Some(category),
                        description: Some(Some(String::new())),
                        image_urls: Some(vec![]),
                        ingredient_details: Some(vec![IngredientDetail {
                            name: "Butter".to_string(),
                            grams: 40.0,
                            is_visible: true,
                        }]),
                        ..ProductUpdate::default()
                    }
            })
            .return_once(move |_, _, _| Ok(make_product(uuid)));

        let res = TestClient::put(format!("http://example.com/products/{uuid}"))
            .json(&json!({
                "category_id": category.into_uuid(),
                "description": "",
                "ingredients": null,
                "image_urls": [],
                "ingredient_details": [{ "name": "Butter", "grams": 40, "is_visible": true }],
            }))
            .send(&make_service(products))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }
}
